//! Error types for the wsl interaction layer
//!
//! Every failure the core can produce ends up in one of these variants
//! and is shown to the user as-is. Nothing here is retried.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type WslResult<T> = std::result::Result<T, WslError>;

#[derive(Debug, Error)]
pub enum WslError {
    /// A required input was empty. Raised before any process is spawned.
    #[error("missing required value: {field}")]
    Validation { field: &'static str },

    /// The tool ran but exited non-zero.
    #[error("{program} exited with {}: {stderr}", exit_code_label(.exit_code))]
    Command {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Config file exists but is not valid JSON.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The process could not be started at all (tool missing from PATH etc.)
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One step of a relocate sequence failed. Earlier steps are not undone.
    #[error("relocate stopped at {step}: {source}")]
    Relocate {
        step: RelocateStep,
        #[source]
        source: Box<WslError>,
    },
}

impl WslError {
    pub fn validation(field: &'static str) -> Self {
        WslError::Validation { field }
    }

    /// The step a relocate failed at, if this is a relocate failure.
    pub fn failed_step(&self) -> Option<RelocateStep> {
        match self {
            WslError::Relocate { step, .. } => Some(*step),
            _ => None,
        }
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "no exit code".to_string(),
    }
}

/// The four steps of a relocate, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocateStep {
    Shutdown,
    Export,
    Unregister,
    Import,
}

impl RelocateStep {
    pub fn all() -> &'static [RelocateStep] {
        &[
            RelocateStep::Shutdown,
            RelocateStep::Export,
            RelocateStep::Unregister,
            RelocateStep::Import,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelocateStep::Shutdown => "shutdown",
            RelocateStep::Export => "export",
            RelocateStep::Unregister => "unregister",
            RelocateStep::Import => "import",
        }
    }
}

impl fmt::Display for RelocateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = WslError::validation("import_root");
        assert_eq!(err.to_string(), "missing required value: import_root");
    }

    #[test]
    fn test_command_message_carries_stderr() {
        let err = WslError::Command {
            program: "wsl".into(),
            exit_code: Some(1),
            stderr: "There is no distribution with the supplied name.".into(),
        };
        assert_eq!(
            err.to_string(),
            "wsl exited with exit code 1: There is no distribution with the supplied name."
        );
    }

    #[test]
    fn test_relocate_reports_step() {
        let err = WslError::Relocate {
            step: RelocateStep::Unregister,
            source: Box::new(WslError::Command {
                program: "wsl".into(),
                exit_code: None,
                stderr: "access denied".into(),
            }),
        };
        assert_eq!(err.failed_step(), Some(RelocateStep::Unregister));
        assert!(err.to_string().starts_with("relocate stopped at unregister"));
        assert!(err.to_string().contains("access denied"));
    }
}
