//! Process execution for the wsl tool
//!
//! Two primitives with different contracts:
//! - [`CommandRunner::run`] blocks until the tool exits and captures output
//! - [`SessionLauncher::run_detached`] opens an interactive terminal and
//!   returns immediately

use crate::error::{WslError, WslResult};
use std::process::{Command, Stdio};

/// Program invoked when WSLMATE_TOOL is not set
pub const DEFAULT_TOOL: &str = "wsl";

const TOOL_ENV: &str = "WSLMATE_TOOL";

/// Decoded output of a successful invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Synchronous tool invocation. `args` excludes the program name.
pub trait CommandRunner {
    fn program(&self) -> &str;

    fn run(&self, args: &[String]) -> WslResult<CommandOutput>;
}

/// Fire-and-forget interactive session
pub trait SessionLauncher {
    fn run_detached(&self, command_line: &str) -> WslResult<()>;
}

/// The real tool on PATH
#[derive(Debug, Clone)]
pub struct WslCli {
    program: String,
}

impl WslCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use WSLMATE_TOOL if set, otherwise `wsl`
    pub fn from_env() -> Self {
        let program = std::env::var(TOOL_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOOL.to_string());
        Self::new(program)
    }
}

impl Default for WslCli {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

impl CommandRunner for WslCli {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[String]) -> WslResult<CommandOutput> {
        let display_cmd = format!("{} {}", self.program, args.join(" "));
        tracing::info!(command = %display_cmd, "running");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| WslError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        let stdout = decode_output(&output.stdout);
        let stderr = decode_output(&output.stderr);

        if output.status.success() {
            return Ok(CommandOutput { stdout, stderr });
        }

        // wsl prints most of its errors on stdout
        let message = if !stderr.trim().is_empty() {
            stderr.trim().to_string()
        } else {
            stdout.trim().to_string()
        };
        tracing::warn!(
            command = %display_cmd,
            code = ?output.status.code(),
            "command failed: {}",
            message
        );

        Err(WslError::Command {
            program: self.program.clone(),
            exit_code: output.status.code(),
            stderr: message,
        })
    }
}

impl SessionLauncher for WslCli {
    fn run_detached(&self, command_line: &str) -> WslResult<()> {
        tracing::info!(command = %command_line, "launching session");

        let mut cmd = shell_command(command_line);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // The child is intentionally not waited on
        cmd.spawn().map(|_child| ()).map_err(|e| WslError::Spawn {
            program: command_line.to_string(),
            source: e,
        })
    }
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let mut cmd = Command::new("cmd");
    cmd.arg("/C").raw_arg(command_line);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

/// Shell line that opens a new terminal window running the tool in `distro`
pub fn session_command_line(program: &str, distro: &str) -> String {
    if cfg!(windows) {
        format!("start cmd /k {} -d {}", program, distro)
    } else {
        format!("x-terminal-emulator -e {} -d {}", program, distro)
    }
}

/// Lossy UTF-8 decode with NUL bytes removed.
///
/// wsl.exe emits UTF-16LE on some code paths; dropping the NULs recovers
/// the ASCII text.
pub fn decode_output(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\0', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_nul() {
        let raw = b"U\0b\0u\0n\0t\0u\0\r\0\n\0";
        assert_eq!(decode_output(raw), "Ubuntu\r\n");
    }

    #[test]
    fn test_decode_replaces_invalid_utf8() {
        let raw = [b'o', b'k', 0xff, b'!'];
        assert_eq!(decode_output(&raw), "ok\u{fffd}!");
    }

    #[test]
    fn test_session_command_line() {
        let line = session_command_line("wsl", "Ubuntu");
        if cfg!(windows) {
            assert_eq!(line, "start cmd /k wsl -d Ubuntu");
        } else {
            assert_eq!(line, "x-terminal-emulator -e wsl -d Ubuntu");
        }
    }

    #[test]
    fn test_default_program() {
        assert_eq!(WslCli::default().program(), "wsl");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let cli = WslCli::new("wslmate-definitely-not-a-real-binary");
        let err = cli.run(&["--list".to_string()]).unwrap_err();
        assert!(matches!(err, WslError::Spawn { .. }));
    }
}
