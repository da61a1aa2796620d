//! Configuration management for wslmate
//!
//! Two paths, nothing else: where exported archives go and where
//! imported distros get their new home. Both default to empty.
//!
//! Config file location: ~/.config/wslmate/config.json
//! (override with WSLMATE_CONFIG)

use crate::error::{WslError, WslResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "WSLMATE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory that receives `<distro>-ex.tar` archives
    pub export_path: String,
    /// Root under which imported distros get `<root>/<distro>`
    pub import_path: String,
}

impl Config {
    /// Get the config file path
    pub fn path() -> WslResult<PathBuf> {
        if let Some(custom) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(custom));
        }
        let config_dir = dirs::config_dir().ok_or_else(|| WslError::Io {
            path: PathBuf::from("~/.config"),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine config directory",
            ),
        })?;
        Ok(config_dir.join("wslmate").join("config.json"))
    }

    /// Load config from the default location
    pub fn load() -> WslResult<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Save config to the default location
    pub fn save(&self) -> WslResult<()> {
        self.save_to(&Self::path()?)
    }

    /// Load config from `path`. A missing file yields defaults; a file that
    /// exists but does not parse is an error.
    pub fn load_from(path: &Path) -> WslResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(WslError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| WslError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the whole record to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> WslResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| WslError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| WslError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        fs::write(path, content).map_err(|e| WslError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Replace both paths with user input, dropping embedded NULs
    pub fn set_paths(&mut self, export_path: &str, import_path: &str) {
        self.export_path = export_path.replace('\0', "");
        self.import_path = import_path.replace('\0', "");
    }

    /// Both paths are set, so relocate can run
    pub fn is_complete(&self) -> bool {
        !self.export_path.is_empty() && !self.import_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export_path, "");
        assert_eq!(config.import_path, "");
        assert!(!config.is_complete());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            export_path: r"D:\wsl\exports".into(),
            import_path: r"E:\wsl\distros".into(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_absent_keys_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"export_path": "C:\\exports"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.export_path, r"C:\exports");
        assert_eq!(config.import_path, "");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "export_path = nope").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, WslError::Parse { .. }));
    }

    #[test]
    fn test_set_paths_strips_nul() {
        let mut config = Config::default();
        config.set_paths("C:\\ex\0ports", "\0D:\\distros");
        assert_eq!(config.export_path, "C:\\exports");
        assert_eq!(config.import_path, "D:\\distros");
        assert!(config.is_complete());
    }
}
