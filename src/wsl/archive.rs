//! Archive naming and discovery
//!
//! Exports are always written as `<export_root>/<distro>-ex.tar`, so the
//! distro name can be read back from the file name.

use crate::error::{WslError, WslResult};
use crate::types::format_bytes;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

pub const ARCHIVE_SUFFIX: &str = "-ex.tar";

/// An exported distro archive found on disk
#[derive(Debug, Clone)]
pub struct Archive {
    pub path: PathBuf,
    /// Distro name derived from the file name
    pub name: String,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

impl Archive {
    pub fn formatted_size(&self) -> String {
        format_bytes(self.size)
    }

    pub fn formatted_date(&self) -> String {
        self.modified
            .map(|d| d.format("%d.%m.%y %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// `<export_root>/<name>-ex.tar`
pub fn archive_path(name: &str, export_root: &str) -> PathBuf {
    Path::new(export_root).join(format!("{}{}", name, ARCHIVE_SUFFIX))
}

/// `<import_root>/<name>`, the directory a distro is imported into
pub fn install_dir(name: &str, import_root: &str) -> PathBuf {
    Path::new(import_root).join(name)
}

/// Distro name for an archive path.
///
/// Strips `-ex.tar` when present, otherwise just the last extension.
/// Returns an empty string when nothing usable is left.
pub fn derive_name(archive: &Path) -> String {
    let file_name = match archive.file_name() {
        Some(f) => f.to_string_lossy().replace('\0', ""),
        None => return String::new(),
    };

    if let Some(stripped) = file_name.strip_suffix(ARCHIVE_SUFFIX) {
        return stripped.to_string();
    }

    Path::new(&file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Archives directly under `export_root`, sorted by file name
pub fn list_archives(export_root: &str) -> WslResult<Vec<Archive>> {
    if export_root.is_empty() {
        return Err(WslError::validation("export_root"));
    }

    let root = Path::new(export_root);
    let entries = fs::read_dir(root).map_err(|e| WslError::Io {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut archives: Vec<Archive> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .ends_with(ARCHIVE_SUFFIX)
        })
        .map(|entry| {
            let path = entry.path();
            let metadata = entry.metadata().ok();
            Archive {
                name: derive_name(&path),
                size: metadata.as_ref().map(|m| m.len()).unwrap_or(0),
                modified: metadata
                    .and_then(|m| m.modified().ok())
                    .map(DateTime::<Local>::from),
                path,
            }
        })
        .collect();

    archives.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    tracing::debug!(root = %export_root, count = archives.len(), "archives listed");
    Ok(archives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_path() {
        assert_eq!(
            archive_path("Ubuntu", "/exports"),
            Path::new("/exports").join("Ubuntu-ex.tar")
        );
    }

    #[test]
    fn test_install_dir() {
        assert_eq!(install_dir("Debian", "/distros"), Path::new("/distros").join("Debian"));
    }

    #[test]
    fn test_derive_name_canonical_suffix() {
        assert_eq!(derive_name(Path::new("Ubuntu-ex.tar")), "Ubuntu");
        assert_eq!(derive_name(&archive_path("kali-linux", "/exports")), "kali-linux");
    }

    #[test]
    fn test_derive_name_other_extension() {
        assert_eq!(derive_name(Path::new("/backups/Alpine.tar")), "Alpine");
        assert_eq!(derive_name(Path::new("Fedora.tar.gz")), "Fedora.tar");
    }

    #[test]
    fn test_derive_name_degenerate() {
        assert_eq!(derive_name(Path::new("-ex.tar")), "");
        assert_eq!(derive_name(Path::new("/")), "");
    }

    #[test]
    fn test_list_archives_requires_root() {
        let err = list_archives("").unwrap_err();
        assert!(matches!(err, WslError::Validation { field: "export_root" }));
    }

    #[test]
    fn test_list_archives_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Ubuntu-ex.tar"), b"tar").unwrap();
        fs::write(dir.path().join("Debian-ex.tar"), b"tarball").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(dir.path().join("Alpine.tar"), b"").unwrap();
        fs::create_dir(dir.path().join("Nested-ex.tar")).unwrap();

        let archives = list_archives(dir.path().to_str().unwrap()).unwrap();
        let names: Vec<&str> = archives.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Debian", "Ubuntu"]);
        assert_eq!(archives[0].size, 7);
        assert!(archives[0].modified.is_some());
    }

    #[test]
    fn test_list_archives_no_match_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), b"").unwrap();
        let archives = list_archives(dir.path().to_str().unwrap()).unwrap();
        assert!(archives.is_empty());
    }

    #[test]
    fn test_list_archives_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = list_archives(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, WslError::Io { .. }));
    }
}
