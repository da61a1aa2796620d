//! One function per user-facing action
//!
//! Every operation validates its inputs before anything is spawned and
//! re-invokes the tool on each call; no listing is cached here.

use crate::error::{RelocateStep, WslError, WslResult};
use crate::wsl::archive::{self, Archive};
use crate::wsl::listing;
use crate::wsl::runner::{session_command_line, CommandOutput, CommandRunner, SessionLauncher};
use std::path::{Path, PathBuf};

/// Explicit user answer required before a distro is unregistered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Where a relocated distro ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocateReport {
    pub archive: PathBuf,
    pub install_dir: PathBuf,
}

/// Orchestrates wsl invocations over a runner
pub struct Wsl<R> {
    runner: R,
}

impl<R> Wsl<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: CommandRunner> Wsl<R> {
    fn invoke(&self, args: &[&str]) -> WslResult<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run(&args)
    }

    /// `wsl --list --online`
    pub fn list_online(&self) -> WslResult<Vec<String>> {
        let output = self.invoke(&["--list", "--online"])?;
        let distros = listing::parse_online(&output.stdout);
        tracing::debug!(count = distros.len(), "online catalog parsed");
        Ok(distros)
    }

    /// `wsl --list`
    pub fn list_installed(&self) -> WslResult<Vec<String>> {
        let output = self.invoke(&["--list"])?;
        let distros = listing::parse_installed(&output.stdout);
        tracing::debug!(count = distros.len(), "installed list parsed");
        Ok(distros)
    }

    pub fn list_archives(&self, export_root: &str) -> WslResult<Vec<Archive>> {
        archive::list_archives(export_root)
    }

    pub fn install(&self, name: &str) -> WslResult<()> {
        require("name", name)?;
        self.invoke(&["--install", "-d", name])?;
        tracing::info!(distro = name, "install started");
        Ok(())
    }

    /// Stop every running distro
    pub fn shutdown(&self) -> WslResult<()> {
        self.invoke(&["--shutdown"])?;
        Ok(())
    }

    /// Export `name` to `<export_root>/<name>-ex.tar` and return that path
    pub fn export(&self, name: &str, export_root: &str) -> WslResult<PathBuf> {
        require("name", name)?;
        require("export_root", export_root)?;
        let tar = archive::archive_path(name, export_root);
        self.invoke(&["--export", name, &tar.to_string_lossy()])?;
        tracing::info!(distro = name, archive = %tar.display(), "exported");
        Ok(tar)
    }

    /// Import `archive` as `name` into `<import_root>/<name>`
    pub fn import(&self, name: &str, import_root: &str, archive: &Path) -> WslResult<PathBuf> {
        require("name", name)?;
        require("import_root", import_root)?;
        require("archive", &archive.to_string_lossy())?;
        let dest = archive::install_dir(name, import_root);
        self.invoke(&[
            "--import",
            name,
            &dest.to_string_lossy(),
            &archive.to_string_lossy(),
        ])?;
        tracing::info!(distro = name, dest = %dest.display(), "imported");
        Ok(dest)
    }

    /// Unregister `name`. Removes the distro and its storage.
    pub fn delete(&self, name: &str, confirmation: Confirmation) -> WslResult<()> {
        require("name", name)?;
        if confirmation != Confirmation::Confirmed {
            return Err(WslError::validation("confirmation"));
        }
        self.invoke(&["--unregister", name])?;
        tracing::info!(distro = name, "unregistered");
        Ok(())
    }

    /// Shutdown, export, unregister, import.
    ///
    /// Stops at the first failing step; steps already done stay done. If
    /// the unregister fails, the distro is still registered and the archive
    /// is on disk.
    pub fn relocate(
        &self,
        name: &str,
        export_root: &str,
        import_root: &str,
    ) -> WslResult<RelocateReport> {
        require("name", name)?;
        require("export_root", export_root)?;
        require("import_root", import_root)?;

        let tar = archive::archive_path(name, export_root);
        let dest = archive::install_dir(name, import_root);
        let tar_str = tar.to_string_lossy();
        let dest_str = dest.to_string_lossy();

        self.step(RelocateStep::Shutdown, &["--shutdown"])?;
        self.step(RelocateStep::Export, &["--export", name, &tar_str])?;
        self.step(RelocateStep::Unregister, &["--unregister", name])?;
        self.step(RelocateStep::Import, &["--import", name, &dest_str, &tar_str])?;

        tracing::info!(distro = name, dest = %dest.display(), "relocated");
        Ok(RelocateReport {
            archive: tar,
            install_dir: dest,
        })
    }

    fn step(&self, step: RelocateStep, args: &[&str]) -> WslResult<()> {
        tracing::info!(%step, "relocate step");
        self.invoke(args).map(|_| ()).map_err(|e| WslError::Relocate {
            step,
            source: Box::new(e),
        })
    }

    /// Import an existing archive without touching any registered distro.
    /// Returns the distro name read from the archive file name.
    pub fn relocate_from_archive(&self, archive: &Path, import_root: &str) -> WslResult<String> {
        let name = archive::derive_name(archive);
        require("archive", &name)?;
        require("import_root", import_root)?;
        self.import(&name, import_root, archive)?;
        Ok(name)
    }
}

impl<R: CommandRunner + SessionLauncher> Wsl<R> {
    /// Open an interactive terminal in `name`. Does not wait for it.
    pub fn run(&self, name: &str) -> WslResult<()> {
        require("name", name)?;
        let line = session_command_line(self.runner.program(), name);
        self.runner.run_detached(&line)
    }
}

fn require(field: &'static str, value: &str) -> WslResult<()> {
    if value.is_empty() {
        Err(WslError::validation(field))
    } else {
        Ok(())
    }
}
