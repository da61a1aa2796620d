//! Application state and event handling for wslmate
//!
//! Modules turn keys into [`Action`]s. Blocking actions are parked in
//! `pending` behind a "working" popup and run on the next loop turn, after
//! the popup has been drawn.

use crate::config::Config;
use crate::error::WslError;
use crate::modules::archives::ArchivesState;
use crate::modules::distros::DistrosState;
use crate::modules::install::InstallState;
use crate::modules::relocate::{self, RelocateOutcome, RelocateState};
use crate::modules::settings::SettingsState;
use crate::types::{expire_flash, FlashMessage};
use crate::ui::{ModuleTab, Theme};
use crate::wsl::{Confirmation, Wsl, WslCli};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

/// Everything the user can ask the tool to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RefreshOnline,
    /// Refresh the installed list shown on the given tab
    RefreshInstalled(ModuleTab),
    RefreshArchives,
    Install(String),
    Run(String),
    Export(String),
    /// Only produced after the user answered yes
    Delete(String),
    Shutdown,
    Relocate(String),
    ImportArchive(PathBuf),
    SaveConfig {
        export_path: String,
        import_path: String,
    },
}

impl Action {
    /// Text for the working popup
    pub fn describe(&self) -> String {
        match self {
            Action::RefreshOnline => "Fetching online distros…".to_string(),
            Action::RefreshInstalled(_) => "Listing installed distros…".to_string(),
            Action::RefreshArchives => "Scanning archives…".to_string(),
            Action::Install(name) => format!("Installing {}…", name),
            Action::Run(name) => format!("Opening {}…", name),
            Action::Export(name) => format!("Exporting {}…", name),
            Action::Delete(name) => format!("Unregistering {}…", name),
            Action::Shutdown => "Shutting down all distros…".to_string(),
            Action::Relocate(name) => format!("Moving {} (this can take a while)…", name),
            Action::ImportArchive(path) => format!("Importing {}…", path.display()),
            Action::SaveConfig { .. } => "Saving configuration…".to_string(),
        }
    }

    /// Whether the action waits on the tool
    fn blocks(&self) -> bool {
        !matches!(self, Action::Run(_) | Action::SaveConfig { .. })
    }
}

#[derive(Debug, Clone)]
pub enum PopupState {
    None,
    Error { title: String, message: String },
    Working { message: String },
}

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub active_tab: ModuleTab,
    pub config: Config,
    pub theme: Theme,
    pub popup: PopupState,
    pub flash_message: Option<FlashMessage>,
    pending: Option<Action>,
    wsl: Wsl<WslCli>,

    // Module states
    pub install: InstallState,
    pub distros: DistrosState,
    pub relocate: RelocateState,
    pub archives: ArchivesState,
    pub settings: SettingsState,
}

impl App {
    pub fn new(config: Config, wsl: Wsl<WslCli>) -> Self {
        let mut app = Self {
            should_quit: false,
            active_tab: ModuleTab::Install,
            config,
            theme: Theme::default(),
            popup: PopupState::None,
            flash_message: None,
            pending: None,
            wsl,
            install: InstallState::new(),
            distros: DistrosState::new(),
            relocate: RelocateState::new(),
            archives: ArchivesState::new(),
            settings: SettingsState::new(),
        };
        // Fetch the catalog for the landing tab right away
        app.switch_tab(ModuleTab::Install);
        app
    }

    /// Name of the tool binary, for display
    pub fn tool(&self) -> &str {
        use crate::wsl::runner::CommandRunner;
        self.wsl.runner().program()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        expire_flash(&mut self.flash_message);

        // App-level popup handling
        match &self.popup {
            PopupState::Error { .. } => {
                if matches!(key.code, KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc) {
                    self.popup = PopupState::None;
                }
                return Ok(());
            }
            PopupState::Working { .. } => return Ok(()),
            PopupState::None => {}
        }

        // Module captures ALL keys when a popup or text field is open;
        // otherwise tab-switch keys and quit stay global
        if self.module_captures_all() || !is_global_key(&key) {
            if let Some(action) = self.module_key(key) {
                self.dispatch(action);
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.switch_tab(ModuleTab::Install),
            KeyCode::Char('2') => self.switch_tab(ModuleTab::Distros),
            KeyCode::Char('3') => self.switch_tab(ModuleTab::Relocate),
            KeyCode::Char('4') => self.switch_tab(ModuleTab::Archives),
            KeyCode::Char(',') => self.switch_tab(ModuleTab::Settings),
            KeyCode::Char('?') => self.switch_tab(ModuleTab::HelpAbout),
            _ => {}
        }
        Ok(())
    }

    fn module_captures_all(&self) -> bool {
        match self.active_tab {
            ModuleTab::Distros => self.distros.has_popup(),
            ModuleTab::Relocate => self.relocate.has_popup(),
            ModuleTab::Archives => self.archives.has_popup(),
            ModuleTab::Settings => self.settings.editing,
            ModuleTab::Install | ModuleTab::HelpAbout => false,
        }
    }

    fn module_key(&mut self, key: KeyEvent) -> Option<Action> {
        match self.active_tab {
            ModuleTab::Install => self.install.handle_key(key),
            ModuleTab::Distros => self.distros.handle_key(key),
            ModuleTab::Relocate => self.relocate.handle_key(key),
            ModuleTab::Archives => self.archives.handle_key(key),
            ModuleTab::Settings => self.settings.handle_key(key, &self.config),
            ModuleTab::HelpAbout => None,
        }
    }

    /// Activate a tab, loading its list on first visit
    pub fn switch_tab(&mut self, tab: ModuleTab) {
        self.active_tab = tab;
        let load = match tab {
            ModuleTab::Install if !self.install.picker.loaded => Some(Action::RefreshOnline),
            ModuleTab::Distros if !self.distros.picker.loaded => {
                Some(Action::RefreshInstalled(ModuleTab::Distros))
            }
            ModuleTab::Relocate if !self.relocate.picker.loaded => {
                Some(Action::RefreshInstalled(ModuleTab::Relocate))
            }
            ModuleTab::Archives if !self.archives.loaded && !self.config.export_path.is_empty() => {
                Some(Action::RefreshArchives)
            }
            _ => None,
        };
        if let Some(action) = load {
            self.dispatch(action);
        }
    }

    /// Run non-blocking actions now; park blocking ones behind a popup
    pub fn dispatch(&mut self, action: Action) {
        if action.blocks() {
            self.popup = PopupState::Working {
                message: action.describe(),
            };
            self.pending = Some(action);
        } else {
            self.execute(action);
        }
    }

    /// Run the parked action. Called by the main loop after drawing.
    pub fn run_pending(&mut self) {
        if let Some(action) = self.pending.take() {
            self.popup = PopupState::None;
            self.execute(action);
        }
    }

    fn execute(&mut self, action: Action) {
        tracing::info!(?action, "executing");
        match action {
            Action::RefreshOnline => match self.wsl.list_online() {
                Ok(names) => self.install.picker.set(names),
                Err(e) => {
                    self.install.picker.fail(e.to_string());
                    self.fail("Fetching online distros failed", e);
                }
            },
            Action::RefreshInstalled(tab) => {
                let result = self.wsl.list_installed();
                let picker = match tab {
                    ModuleTab::Relocate => &mut self.relocate.picker,
                    _ => &mut self.distros.picker,
                };
                match result {
                    Ok(names) => picker.set(names),
                    Err(e) => {
                        picker.fail(e.to_string());
                        self.fail("Listing installed distros failed", e);
                    }
                }
            }
            Action::RefreshArchives => match self.wsl.list_archives(&self.config.export_path) {
                Ok(archives) => self.archives.set(archives),
                Err(e) => {
                    self.archives.fail(e.to_string());
                    self.fail("Scanning archives failed", e);
                }
            },
            Action::Install(name) => match self.wsl.install(&name) {
                Ok(()) => {
                    self.flash(format!("Installation of {} has started", name));
                    self.mark_installed_stale();
                }
                Err(e) => self.fail(&format!("Installing {} failed", name), e),
            },
            Action::Run(name) => match self.wsl.run(&name) {
                Ok(()) => self.flash(format!("Opened a terminal for {}", name)),
                Err(e) => self.fail(&format!("Running {} failed", name), e),
            },
            Action::Export(name) => match self.wsl.export(&name, &self.config.export_path) {
                Ok(tar) => {
                    self.flash(format!("Exported {} to {}", name, tar.display()));
                    self.archives.loaded = false;
                }
                Err(e) => self.fail(&format!("Exporting {} failed", name), e),
            },
            Action::Delete(name) => match self.wsl.delete(&name, Confirmation::Confirmed) {
                Ok(()) => {
                    self.flash(format!("{} was unregistered", name));
                    self.mark_installed_stale();
                    self.dispatch(Action::RefreshInstalled(ModuleTab::Distros));
                }
                Err(e) => self.fail(&format!("Deleting {} failed", name), e),
            },
            Action::Shutdown => match self.wsl.shutdown() {
                Ok(()) => self.flash("All distros shut down".to_string()),
                Err(e) => self.fail("Shutdown failed", e),
            },
            Action::Relocate(name) => self.execute_relocate(name),
            Action::ImportArchive(path) => {
                match self.wsl.relocate_from_archive(&path, &self.config.import_path) {
                    Ok(name) => {
                        self.flash(format!("Imported {} into {}", name, self.config.import_path));
                        self.mark_installed_stale();
                    }
                    Err(e) => self.fail("Importing archive failed", e),
                }
            }
            Action::SaveConfig {
                export_path,
                import_path,
            } => {
                let mut next = self.config.clone();
                next.set_paths(&export_path, &import_path);
                match next.save() {
                    Ok(()) => {
                        self.config = next;
                        self.archives.loaded = false;
                        self.flash("Configuration saved".to_string());
                    }
                    Err(e) => self.fail("Saving configuration failed", e),
                }
            }
        }
    }

    fn execute_relocate(&mut self, name: String) {
        let result = self
            .wsl
            .relocate(&name, &self.config.export_path, &self.config.import_path);

        match result {
            Ok(report) => {
                self.relocate.last = Some(RelocateOutcome {
                    name: name.clone(),
                    failed_at: None,
                });
                self.flash(format!(
                    "Moved {} to {} (archive kept at {})",
                    name,
                    report.install_dir.display(),
                    report.archive.display()
                ));
                self.mark_installed_stale();
                self.archives.loaded = false;
            }
            Err(e) => {
                let title = format!("Moving {} failed", name);
                match e.failed_step() {
                    Some(step) => {
                        let note =
                            relocate::partial_state_note(step, &name, &self.config.export_path);
                        self.relocate.last = Some(RelocateOutcome {
                            name,
                            failed_at: Some(step),
                        });
                        self.mark_installed_stale();
                        tracing::error!(error = %e, %step, "relocate failed");
                        self.popup = PopupState::Error {
                            title,
                            message: format!("{}\n\n{}", e, note),
                        };
                    }
                    None => self.fail(&title, e),
                }
            }
        }
    }

    /// Installed lists reload on next visit
    fn mark_installed_stale(&mut self) {
        self.distros.picker.loaded = false;
        self.relocate.picker.loaded = false;
    }

    fn flash(&mut self, text: String) {
        self.flash_message = Some(FlashMessage::new(text, false));
    }

    fn fail(&mut self, title: &str, err: WslError) {
        tracing::error!(error = %err, "{}", title);
        self.popup = PopupState::Error {
            title: title.to_string(),
            message: err.to_string(),
        };
    }

    pub fn update_timers(&mut self) {
        expire_flash(&mut self.flash_message);
    }
}

fn is_global_key(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('1'..='4') | KeyCode::Char(',') | KeyCode::Char('?') | KeyCode::Char('q')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let wsl = Wsl::new(WslCli::new("wslmate-test-no-such-tool"));
        App::new(Config::default(), wsl)
    }

    #[test]
    fn test_startup_queues_catalog_fetch() {
        let app = app();
        assert!(app.has_pending());
        assert!(matches!(app.popup, PopupState::Working { .. }));
    }

    #[test]
    fn test_missing_tool_surfaces_error() {
        let mut app = app();
        app.run_pending();
        assert!(!app.has_pending());
        match &app.popup {
            PopupState::Error { title, message } => {
                assert_eq!(title, "Fetching online distros failed");
                assert!(message.contains("failed to start"));
            }
            other => panic!("expected error popup, got {:?}", other),
        }
        assert!(app.install.picker.load_error.is_some());
    }

    #[test]
    fn test_working_popup_swallows_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tab_switch_loads_once() {
        let mut app = app();
        app.run_pending();
        app.popup = PopupState::None;

        app.handle_key(key(KeyCode::Char('2'))).unwrap();
        assert_eq!(app.active_tab, ModuleTab::Distros);
        assert!(app.has_pending());
        app.run_pending();
        app.popup = PopupState::None;

        // already loaded (with an error), so no second fetch
        app.handle_key(key(KeyCode::Char('1'))).unwrap();
        app.handle_key(key(KeyCode::Char('2'))).unwrap();
        assert!(!app.has_pending());
    }

    #[test]
    fn test_archives_tab_without_export_path_does_not_scan() {
        let mut app = app();
        app.run_pending();
        app.popup = PopupState::None;
        app.handle_key(key(KeyCode::Char('4'))).unwrap();
        assert_eq!(app.active_tab, ModuleTab::Archives);
        assert!(!app.has_pending());
    }

    #[test]
    fn test_settings_editing_captures_global_keys() {
        let mut app = app();
        app.run_pending();
        app.popup = PopupState::None;
        app.handle_key(key(KeyCode::Char(','))).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        app.handle_key(key(KeyCode::Char('2'))).unwrap();
        assert!(!app.should_quit);
        assert_eq!(app.active_tab, ModuleTab::Settings);
        assert_eq!(app.settings.edit_buffer, "q2");
    }

    #[test]
    fn test_relocate_without_paths_is_validation_error() {
        let mut app = app();
        app.run_pending();
        app.popup = PopupState::None;
        app.dispatch(Action::Relocate("Ubuntu".into()));
        app.run_pending();
        match &app.popup {
            PopupState::Error { message, .. } => {
                assert_eq!(message, "missing required value: export_root");
            }
            other => panic!("expected error popup, got {:?}", other),
        }
        assert!(app.relocate.last.is_none());
    }

    #[test]
    fn test_error_popup_dismissed_with_enter() {
        let mut app = app();
        app.run_pending();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(matches!(app.popup, PopupState::None));
    }

    #[test]
    fn test_action_blocking() {
        assert!(Action::Relocate("x".into()).blocks());
        assert!(!Action::Run("x".into()).blocks());
        assert!(Action::Install("Debian".into()).describe().contains("Debian"));
    }
}
