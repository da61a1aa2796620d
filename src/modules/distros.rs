//! Distros module: run, export, delete and shut down installed distros
//!
//! Delete is behind a y/n popup; the orchestrator refuses to unregister
//! without that answer.

use crate::app::Action;
use crate::modules::picker::DistroPicker;
use crate::ui::theme::Theme;
use crate::ui::widgets;
use crate::ui::ModuleTab;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistrosPopup {
    None,
    ConfirmDelete { name: String },
}

pub struct DistrosState {
    pub picker: DistroPicker,
    pub popup: DistrosPopup,
}

impl DistrosState {
    pub fn new() -> Self {
        Self {
            picker: DistroPicker::new(),
            popup: DistrosPopup::None,
        }
    }

    pub fn has_popup(&self) -> bool {
        self.popup != DistrosPopup::None
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if let DistrosPopup::ConfirmDelete { name } = &self.popup {
            let name = name.clone();
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.popup = DistrosPopup::None;
                    Some(Action::Delete(name))
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.popup = DistrosPopup::None;
                    None
                }
                _ => None,
            };
        }

        if self.picker.handle_nav(key) {
            return None;
        }

        let selected = self.picker.selected_name().map(str::to_string);
        match key.code {
            KeyCode::Char('r') => Some(Action::RefreshInstalled(ModuleTab::Distros)),
            KeyCode::Char('s') => Some(Action::Shutdown),
            KeyCode::Enter => selected.map(Action::Run),
            KeyCode::Char('e') => selected.map(Action::Export),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(name) = selected {
                    self.popup = DistrosPopup::ConfirmDelete { name };
                }
                None
            }
            _ => None,
        }
    }
}

pub fn render(frame: &mut Frame, state: &DistrosState, export_path: &str, theme: &Theme, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    let export_span = if export_path.is_empty() {
        Span::styled("not set (see Settings)", theme.warning())
    } else {
        Span::styled(export_path.to_string(), theme.text())
    };
    let header = Paragraph::new(vec![
        Line::styled(" Installed distros", theme.title()),
        Line::from(vec![Span::styled(" Export to: ", theme.text_dim()), export_span]),
    ])
    .style(theme.block_style());
    frame.render_widget(header, chunks[0]);

    let empty = match (&state.picker.load_error, state.picker.loaded) {
        (Some(err), _) => format!("Could not list distros: {}", err),
        (None, false) => "Press r to list installed distros".to_string(),
        (None, true) => "No distros installed".to_string(),
    };
    widgets::render_name_list(
        frame,
        "Installed",
        &state.picker.names,
        state.picker.selected,
        &empty,
        theme,
        chunks[1],
    );

    let hints = widgets::key_hints(
        &[
            ("Enter", "run"),
            ("e", "export"),
            ("d", "delete"),
            ("s", "shutdown all"),
            ("r", "refresh"),
        ],
        theme,
    );
    frame.render_widget(Paragraph::new(hints).style(theme.block_style()), chunks[2]);

    if let DistrosPopup::ConfirmDelete { name } = &state.popup {
        widgets::render_confirm_popup(
            frame,
            "Delete distro",
            vec![
                Line::from(vec![
                    Span::styled("Unregister ", theme.text()),
                    Span::styled(name.clone(), theme.title()),
                    Span::styled("?", theme.text()),
                ]),
                Line::raw(""),
                Line::styled("Its filesystem is deleted and cannot be recovered", theme.error()),
                Line::styled("unless you exported it first.", theme.error()),
            ],
            theme,
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with(names: &[&str]) -> DistrosState {
        let mut state = DistrosState::new();
        state.picker.set(names.iter().map(|s| s.to_string()).collect());
        state
    }

    #[test]
    fn test_delete_needs_yes() {
        let mut state = state_with(&["Ubuntu"]);
        assert_eq!(state.handle_key(key(KeyCode::Char('d'))), None);
        assert!(state.has_popup());
        assert_eq!(
            state.handle_key(key(KeyCode::Char('y'))),
            Some(Action::Delete("Ubuntu".into()))
        );
        assert!(!state.has_popup());
    }

    #[test]
    fn test_delete_declined() {
        let mut state = state_with(&["Ubuntu"]);
        state.handle_key(key(KeyCode::Char('d')));
        assert_eq!(state.handle_key(key(KeyCode::Esc)), None);
        assert!(!state.has_popup());
    }

    #[test]
    fn test_popup_swallows_other_keys() {
        let mut state = state_with(&["Ubuntu"]);
        state.handle_key(key(KeyCode::Char('d')));
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert!(state.has_popup());
    }

    #[test]
    fn test_run_and_export() {
        let mut state = state_with(&["Ubuntu", "Debian"]);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), Some(Action::Run("Ubuntu".into())));
        state.handle_key(key(KeyCode::Char('j')));
        assert_eq!(
            state.handle_key(key(KeyCode::Char('e'))),
            Some(Action::Export("Debian".into()))
        );
    }

    #[test]
    fn test_empty_list_ignores_actions() {
        let mut state = state_with(&[]);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(state.handle_key(key(KeyCode::Char('d'))), None);
        assert!(!state.has_popup());
    }
}
