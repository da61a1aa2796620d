//! Relocate module: move a distro's storage to the configured import path
//!
//! Runs shutdown → export → unregister → import. Nothing is rolled back
//! when a step fails, so the result view spells out what state the distro
//! was left in.

use crate::app::Action;
use crate::config::Config;
use crate::error::RelocateStep;
use crate::modules::picker::DistroPicker;
use crate::ui::theme::Theme;
use crate::ui::widgets;
use crate::ui::ModuleTab;
use crate::wsl::archive;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocatePopup {
    None,
    Confirm { name: String },
}

/// Result of the last relocate attempt, for the step view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocateOutcome {
    pub name: String,
    /// None when every step succeeded
    pub failed_at: Option<RelocateStep>,
}

pub struct RelocateState {
    pub picker: DistroPicker,
    pub popup: RelocatePopup,
    pub last: Option<RelocateOutcome>,
}

impl RelocateState {
    pub fn new() -> Self {
        Self {
            picker: DistroPicker::new(),
            popup: RelocatePopup::None,
            last: None,
        }
    }

    pub fn has_popup(&self) -> bool {
        self.popup != RelocatePopup::None
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if let RelocatePopup::Confirm { name } = &self.popup {
            let name = name.clone();
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.popup = RelocatePopup::None;
                    Some(Action::Relocate(name))
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.popup = RelocatePopup::None;
                    None
                }
                _ => None,
            };
        }

        if self.picker.handle_nav(key) {
            return None;
        }

        match key.code {
            KeyCode::Char('r') => Some(Action::RefreshInstalled(ModuleTab::Relocate)),
            KeyCode::Enter | KeyCode::Char('m') => {
                if let Some(name) = self.picker.selected_name() {
                    self.popup = RelocatePopup::Confirm {
                        name: name.to_string(),
                    };
                }
                None
            }
            _ => None,
        }
    }
}

/// What a failed relocate left behind
pub fn partial_state_note(step: RelocateStep, name: &str, export_path: &str) -> String {
    let tar = archive::archive_path(name, export_path);
    match step {
        RelocateStep::Shutdown => "Nothing was changed.".to_string(),
        RelocateStep::Export => format!("{} is still registered at its old location.", name),
        RelocateStep::Unregister => format!(
            "{} is still registered; the archive {} was written and kept.",
            name,
            tar.display()
        ),
        RelocateStep::Import => format!(
            "{} was unregistered. Import {} from the Archives tab to restore it.",
            name,
            tar.display()
        ),
    }
}

pub fn render(frame: &mut Frame, state: &RelocateState, config: &Config, theme: &Theme, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    let path_span = |p: &str| {
        if p.is_empty() {
            Span::styled("not set (see Settings)".to_string(), theme.warning())
        } else {
            Span::styled(p.to_string(), theme.text())
        }
    };
    let header = Paragraph::new(vec![
        Line::styled(" Move a distro", theme.title()),
        Line::from(vec![Span::styled(" Export to:  ", theme.text_dim()), path_span(&config.export_path)]),
        Line::from(vec![Span::styled(" Import to:  ", theme.text_dim()), path_span(&config.import_path)]),
    ])
    .style(theme.block_style());
    frame.render_widget(header, chunks[0]);

    let body = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(chunks[1]);

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
        body[0],
    );

    render_steps(frame, state, config, theme, body[1]);

    let hints = widgets::key_hints(&[("Enter", "move"), ("r", "refresh"), ("j/k", "move cursor")], theme);
    frame.render_widget(Paragraph::new(hints).style(theme.block_style()), chunks[2]);

    if let RelocatePopup::Confirm { name } = &state.popup {
        let tar = archive::archive_path(name, &config.export_path);
        let dest = archive::install_dir(name, &config.import_path);
        widgets::render_confirm_popup(
            frame,
            "Move distro",
            vec![
                Line::from(vec![
                    Span::styled("Move ", theme.text()),
                    Span::styled(name.clone(), theme.title()),
                    Span::styled("?", theme.text()),
                ]),
                Line::raw(""),
                Line::styled(format!("archive: {}", tar.display()), theme.text_dim()),
                Line::styled(format!("new home: {}", dest.display()), theme.text_dim()),
                Line::raw(""),
                Line::styled("All running distros will be shut down.", theme.warning()),
            ],
            theme,
            area,
        );
    }
}

fn render_steps(frame: &mut Frame, state: &RelocateState, config: &Config, theme: &Theme, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .title(" Steps ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let mut lines = Vec::new();
    let failed_at = state.last.as_ref().and_then(|o| o.failed_at);
    let failed_idx = failed_at.and_then(|f| RelocateStep::all().iter().position(|s| *s == f));

    for (i, step) in RelocateStep::all().iter().enumerate() {
        let (mark, style) = match (&state.last, failed_idx) {
            (None, _) => ("·", theme.text_dim()),
            (Some(_), None) => ("✓", theme.success()),
            (Some(_), Some(f)) if i < f => ("✓", theme.success()),
            (Some(_), Some(f)) if i == f => ("✗", theme.error()),
            (Some(_), Some(_)) => ("-", theme.text_dim()),
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", mark), style),
            Span::styled(format!("{}. wsl --{}", i + 1, step.as_str()), theme.text()),
        ]));
    }

    if let Some(outcome) = &state.last {
        lines.push(Line::raw(""));
        match outcome.failed_at {
            None => lines.push(Line::styled(
                format!(" {} moved.", outcome.name),
                theme.success(),
            )),
            Some(step) => {
                lines.push(Line::styled(
                    format!(" {} failed at {}.", outcome.name, step),
                    theme.error(),
                ));
                lines.push(Line::styled(
                    format!(" {}", partial_state_note(step, &outcome.name, &config.export_path)),
                    theme.text(),
                ));
            }
        }
    }

    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_confirm_then_relocate() {
        let mut state = RelocateState::new();
        state.picker.set(vec!["Ubuntu".into()]);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(
            state.popup,
            RelocatePopup::Confirm {
                name: "Ubuntu".into()
            }
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char('y'))),
            Some(Action::Relocate("Ubuntu".into()))
        );
    }

    #[test]
    fn test_decline() {
        let mut state = RelocateState::new();
        state.picker.set(vec!["Ubuntu".into()]);
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.handle_key(key(KeyCode::Char('n'))), None);
        assert!(!state.has_popup());
    }

    #[test]
    fn test_partial_state_note_mentions_archive() {
        let note = partial_state_note(RelocateStep::Import, "Ubuntu", "/exports");
        assert!(note.contains("unregistered"));
        assert!(note.contains("Ubuntu-ex.tar"));
        assert_eq!(
            partial_state_note(RelocateStep::Shutdown, "Ubuntu", "/exports"),
            "Nothing was changed."
        );
    }
}
