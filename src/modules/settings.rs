//! Settings module: edit and save the export/import paths

use crate::app::Action;
use crate::config::Config;
use crate::ui::theme::Theme;
use crate::ui::widgets;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    ExportPath,
    ImportPath,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[SettingsField::ExportPath, SettingsField::ImportPath]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::ExportPath => "Export path",
            SettingsField::ImportPath => "Import path",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            SettingsField::ExportPath => "Archives are written here as <distro>-ex.tar",
            SettingsField::ImportPath => "Moved distros live in <import path>\\<distro>",
        }
    }

    fn value<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            SettingsField::ExportPath => &config.export_path,
            SettingsField::ImportPath => &config.import_path,
        }
    }
}

pub struct SettingsState {
    pub selected: usize,
    pub editing: bool,
    pub edit_buffer: String,
}

impl SettingsState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            editing: false,
            edit_buffer: String::new(),
        }
    }

    fn field(&self) -> SettingsField {
        SettingsField::all()[self.selected.min(SettingsField::all().len() - 1)]
    }

    /// Keys while not editing. Enter opens the selected field for editing.
    pub fn handle_key(&mut self, key: KeyEvent, config: &Config) -> Option<Action> {
        if self.editing {
            return self.handle_edit_key(key, config);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected < SettingsField::all().len() - 1 {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                self.editing = true;
                self.edit_buffer = self.field().value(config).to_string();
            }
            _ => {}
        }
        None
    }

    fn handle_edit_key(&mut self, key: KeyEvent, config: &Config) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.editing = false;
                self.edit_buffer.clear();
                None
            }
            KeyCode::Enter => {
                let value = self.edit_buffer.trim().to_string();
                self.editing = false;
                self.edit_buffer.clear();

                let (export_path, import_path) = match self.field() {
                    SettingsField::ExportPath => (value, config.import_path.clone()),
                    SettingsField::ImportPath => (config.export_path.clone(), value),
                };
                Some(Action::SaveConfig {
                    export_path,
                    import_path,
                })
            }
            KeyCode::Backspace => {
                self.edit_buffer.pop();
                None
            }
            KeyCode::Char(c) => {
                self.edit_buffer.push(c);
                None
            }
            _ => None,
        }
    }
}

pub fn render(frame: &mut Frame, state: &SettingsState, config: &Config, theme: &Theme, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .title(" Settings ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Min(6), Constraint::Length(4)]).split(inner);

    let mut lines = vec![Line::raw("")];
    for (i, field) in SettingsField::all().iter().enumerate() {
        let is_selected = i == state.selected;
        let marker = if is_selected { " ▸ " } else { "   " };
        let label_style = if is_selected {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            theme.text()
        };

        let value_span = if is_selected && state.editing {
            Span::styled(format!("{}▏", state.edit_buffer), theme.selected())
        } else {
            let value = field.value(config);
            if value.is_empty() {
                Span::styled("(not set)", theme.text_dim())
            } else {
                Span::styled(value.to_string(), theme.text())
            }
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(format!("{:<13}", field.label()), label_style),
            value_span,
        ]));
        lines.push(Line::styled(format!("     {}", field.help()), theme.text_dim()));
        lines.push(Line::raw(""));
    }

    frame.render_widget(
        Paragraph::new(lines).style(theme.block_style()).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let config_path = Config::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|e| e.to_string());
    let footer = vec![
        Line::from(vec![
            Span::styled(" Config file: ", theme.text_dim()),
            Span::styled(config_path, theme.text()),
        ]),
        Line::raw(""),
        if state.editing {
            widgets::key_hints(&[("Enter", "save"), ("Esc", "cancel")], theme)
        } else {
            widgets::key_hints(&[("Enter", "edit"), ("j/k", "select")], theme)
        },
    ];
    frame.render_widget(Paragraph::new(footer).style(theme.block_style()), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(state: &mut SettingsState, config: &Config, s: &str) {
        for c in s.chars() {
            state.handle_key(key(KeyCode::Char(c)), config);
        }
    }

    #[test]
    fn test_edit_import_path_keeps_export() {
        let config = Config {
            export_path: "D:\\exports".into(),
            import_path: String::new(),
        };
        let mut state = SettingsState::new();
        state.handle_key(key(KeyCode::Down), &config);
        state.handle_key(key(KeyCode::Enter), &config);
        assert!(state.editing);
        type_str(&mut state, &config, "E:\\wsl");
        let action = state.handle_key(key(KeyCode::Enter), &config);
        assert_eq!(
            action,
            Some(Action::SaveConfig {
                export_path: "D:\\exports".into(),
                import_path: "E:\\wsl".into(),
            })
        );
        assert!(!state.editing);
    }

    #[test]
    fn test_edit_starts_from_current_value() {
        let config = Config {
            export_path: "C:\\old".into(),
            import_path: String::new(),
        };
        let mut state = SettingsState::new();
        state.handle_key(key(KeyCode::Enter), &config);
        assert_eq!(state.edit_buffer, "C:\\old");
        state.handle_key(key(KeyCode::Backspace), &config);
        assert_eq!(state.edit_buffer, "C:\\ol");
    }

    #[test]
    fn test_escape_discards_edit() {
        let config = Config::default();
        let mut state = SettingsState::new();
        state.handle_key(key(KeyCode::Enter), &config);
        type_str(&mut state, &config, "junk");
        assert_eq!(state.handle_key(key(KeyCode::Esc), &config), None);
        assert!(!state.editing);
        assert!(state.edit_buffer.is_empty());
    }

    #[test]
    fn test_while_editing_q_is_text() {
        let config = Config::default();
        let mut state = SettingsState::new();
        state.handle_key(key(KeyCode::Enter), &config);
        state.handle_key(key(KeyCode::Char('q')), &config);
        assert_eq!(state.edit_buffer, "q");
    }
}
