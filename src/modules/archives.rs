//! Archives module: re-import `<distro>-ex.tar` files from the export path

use crate::app::Action;
use crate::ui::theme::Theme;
use crate::ui::widgets;
use crate::wsl::{archive, Archive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchivesPopup {
    None,
    ConfirmImport { path: PathBuf, name: String },
}

pub struct ArchivesState {
    pub archives: Vec<Archive>,
    pub selected: usize,
    pub loaded: bool,
    pub load_error: Option<String>,
    pub popup: ArchivesPopup,
}

impl ArchivesState {
    pub fn new() -> Self {
        Self {
            archives: Vec::new(),
            selected: 0,
            loaded: false,
            load_error: None,
            popup: ArchivesPopup::None,
        }
    }

    pub fn has_popup(&self) -> bool {
        self.popup != ArchivesPopup::None
    }

    pub fn set(&mut self, archives: Vec<Archive>) {
        self.archives = archives;
        self.loaded = true;
        self.load_error = None;
        self.selected = self.selected.min(self.archives.len().saturating_sub(1));
    }

    pub fn fail(&mut self, message: String) {
        self.archives.clear();
        self.selected = 0;
        self.loaded = true;
        self.load_error = Some(message);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if let ArchivesPopup::ConfirmImport { path, .. } = &self.popup {
            let path = path.clone();
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.popup = ArchivesPopup::None;
                    Some(Action::ImportArchive(path))
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.popup = ArchivesPopup::None;
                    None
                }
                _ => None,
            };
        }

        let count = self.archives.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if count > 0 && self.selected < count - 1 {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Char('r') => Some(Action::RefreshArchives),
            KeyCode::Enter | KeyCode::Char('i') => {
                if let Some(a) = self.archives.get(self.selected) {
                    self.popup = ArchivesPopup::ConfirmImport {
                        path: a.path.clone(),
                        name: a.name.clone(),
                    };
                }
                None
            }
            _ => None,
        }
    }
}

pub fn render(
    frame: &mut Frame,
    state: &ArchivesState,
    export_path: &str,
    import_path: &str,
    theme: &Theme,
    area: Rect,
) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    let header = Paragraph::new(vec![
        Line::styled(" Import from archive", theme.title()),
        Line::from(vec![
            Span::styled(" Looking in: ", theme.text_dim()),
            if export_path.is_empty() {
                Span::styled("export path not set (see Settings)", theme.warning())
            } else {
                Span::styled(export_path.to_string(), theme.text())
            },
        ]),
    ])
    .style(theme.block_style());
    frame.render_widget(header, chunks[0]);

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" Archives ({}) ", state.archives.len()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    if state.archives.is_empty() {
        let msg = match (&state.load_error, state.loaded) {
            (Some(err), _) => format!("Could not read archives: {}", err),
            (None, false) => "Press r to scan the export path".to_string(),
            (None, true) => format!("No *{} files found", archive::ARCHIVE_SUFFIX),
        };
        let placeholder = Paragraph::new(vec![Line::raw(""), Line::styled(msg, theme.text_dim())])
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(placeholder, chunks[1]);
    } else {
        let header_row = Row::new(vec!["Distro", "Size", "Modified", "File"])
            .style(theme.text_dim().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = state
            .archives
            .iter()
            .map(|a| {
                let file = a
                    .path
                    .file_name()
                    .map(|f| f.to_string_lossy().to_string())
                    .unwrap_or_default();
                Row::new(vec![
                    Cell::from(a.name.clone()),
                    Cell::from(a.formatted_size()),
                    Cell::from(a.formatted_date()),
                    Cell::from(file),
                ])
                .style(theme.text())
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(10),
                Constraint::Length(16),
                Constraint::Min(20),
            ],
        )
        .header(header_row)
        .block(block)
        .highlight_style(theme.selected())
        .highlight_symbol("▸ ");

        let mut table_state = TableState::default();
        table_state.select(Some(state.selected.min(state.archives.len() - 1)));
        frame.render_stateful_widget(table, chunks[1], &mut table_state);
    }

    let hints = widgets::key_hints(&[("Enter", "import"), ("r", "rescan"), ("j/k", "move")], theme);
    frame.render_widget(Paragraph::new(hints).style(theme.block_style()), chunks[2]);

    if let ArchivesPopup::ConfirmImport { path, name } = &state.popup {
        let dest = archive::install_dir(name, import_path);
        widgets::render_confirm_popup(
            frame,
            "Import archive",
            vec![
                Line::from(vec![
                    Span::styled("Import as ", theme.text()),
                    Span::styled(name.clone(), theme.title()),
                    Span::styled("?", theme.text()),
                ]),
                Line::raw(""),
                Line::styled(format!("from: {}", path.display()), theme.text_dim()),
                Line::styled(format!("into: {}", dest.display()), theme.text_dim()),
                Line::raw(""),
                Line::styled("Fails if a distro with this name is still registered.", theme.warning()),
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

    fn archive(name: &str) -> Archive {
        Archive {
            path: archive::archive_path(name, "/exports"),
            name: name.to_string(),
            size: 0,
            modified: None,
        }
    }

    #[test]
    fn test_import_needs_confirmation() {
        let mut state = ArchivesState::new();
        state.set(vec![archive("Debian"), archive("Ubuntu")]);
        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(
            state.handle_key(key(KeyCode::Char('y'))),
            Some(Action::ImportArchive(archive::archive_path("Ubuntu", "/exports")))
        );
    }

    #[test]
    fn test_fail_resets() {
        let mut state = ArchivesState::new();
        state.set(vec![archive("Debian")]);
        state.fail("missing value".into());
        assert!(state.archives.is_empty());
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert!(!state.has_popup());
    }
}
