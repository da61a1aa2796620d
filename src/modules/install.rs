//! Install module: browse the online catalog and install a distro

use crate::app::Action;
use crate::modules::picker::DistroPicker;
use crate::ui::theme::Theme;
use crate::ui::widgets;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

pub struct InstallState {
    pub picker: DistroPicker,
}

impl InstallState {
    pub fn new() -> Self {
        Self {
            picker: DistroPicker::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.picker.handle_nav(key) {
            return None;
        }
        match key.code {
            KeyCode::Char('r') => Some(Action::RefreshOnline),
            KeyCode::Enter | KeyCode::Char('i') => {
                self.picker.selected_name().map(|n| Action::Install(n.to_string()))
            }
            _ => None,
        }
    }
}

pub fn render(frame: &mut Frame, state: &InstallState, theme: &Theme, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    let header = Paragraph::new(vec![
        Line::styled(" Install a distro", theme.title()),
        Line::styled(" From `wsl --list --online`", theme.text_dim()),
    ])
    .style(theme.block_style());
    frame.render_widget(header, chunks[0]);

    let empty = match (&state.picker.load_error, state.picker.loaded) {
        (Some(err), _) => format!("Could not fetch catalog: {}", err),
        (None, false) => "Press r to fetch the online catalog".to_string(),
        (None, true) => "The catalog is empty".to_string(),
    };
    widgets::render_name_list(
        frame,
        "Online",
        &state.picker.names,
        state.picker.selected,
        &empty,
        theme,
        chunks[1],
    );

    let hints = widgets::key_hints(&[("Enter", "install"), ("r", "refresh"), ("j/k", "move")], theme);
    frame.render_widget(Paragraph::new(hints).style(theme.block_style()), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_installs_selected() {
        let mut state = InstallState::new();
        state.picker.set(vec!["Ubuntu".into(), "Debian".into()]);
        state.handle_key(key(KeyCode::Down));
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(Action::Install("Debian".into()))
        );
    }

    #[test]
    fn test_enter_without_selection_does_nothing() {
        let mut state = InstallState::new();
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_refresh() {
        let mut state = InstallState::new();
        assert_eq!(state.handle_key(key(KeyCode::Char('r'))), Some(Action::RefreshOnline));
    }
}
