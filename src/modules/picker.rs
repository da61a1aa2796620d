//! Selection state for a freshly fetched list of names

use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Default)]
pub struct DistroPicker {
    pub names: Vec<String>,
    pub selected: usize,
    /// A fetch has completed (successfully or not) at least once
    pub loaded: bool,
    pub load_error: Option<String>,
}

impl DistroPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a fresh fetch, keeping the cursor in range
    pub fn set(&mut self, names: Vec<String>) {
        self.names = names;
        self.loaded = true;
        self.load_error = None;
        self.selected = self.selected.min(self.names.len().saturating_sub(1));
    }

    /// Record a failed fetch. The previous list is dropped so a stale
    /// entry can't be acted on.
    pub fn fail(&mut self, message: String) {
        self.names.clear();
        self.selected = 0;
        self.loaded = true;
        self.load_error = Some(message);
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.names.get(self.selected).map(String::as_str)
    }

    /// j/k, arrows, g/G. Returns true if the key moved the cursor.
    pub fn handle_nav(&mut self, key: KeyEvent) -> bool {
        let count = self.names.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if count > 0 && self.selected < count - 1 {
                    self.selected += 1;
                }
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected = 0;
                true
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = count.saturating_sub(1);
                true
            }
            _ => false,
        }
    }
}
