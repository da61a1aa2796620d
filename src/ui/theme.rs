//! Theme definitions for wslmate
//!
//! One dark palette modeled on the Windows Terminal "Campbell" scheme,
//! plus a transparent fallback that uses the terminal's own colors
//! (picked automatically when NO_COLOR is set).

use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_dim: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    is_transparent: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

impl Theme {
    /// Campbell unless the user opted out of colors
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::transparent()
        } else {
            Self::campbell()
        }
    }

    pub fn campbell() -> Self {
        Self {
            bg: Color::Rgb(12, 12, 12),
            fg: Color::Rgb(204, 204, 204),
            fg_dim: Color::Rgb(118, 118, 118),
            accent: Color::Rgb(58, 150, 221),
            accent_dim: Color::Rgb(59, 120, 255),
            success: Color::Rgb(22, 198, 12),
            warning: Color::Rgb(249, 241, 165),
            error: Color::Rgb(231, 72, 86),
            border: Color::Rgb(48, 48, 48),
            border_focused: Color::Rgb(97, 214, 214),
            selection_bg: Color::Rgb(0, 55, 218),
            selection_fg: Color::Rgb(242, 242, 242),
            is_transparent: false,
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::Gray,
            accent: Color::Cyan,
            accent_dim: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::Reset,
            selection_fg: Color::White,
            is_transparent: true,
        }
    }

    // === STYLE HELPERS ===

    fn on_bg(&self, style: Style) -> Style {
        if self.is_transparent {
            style
        } else {
            style.bg(self.bg)
        }
    }

    pub fn text(&self) -> Style {
        self.on_bg(Style::default().fg(self.fg))
    }

    pub fn text_dim(&self) -> Style {
        self.on_bg(Style::default().fg(self.fg_dim))
    }

    pub fn title(&self) -> Style {
        self.on_bg(Style::default().fg(self.accent).add_modifier(Modifier::BOLD))
    }

    pub fn selected(&self) -> Style {
        let style = Style::default()
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD);
        if self.is_transparent {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style.bg(self.selection_bg)
        }
    }

    pub fn border(&self) -> Style {
        self.on_bg(Style::default().fg(self.border))
    }

    pub fn border_focused(&self) -> Style {
        self.on_bg(Style::default().fg(self.border_focused))
    }

    pub fn success(&self) -> Style {
        self.on_bg(Style::default().fg(self.success))
    }

    pub fn warning(&self) -> Style {
        self.on_bg(Style::default().fg(self.warning))
    }

    pub fn error(&self) -> Style {
        self.on_bg(Style::default().fg(self.error))
    }

    pub fn block_style(&self) -> Style {
        if self.is_transparent {
            Style::default()
        } else {
            Style::default().bg(self.bg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campbell_is_opaque() {
        let theme = Theme::campbell();
        assert_eq!(theme.bg, Color::Rgb(12, 12, 12));
        assert!(!theme.is_transparent);
        assert_eq!(theme.text().bg, Some(Color::Rgb(12, 12, 12)));
    }

    #[test]
    fn test_transparent_has_no_background() {
        let theme = Theme::transparent();
        assert!(theme.is_transparent);
        assert_eq!(theme.text().bg, None);
        assert_eq!(theme.block_style(), Style::default());
    }
}
