//! Main rendering module for wslmate
//!
//! Renders the complete UI:
//! - Vertical sidebar with tabs (left)
//! - Active module content area (right)
//! - Global status bar (bottom)
//! - Popup overlays + flash messages

use crate::app::{App, PopupState};
use crate::ui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Tab definition with index for keybinding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleTab {
    Install,
    Distros,
    Relocate,
    Archives,
    Settings,
    HelpAbout,
}

impl ModuleTab {
    pub fn index(&self) -> usize {
        match self {
            ModuleTab::Install => 0,
            ModuleTab::Distros => 1,
            ModuleTab::Relocate => 2,
            ModuleTab::Archives => 3,
            ModuleTab::Settings => 4,
            ModuleTab::HelpAbout => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModuleTab::Install => "Install",
            ModuleTab::Distros => "Distros",
            ModuleTab::Relocate => "Relocate",
            ModuleTab::Archives => "Archives",
            ModuleTab::Settings => "Settings",
            ModuleTab::HelpAbout => "Help",
        }
    }

    /// Keybind hint shown in sidebar
    pub fn key_hint(&self) -> &'static str {
        match self {
            ModuleTab::Install => "1",
            ModuleTab::Distros => "2",
            ModuleTab::Relocate => "3",
            ModuleTab::Archives => "4",
            ModuleTab::Settings => ",",
            ModuleTab::HelpAbout => "?",
        }
    }
}

/// Modules shown in the main sidebar area (numbered 1-4)
const SIDEBAR_MODULES: &[ModuleTab] = &[
    ModuleTab::Install,
    ModuleTab::Distros,
    ModuleTab::Relocate,
    ModuleTab::Archives,
];

/// Bottom items (below separator)
const SIDEBAR_BOTTOM: &[ModuleTab] = &[ModuleTab::Settings, ModuleTab::HelpAbout];

const SIDEBAR_WIDTH: u16 = 20;

/// Main render function – entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;

    // Fill entire background
    frame.render_widget(Block::default().style(theme.block_style()), area);

    let vertical = Layout::vertical([
        Constraint::Min(8),    // sidebar + content
        Constraint::Length(1), // status bar
    ])
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH),
        Constraint::Min(30), // content area
    ])
    .split(vertical[0]);

    render_sidebar(frame, app, horizontal[0]);
    render_module_content(frame, app, horizontal[1]);
    render_status_bar(frame, app, vertical[1]);

    render_popups(frame, app, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let sidebar_block = Block::default()
        .style(theme.block_style())
        .borders(Borders::RIGHT)
        .border_style(theme.border());
    let inner = sidebar_block.inner(area);
    frame.render_widget(sidebar_block, area);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            " wslmate",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.fg_dim),
        ),
    ]));
    lines.push(Line::raw(""));

    for &module in SIDEBAR_MODULES {
        render_sidebar_item(&mut lines, app, module);
    }

    // Separator
    lines.push(Line::raw(""));
    let sep_width = inner.width.saturating_sub(2) as usize;
    lines.push(Line::styled(
        format!(" {}", "─".repeat(sep_width.min(16))),
        Style::default().fg(theme.border),
    ));

    for &module in SIDEBAR_BOTTOM {
        render_sidebar_item(&mut lines, app, module);
    }

    frame.render_widget(Paragraph::new(lines).style(theme.block_style()), inner);
}

fn render_sidebar_item(lines: &mut Vec<Line<'_>>, app: &App, module: ModuleTab) {
    let theme = &app.theme;
    let hint = module.key_hint();

    if app.active_tab == module {
        lines.push(Line::from(vec![
            Span::styled(" ▸ ", Style::default().fg(theme.accent)),
            Span::styled(hint.to_string(), Style::default().fg(theme.accent)),
            Span::styled(
                format!(" {}", module.label()),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(hint.to_string(), Style::default().fg(theme.fg_dim)),
            Span::styled(format!(" {}", module.label()), Style::default().fg(theme.fg)),
        ]));
    }
}

fn render_module_content(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let config = &app.config;

    match app.active_tab {
        ModuleTab::Install => crate::modules::install::render(frame, &app.install, theme, area),
        ModuleTab::Distros => {
            crate::modules::distros::render(frame, &app.distros, &config.export_path, theme, area)
        }
        ModuleTab::Relocate => crate::modules::relocate::render(frame, &app.relocate, config, theme, area),
        ModuleTab::Archives => crate::modules::archives::render(
            frame,
            &app.archives,
            &config.export_path,
            &config.import_path,
            theme,
            area,
        ),
        ModuleTab::Settings => crate::modules::settings::render(frame, &app.settings, config, theme, area),
        ModuleTab::HelpAbout => render_help_about(frame, app, area),
    }
}

/// Command lines issued for each operation
const COMMAND_TABLE: &[(&str, &str)] = &[
    ("List online", "wsl --list --online"),
    ("List installed", "wsl --list"),
    ("Install", "wsl --install -d <name>"),
    ("Run", "wsl -d <name> (new terminal)"),
    ("Export", "wsl --export <name> <export>/<name>-ex.tar"),
    ("Delete", "wsl --unregister <name>"),
    ("Shutdown", "wsl --shutdown"),
    ("Import", "wsl --import <name> <import>/<name> <tar>"),
];

fn render_help_about(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Help ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let section = |title: &str| {
        Line::styled(format!("── {} ──", title), Style::default().fg(theme.accent))
    };

    let mut content: Vec<Line> = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                "wslmate",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(theme.fg_dim),
            ),
        ]),
        Line::styled(
            "Install, run, export, move and delete WSL distros",
            Style::default().fg(theme.fg_dim),
        ),
        Line::raw(""),
        section("Tabs"),
        Line::raw(""),
    ];

    let tabs: &[(&str, &str, &str)] = &[
        ("1", "Install", "Install a distro from the online catalog"),
        ("2", "Distros", "Run, export, delete installed distros"),
        ("3", "Relocate", "Move a distro's disk to the import path"),
        ("4", "Archives", "Re-import an exported <name>-ex.tar"),
        (",", "Settings", "Export and import paths"),
        ("q", "Quit", ""),
    ];
    for (key, name, desc) in tabs {
        content.push(Line::from(vec![
            Span::styled(format!("  [{}]  ", key), Style::default().fg(theme.accent)),
            Span::styled(
                format!("{:<12}", name),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc.to_string(), Style::default().fg(theme.fg_dim)),
        ]));
    }
    content.push(Line::raw(""));

    content.push(section("Commands"));
    content.push(Line::raw(""));
    for (op, cmd) in COMMAND_TABLE {
        content.push(Line::from(vec![
            Span::styled(format!("  {:<16}", op), Style::default().fg(theme.fg)),
            Span::styled(cmd.to_string(), Style::default().fg(theme.accent_dim)),
        ]));
    }
    content.push(Line::raw(""));
    content.push(Line::styled(
        format!("Tool: {}    Log: WSLMATE_LOG=1", app.tool()),
        Style::default().fg(theme.fg_dim),
    ));

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let hints = match app.active_tab {
        ModuleTab::Settings if app.settings.editing => "[Enter] Save  [Esc] Cancel",
        ModuleTab::Install => "[j/k] Navigate  [Enter] Install  [r] Refresh  [q] Quit",
        ModuleTab::Distros => "[Enter] Run  [e] Export  [d] Delete  [s] Shutdown  [q] Quit",
        ModuleTab::Relocate => "[Enter] Move  [r] Refresh  [q] Quit",
        ModuleTab::Archives => "[Enter] Import  [r] Rescan  [q] Quit",
        _ => "[1-4] Switch tab  [,] Settings  [?] Help  [q] Quit",
    };

    let config_state = if app.config.is_complete() {
        Span::styled(" paths set ", theme.success())
    } else {
        Span::styled(" paths not set ", theme.warning())
    };

    let bar = Layout::horizontal([Constraint::Min(10), Constraint::Length(16)]).split(area);
    frame.render_widget(
        Paragraph::new(Line::styled(format!(" {}", hints), theme.text_dim())).style(theme.block_style()),
        bar[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(config_state))
            .alignment(Alignment::Right)
            .style(theme.block_style()),
        bar[1],
    );
}

fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}
        PopupState::Error { title, message } => {
            widgets::render_error_popup(frame, title, message, theme, area);
        }
        PopupState::Working { message } => {
            widgets::render_working(frame, message, theme, area);
        }
    }

    if let Some(msg) = &app.flash_message {
        widgets::render_flash_message(frame, &msg.text, msg.is_error, theme, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_indices_are_unique() {
        let mut all: Vec<ModuleTab> = SIDEBAR_MODULES.to_vec();
        all.extend_from_slice(SIDEBAR_BOTTOM);
        let mut indices: Vec<usize> = all.iter().map(|t| t.index()).collect();
        indices.sort();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sidebar_hints_match_global_keys() {
        let hints: Vec<&str> = SIDEBAR_MODULES.iter().map(|t| t.key_hint()).collect();
        assert_eq!(hints, vec!["1", "2", "3", "4"]);
    }
}
