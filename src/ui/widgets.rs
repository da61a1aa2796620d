//! Reusable UI widgets for wslmate
//!
//! Common UI components shared across all modules:
//! - Popup dialogs (message, error, confirmation)
//! - Working indicator
//! - Flash messages
//! - Selectable name lists
//! - Layout helpers

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, char)],
    theme: &Theme,
    area: Rect,
) {
    let popup_width = 64.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 8).min(area.height.saturating_sub(4));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 2,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(5),
    };

    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

    if !buttons.is_empty() {
        let button_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height.saturating_sub(3),
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };

        let button_spans: Vec<Span> = buttons
            .iter()
            .enumerate()
            .flat_map(|(i, (label, key))| {
                let mut spans = vec![
                    Span::styled("[", theme.text_dim()),
                    Span::styled(
                        key.to_string(),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("] ", theme.text_dim()),
                    Span::styled(*label, theme.text()),
                ];
                if i < buttons.len() - 1 {
                    spans.push(Span::raw("    "));
                }
                spans
            })
            .collect();

        let buttons_widget = Paragraph::new(Line::from(button_spans))
            .alignment(Alignment::Center);
        frame.render_widget(buttons_widget, button_area);
    }
}

/// Render an error popup
pub fn render_error_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let mut content = vec![Line::raw("")];
    content.extend(message.lines().map(|l| Line::styled(l.to_string(), theme.error())));
    content.push(Line::raw(""));

    render_popup(frame, title, content, &[("OK", 'o')], theme, area);
}

/// Render a yes/no confirmation popup
pub fn render_confirm_popup(
    frame: &mut Frame,
    title: &str,
    lines: Vec<Line>,
    theme: &Theme,
    area: Rect,
) {
    let mut content = vec![Line::raw("")];
    content.extend(lines);
    content.push(Line::raw(""));

    render_popup(frame, title, content, &[("Yes", 'y'), ("No", 'n')], theme, area);
}

/// Render the "command running" indicator
pub fn render_working(
    frame: &mut Frame,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("⧗", Style::default().fg(theme.accent)),
            Span::raw(" "),
            Span::styled(message, theme.text()),
        ]),
        Line::raw(""),
    ];

    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_area = centered_rect(popup_width, 5, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(4),
        height: 3,
    };

    let working = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(working, inner);
}

/// Render a flash message at the bottom of the screen
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, flash_area);
    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message, style),
    ]))
    .style(theme.block_style());
    frame.render_widget(flash, flash_area);
}

/// Render a bordered, selectable list of names.
///
/// `empty` is shown instead of the list when there is nothing to pick.
pub fn render_name_list(
    frame: &mut Frame,
    title: &str,
    names: &[String],
    selected: usize,
    empty: &str,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ({}) ", title, names.len()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    if names.is_empty() {
        let placeholder = Paragraph::new(vec![Line::raw(""), Line::styled(empty, theme.text_dim())])
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = names
        .iter()
        .map(|n| ListItem::new(Line::styled(format!(" {}", n), theme.text())))
        .collect();

    let list = List::new(items)
        .block(block)
        .style(theme.text())
        .highlight_style(theme.selected())
        .highlight_symbol("▸");

    let mut state = ListState::default();
    state.select(Some(selected.min(names.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

/// One line of `[key] label` hints
pub fn key_hints<'a>(hints: &[(&'a str, &'a str)], theme: &Theme) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme.text_dim()));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", label), theme.text_dim()));
    }
    Line::from(spans)
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(20, 10, area), Rect::new(40, 15, 20, 10));
    }

    #[test]
    fn test_centered_rect_larger_than_area() {
        let area = Rect::new(5, 5, 10, 10);
        let r = centered_rect(30, 30, area);
        assert_eq!((r.x, r.y), (5, 5));
    }
}
