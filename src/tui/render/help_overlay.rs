use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered_rect;
use crate::tui::app::App;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Mouse",
        &[
            ("drag days", "Select a range, then name the task"),
            ("drag bar", "Move a task (keeps its length)"),
            ("drag \u{2503}", "Resize from either end"),
            ("right-click", "Edit a task"),
            ("wheel", "Previous / next month"),
        ],
    ),
    (
        "Calendar",
        &[
            ("h/l [/]", "Previous / next month"),
            ("t", "Jump to today"),
        ],
    ),
    (
        "Filters",
        &[
            ("/", "Search task names"),
            ("1-4", "Toggle a category"),
            ("w", "Cycle time window"),
            ("Esc", "Clear search"),
        ],
    ),
    (
        "Global",
        &[("?", "Toggle this help"), ("q / Ctrl+C", "Quit")],
    ),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let rows: u16 = BINDINGS
        .iter()
        .map(|(_, keys)| keys.len() as u16 + 2)
        .sum::<u16>()
        + 3;
    let overlay_area = centered_rect(56, rows, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));
    for (section, keys) in BINDINGS {
        lines.push(Line::from(Span::styled(format!(" {}", section), header_style)));
        for (key, desc) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", key), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}
