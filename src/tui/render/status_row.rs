use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::gesture::{DragKind, Gesture};
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (message, style) = match &app.status_message {
        Some(msg) => (msg.clone(), Style::default().fg(app.theme.red).bg(bg)),
        None => (
            format!(
                "Showing {} of {} tasks",
                app.visible_tasks().len(),
                app.store.len()
            ),
            Style::default().fg(app.theme.text).bg(bg),
        ),
    };
    let mut spans = vec![Span::styled(format!(" {}", message), style)];

    let hint = gesture_hint(app).or_else(|| {
        app.show_key_hints.then(|| {
            match app.mode {
                Mode::Navigate => "drag: new task  right-click: edit  ? help  q quit",
                Mode::Search => "Enter done  Esc clear",
                Mode::Dialog => "Enter save  Esc cancel  Tab field",
            }
            .to_string()
        })
    });
    if let Some(hint) = hint {
        let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        let hint_width = unicode::display_width(&hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                hint,
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// What the live gesture is doing, if anything
fn gesture_hint(app: &App) -> Option<String> {
    match app.gestures.active()? {
        Gesture::Select(sel) => {
            let range = sel.range();
            Some(if range.start == range.end {
                format!("Selecting day {}", range.start)
            } else {
                format!("Selecting days {}-{}", range.start, range.end)
            })
        }
        Gesture::Task(drag) => {
            let task = app.store.get(drag.task_id())?;
            Some(match drag.kind() {
                DragKind::Move => format!("Moving {}", task.name),
                DragKind::Resize(_) => {
                    format!("Resizing {}: days {}-{}", task.name, task.start_day, task.end_day)
                }
            })
        }
    }
}
