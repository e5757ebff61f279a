pub mod dialog;
pub mod grid;
pub mod header;
pub mod help_overlay;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;
use regex::Regex;

use super::app::App;
use crate::util::unicode;

/// Main render function. Also records the hit-test geometry and clickable
/// regions the mouse handlers read.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.hits.clear();
    app.geometry.clear();
    app.dialog_area = None;

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | filters | weekday names | grid | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    header::render_filters(frame, app, chunks[1]);
    grid::render_weekdays(frame, app, chunks[2]);
    grid::render_grid(frame, app, chunks[3]);

    if app.form.is_some() {
        dialog::render_dialog(frame, app, area);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[4]);
}

/// Builds a one-row line left to right, reporting where each span lands
pub(super) struct LineBuilder<'a> {
    area: Rect,
    x: u16,
    spans: Vec<Span<'a>>,
}

impl<'a> LineBuilder<'a> {
    pub fn new(area: Rect) -> Self {
        LineBuilder {
            area,
            x: area.x,
            spans: Vec::new(),
        }
    }

    /// Append a span and return the on-screen rect it covers (clipped to the area)
    pub fn push(&mut self, text: impl Into<Cow<'a, str>>, style: Style) -> Rect {
        let text = text.into();
        let width = unicode::display_width(&text) as u16;
        let visible = width.min(self.area.right().saturating_sub(self.x));
        let rect = Rect::new(self.x, self.area.y, visible, 1.min(self.area.height));
        self.x = self.x.saturating_add(width);
        self.spans.push(Span::styled(text, style));
        rect
    }

    /// Cells used so far
    pub fn width(&self) -> u16 {
        self.x - self.area.x
    }

    pub fn into_line(self) -> Line<'a> {
        Line::from(self.spans)
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
