use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use super::LineBuilder;
use crate::model::{Category, TimeWindow};
use crate::ops::calendar;
use crate::tui::app::{App, Mode};
use crate::tui::interaction::{Layer, Target};
use crate::util::unicode;

/// Month navigation on the left, search box on the right
pub fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let arrow = Style::default().fg(app.theme.highlight).bg(bg);
    let title = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut left = LineBuilder::new(area);
    let prev = left.push(" \u{25C0} ", arrow);
    left.push(format!(" {} ", calendar::month_label(app.month)), title);
    let next = left.push(" \u{25B6} ", arrow);
    app.hits.register(Layer::Base, prev, Target::PrevMonth);
    app.hits.register(Layer::Base, next, Target::NextMonth);
    let left_width = left.width();
    frame.render_widget(
        Paragraph::new(left.into_line()).style(Style::default().bg(bg)),
        area,
    );

    // Search box, right-aligned, at most half the row
    let searching = app.mode == Mode::Search;
    let box_width = (area.width / 2).min(32);
    if box_width < 12 || left_width + box_width > area.width {
        return;
    }
    let box_area = Rect::new(area.right() - box_width, area.y, box_width, 1);
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let query_style = Style::default()
        .fg(if searching {
            app.theme.text_bright
        } else {
            app.theme.text
        })
        .bg(bg);

    let mut search = LineBuilder::new(box_area);
    search.push("/ ", label_style);
    let room = (box_width as usize).saturating_sub(4);
    if app.filter.query.is_empty() && !searching {
        search.push("search", label_style);
    } else {
        // keep the end of a long query in view
        let query = &app.filter.query;
        let shown = if unicode::display_width(query) > room {
            let mut start = query.len();
            while let Some(prev) = unicode::prev_grapheme_boundary(query, start) {
                if unicode::display_width(&query[prev..]) > room {
                    break;
                }
                start = prev;
            }
            &query[start..]
        } else {
            query.as_str()
        };
        search.push(shown.to_string(), query_style);
        if searching {
            search.push("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg));
        }
    }
    app.hits.register(Layer::Base, box_area, Target::SearchBox);
    frame.render_widget(
        Paragraph::new(search.into_line()).style(Style::default().bg(bg)),
        box_area,
    );
}

/// Category checkboxes and the time window selector
pub fn render_filters(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let label_style = Style::default().fg(app.theme.text).bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut line = LineBuilder::new(area);
    line.push(" ", dim);
    for (i, category) in Category::ALL.into_iter().enumerate() {
        if i > 0 {
            line.push("  ", dim);
        }
        let shown = app.filter.is_shown(category);
        let mark = if shown { "[x]" } else { "[ ]" };
        let box_style = Style::default()
            .fg(app.theme.category_color(category))
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        let mark_rect = line.push(mark, box_style);
        let label_rect = line.push(
            format!(" {}", category.label()),
            if shown { label_style } else { dim },
        );
        app.hits.register(
            Layer::Base,
            mark_rect.union(label_rect),
            Target::CategoryToggle(category),
        );
    }

    line.push("  Window: ", dim);
    let window = line.push(
        format!("{} \u{25BE}", TimeWindow::label(app.filter.window)),
        Style::default().fg(app.theme.text_bright).bg(bg),
    );
    app.hits.register(Layer::Base, window, Target::TimeWindow);

    frame.render_widget(
        Paragraph::new(line.into_line()).style(Style::default().bg(bg)),
        area,
    );
}
