use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::push_highlighted_spans;
use crate::gesture::DragKind;
use crate::model::Task;
use crate::ops::calendar::{self, WEEKDAY_NAMES};
use crate::ops::layout::{self, Bar};
use crate::ops::task_ops::Edge;
use crate::tui::app::App;
use crate::tui::interaction::{Layer, Target};
use crate::util::unicode;

/// Grip glyph drawn at both ends of a bar
const HANDLE: &str = "\u{2503}";

/// `n + 1` evenly spread boundaries over `len` cells starting at `start`
fn boundaries(start: u16, len: u16, n: usize) -> Vec<u16> {
    (0..=n)
        .map(|i| start + (usize::from(len) * i / n) as u16)
        .collect()
}

/// Weekday names, one per grid column
pub fn render_weekdays(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.dim)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    let xs = boundaries(area.x, area.width, 7);
    for (i, name) in WEEKDAY_NAMES.iter().enumerate() {
        let width = usize::from(xs[i + 1] - xs[i]);
        let rect = Rect::new(xs[i], area.y, xs[i + 1] - xs[i], area.height.min(1));
        frame.render_widget(
            Paragraph::new(Span::styled(unicode::center_to_width(name, width), style)),
            rect,
        );
    }
}

/// Day cells, then task bars on top. Cell rects go into `app.geometry` and
/// bar regions into `app.hits`.
pub fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let first_weekday = app.first_weekday();
    let days = app.days_in_month();
    let cells = calendar::build_grid(first_weekday, days);
    let weeks = cells.len() / 7;
    let xs = boundaries(area.x, area.width, 7);
    let ys = boundaries(area.y, area.height, weeks);

    let selection = app.gestures.selection().map(|s| s.range());
    let visible: Vec<Task> = app.visible_tasks().into_iter().cloned().collect();
    let visible_refs: Vec<&Task> = visible.iter().collect();

    let bg = app.theme.background;
    let border = Style::default().fg(app.theme.dim).bg(bg);

    for (i, day) in cells.iter().enumerate() {
        let (col, row) = (i % 7, i / 7);
        let rect = Rect::new(xs[col], ys[row], xs[col + 1] - xs[col], ys[row + 1] - ys[row]);
        app.geometry.push(rect, *day);

        let mut block = Block::default()
            .borders(Borders::TOP | Borders::LEFT)
            .border_style(border)
            .style(Style::default().bg(bg));
        if let Some(day) = *day {
            if selection.is_some_and(|r| r.contains(day)) {
                block = block.style(Style::default().bg(app.theme.selection_bg));
            }
            let title_style = if app.is_today(day) {
                Style::default()
                    .fg(app.theme.today)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(app.theme.text)
            };
            let mut title = vec![Span::styled(format!("{:>2}", day), title_style)];
            let capacity = usize::from(rect.height.saturating_sub(1));
            let stacked = layout::tasks_for_day(&visible_refs, day).len();
            if stacked > capacity {
                title.push(Span::styled(
                    format!(" +{}", stacked - capacity),
                    Style::default().fg(app.theme.dim),
                ));
            }
            block = block.title(Line::from(title));
        }
        frame.render_widget(block, rect);
    }

    let moving = app
        .gestures
        .task_drag()
        .filter(|d| d.kind() == DragKind::Move)
        .map(|d| (d.task_id(), d.offset()));
    let search_re = app.search_re();
    let mut raised = None;

    for bar in layout::month_bars(&visible_refs, days) {
        let Some(task) = visible.iter().find(|t| t.id == bar.task_id) else {
            continue;
        };
        let Some(placed) = bar_rect(app, &bar, first_weekday, days) else {
            continue;
        };
        if let Some((id, offset)) = moving
            && id == bar.task_id
        {
            raised = Some((task, placed, offset));
            continue;
        }
        draw_bar(frame, app, task, placed, search_re.as_ref(), false);
        register_bar(app, task.id, placed);
    }

    // The bar being moved follows the pointer, above everything else
    if let Some((task, placed, (dx, dy))) = raised {
        let rect = placed.rect;
        let screen = frame.area();
        let x = (i32::from(rect.x) + dx).clamp(i32::from(screen.x), i32::from(screen.right()) - 1);
        let y = (i32::from(rect.y) + dy).clamp(i32::from(screen.y), i32::from(screen.bottom()) - 1);
        let (x, y) = (x as u16, y as u16);
        let width = rect.width.min(screen.right() - x);
        draw_bar(
            frame,
            app,
            task,
            PlacedBar {
                rect: Rect::new(x, y, width, 1),
                ..placed
            },
            search_re.as_ref(),
            true,
        );
    }
}

/// A bar's on-screen row segment
#[derive(Debug, Clone, Copy)]
struct PlacedBar {
    rect: Rect,
    /// The task's last day is inside this segment (not clipped by the week
    /// row or the month), so the end handle belongs here
    shows_end: bool,
}

/// Where a bar lands: the start cell's first task row plus `slot`, running to
/// the task's last day but no further than its week row or the month.
fn bar_rect(app: &App, bar: &Bar, first_weekday: u32, days: u32) -> Option<PlacedBar> {
    let start = app.geometry.rect_for_day(bar.start_day)?;
    let idx = calendar::cell_index(first_weekday, bar.start_day);
    let row_last_day = (idx / 7 * 7 + 7) as u32 - first_weekday;
    let task_end = bar.start_day.saturating_add(bar.span.saturating_sub(1));
    let end_day = task_end.min(days).min(row_last_day);
    let end = app.geometry.rect_for_day(end_day)?;

    let y = start.y + 1 + bar.slot as u16;
    if y >= start.bottom() {
        return None;
    }
    let x = start.x + 1;
    let width = end.right().saturating_sub(x);
    (width > 0).then(|| PlacedBar {
        rect: Rect::new(x, y, width, 1),
        shows_end: task_end == end_day,
    })
}

fn draw_bar(
    frame: &mut Frame,
    app: &App,
    task: &Task,
    placed: PlacedBar,
    search_re: Option<&regex::Regex>,
    raised: bool,
) {
    let rect = placed.rect;
    let color = if raised {
        app.theme.highlight
    } else {
        app.theme.category_color(task.category)
    };
    let base = Style::default().fg(app.theme.background).bg(color);
    let handle = base.add_modifier(Modifier::BOLD);
    let matched = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    let width = usize::from(rect.width);
    let mut spans = Vec::new();
    if width >= 3 {
        let inner = width - 2;
        let name = unicode::truncate_to_width(&task.name, inner);
        let pad = inner - unicode::display_width(&name);
        spans.push(Span::styled(HANDLE, handle));
        push_highlighted_spans(&mut spans, &name, base, matched, search_re);
        spans.push(Span::styled(" ".repeat(pad), base));
        // a clipped bar runs on past its row: no end handle to grab
        let tail = if placed.shows_end { HANDLE } else { " " };
        spans.push(Span::styled(tail, handle));
    } else {
        let name = unicode::truncate_to_width(&task.name, width);
        let pad = width - unicode::display_width(&name);
        spans.push(Span::styled(format!("{}{}", name, " ".repeat(pad)), base));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rect);
}

/// Body first, handles last so they win where they overlap
fn register_bar(app: &mut App, id: u64, placed: PlacedBar) {
    let rect = placed.rect;
    app.hits.register(Layer::Base, rect, Target::BarBody(id));
    if rect.width >= 3 {
        let left = Rect::new(rect.x, rect.y, 1, 1);
        app.hits
            .register(Layer::Base, left, Target::BarHandle(id, Edge::Start));
        if placed.shows_end {
            let right = Rect::new(rect.right() - 1, rect.y, 1, 1);
            app.hits
                .register(Layer::Base, right, Target::BarHandle(id, Edge::End));
        }
    }
}
