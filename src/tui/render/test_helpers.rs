use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use chrono::NaiveDate;

use crate::model::Config;
use crate::ops::task_ops::TaskStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Draw the whole app at the standard test size. Leaves the app's hit-test
/// geometry and interaction map populated, as a real frame would.
pub fn draw(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// In-memory app showing the month of the given "today"
pub fn app_at(year: i32, month: u32, day: u32) -> App {
    let today = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    App::new(TaskStore::new(), &Config::default(), today)
}
