use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Category;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Month navigation
        KeyCode::Char('h') | KeyCode::Char('[') | KeyCode::Left => app.shift_month(-1),
        KeyCode::Char('l') | KeyCode::Char(']') | KeyCode::Right => app.shift_month(1),
        KeyCode::Char('t') => app.goto_today(),

        // Filters
        KeyCode::Char('/') => app.mode = Mode::Search,
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            app.toggle_category(Category::ALL[idx]);
        }
        KeyCode::Char('w') => app.cycle_window(),
        KeyCode::Esc => app.filter.query.clear(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{app, press};
    use crossterm::event::KeyCode;

    use crate::model::{Category, TimeWindow};
    use crate::tui::app::Mode;
    use chrono::NaiveDate;

    #[test]
    fn month_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.month, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.month, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.month, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
    }

    #[test]
    fn number_keys_toggle_categories() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert!(!app.filter.is_shown(Category::Completed));
        assert!(app.filter.is_shown(Category::Todo));
        press(&mut app, KeyCode::Char('4'));
        assert!(app.filter.is_shown(Category::Completed));
    }

    #[test]
    fn w_cycles_window() {
        let mut app = app();
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.filter.window, Some(TimeWindow::OneWeek));
        press(&mut app, KeyCode::Char('w'));
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.filter.window, Some(TimeWindow::ThreeWeeks));
        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.filter.window, None);
    }

    #[test]
    fn slash_enters_search_and_q_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
