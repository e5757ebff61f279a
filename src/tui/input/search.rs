use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Live search: every keystroke re-filters the grid
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    let query = &mut app.filter.query;
    match key.code {
        KeyCode::Enter => app.mode = Mode::Navigate,
        KeyCode::Esc => {
            query.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(query, query.len()) {
                query.truncate(prev);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => query.clear(),
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let start = unicode::word_boundary_left(query, query.len());
            query.truncate(start);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => query.push(c),
        _ => {}
    }
}
