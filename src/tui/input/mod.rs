mod dialog;
mod mouse;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    app.status_message = None;

    // Help overlay swallows the key that closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Search => search::handle_search(app, key),
        Mode::Dialog => dialog::handle_dialog(app, key),
    }
}

/// Handle a bracketed paste. Newlines become spaces; only text fields take it.
pub fn handle_paste(app: &mut App, text: &str) {
    let clean = text.replace(['\n', '\r'], " ");
    match app.mode {
        Mode::Dialog => {
            if let Some(form) = app.form.as_mut() {
                form.insert_str(&clean);
            }
        }
        Mode::Search => app.filter.query.push_str(&clean),
        Mode::Navigate => {}
    }
}
