use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::tui::form::FormField;

pub(super) fn handle_dialog(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.cancel_form();
            return;
        }
        KeyCode::Enter => {
            app.submit_form();
            return;
        }
        _ => {}
    }

    let Some(form) = app.form.as_mut() else {
        return;
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match (form.focus, key.code) {
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => form.toggle_focus(),
        (_, KeyCode::Up) => form.prev_category(),
        (_, KeyCode::Down) => form.next_category(),

        (FormField::Category, KeyCode::Left) => form.prev_category(),
        (FormField::Category, KeyCode::Right) | (FormField::Category, KeyCode::Char(' ')) => {
            form.next_category()
        }

        (FormField::Name, KeyCode::Char('w')) if ctrl => form.delete_word_back(),
        (FormField::Name, KeyCode::Char('a')) if ctrl => form.cursor_home(),
        (FormField::Name, KeyCode::Char('e')) if ctrl => form.cursor_end(),
        (FormField::Name, KeyCode::Char(c)) if !ctrl => form.insert_char(c),
        (FormField::Name, KeyCode::Backspace) if alt => form.delete_word_back(),
        (FormField::Name, KeyCode::Backspace) => form.backspace(),
        (FormField::Name, KeyCode::Delete) => form.delete(),
        (FormField::Name, KeyCode::Left) => form.cursor_left(),
        (FormField::Name, KeyCode::Right) => form.cursor_right(),
        (FormField::Name, KeyCode::Home) => form.cursor_home(),
        (FormField::Name, KeyCode::End) => form.cursor_end(),
        _ => {}
    }
}
