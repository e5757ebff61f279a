use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_segmentation::UnicodeSegmentation;

use super::{LineBuilder, centered_rect};
use crate::tui::app::App;
use crate::tui::form::{FormField, TaskForm};
use crate::tui::interaction::{Layer, Target};
use crate::util::unicode;

const DIALOG_W: u16 = 48;
const DIALOG_H: u16 = 9;
const LABEL_W: u16 = 11;

/// The task form, centered over the board
pub fn render_dialog(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(form) = app.form.clone() else {
        return;
    };
    let popup = centered_rect(DIALOG_W, DIALOG_H, area);
    app.dialog_area = Some(popup);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let border_style = Style::default().fg(app.theme.highlight).bg(bg);
    let title_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", form.title()), title_style))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    if inner.height < 5 || inner.width <= LABEL_W + 2 {
        return;
    }

    let label = Style::default().fg(app.theme.dim).bg(bg);
    let active = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.selection_bg);
    let idle = Style::default().fg(app.theme.text).bg(bg);
    let focused = |field: FormField| if form.focus == field { active } else { idle };

    // Name
    let name_row = Rect::new(inner.x, inner.y + 1, inner.width, 1);
    let field_w = inner.width - LABEL_W - 1;
    let field = Rect::new(inner.x + LABEL_W, name_row.y, field_w, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(" Name", label)),
        Rect::new(inner.x, name_row.y, LABEL_W, 1),
    );
    let (shown, cursor_col) = scrolled_name(&form, usize::from(field_w) - 1);
    let pad = usize::from(field_w).saturating_sub(unicode::display_width(&shown));
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{}{}", shown, " ".repeat(pad)),
            focused(FormField::Name),
        )),
        field,
    );
    app.hits.register(Layer::Dialog, field, Target::DialogName);
    if form.focus == FormField::Name {
        frame.set_cursor_position(Position::new(field.x + cursor_col as u16, field.y));
    }

    // Category
    let cat_row = Rect::new(inner.x, inner.y + 3, inner.width, 1);
    let mut line = LineBuilder::new(cat_row);
    line.push(format!("{:<width$}", " Category", width = usize::from(LABEL_W)), label);
    let swatch = Style::default()
        .fg(app.theme.category_color(form.category))
        .bg(bg);
    let picker_start = line.push("\u{25C0} ", swatch);
    line.push(form.category.label(), focused(FormField::Category));
    let picker_end = line.push(" \u{25B6}", swatch);
    app.hits.register(
        Layer::Dialog,
        picker_start.union(picker_end),
        Target::DialogCategory,
    );
    frame.render_widget(Paragraph::new(line.into_line()), cat_row);

    // Validation message
    if let Some(err) = &form.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", unicode::truncate_to_width(err, usize::from(inner.width) - 1)),
                Style::default().fg(app.theme.red).bg(bg),
            )),
            Rect::new(inner.x, inner.y + 4, inner.width, 1),
        );
    }

    // Buttons, right-aligned on the last row
    let cancel_label = "[ Cancel ]";
    let submit_label = format!("[ {} ]", form.submit_label());
    let buttons_w = (cancel_label.len() + 2 + submit_label.len()) as u16;
    let button_row = Rect::new(
        inner.x + inner.width.saturating_sub(buttons_w + 1),
        inner.bottom() - 1,
        buttons_w.min(inner.width),
        1,
    );
    let mut buttons = LineBuilder::new(button_row);
    let cancel = buttons.push(cancel_label, Style::default().fg(app.theme.text).bg(bg));
    buttons.push("  ", Style::default().bg(bg));
    let submit = buttons.push(
        submit_label,
        Style::default()
            .fg(app.theme.background)
            .bg(app.theme.highlight)
            .add_modifier(Modifier::BOLD),
    );
    app.hits.register(Layer::Dialog, cancel, Target::DialogCancel);
    app.hits.register(Layer::Dialog, submit, Target::DialogSubmit);
    frame.render_widget(Paragraph::new(buttons.into_line()), button_row);
}

/// The part of the name that fits in `width` cells with the cursor in view,
/// and the cursor's column within it
fn scrolled_name(form: &TaskForm, width: usize) -> (String, usize) {
    let cursor_col = form.cursor_col();
    if cursor_col < width && unicode::display_width(&form.name) <= width {
        return (form.name.clone(), cursor_col);
    }
    let skip = (cursor_col + 1).saturating_sub(width);
    let mut skipped = 0;
    let mut shown = String::new();
    for g in form.name.graphemes(true) {
        if skipped < skip {
            skipped += unicode::display_width(g);
            continue;
        }
        shown.push_str(g);
    }
    let shown = unicode::truncate_to_width(&shown, width);
    (shown, cursor_col - skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DayRange;
    use crate::tui::render::test_helpers::{app_at, draw};

    #[test]
    fn create_dialog_layout() {
        let mut app = app_at(2026, 10, 19);
        app.open_create_form(DayRange { start: 3, end: 5 });
        let out = draw(&mut app);
        assert!(out.contains("New Task: days 3-5"), "{}", out);
        assert!(out.contains("Name"));
        assert!(out.contains("\u{25C0} To Do \u{25B6}"));
        assert!(out.contains("[ Cancel ]  [ Create Task ]"));
        assert!(app.dialog_area.is_some());
    }

    #[test]
    fn edit_dialog_uses_update_label() {
        let mut app = app_at(2026, 10, 19);
        let id = app
            .store
            .create(
                DayRange { start: 3, end: 5 },
                crate::model::TaskDraft {
                    name: "Design Review".into(),
                    category: crate::model::Category::Review,
                },
            )
            .unwrap()
            .id;
        app.open_edit_form(id);
        let out = draw(&mut app);
        assert!(out.contains("Edit Task"));
        assert!(out.contains("[ Update Task ]"));
        assert!(out.contains("\u{25C0} Review \u{25B6}"));
    }

    #[test]
    fn refused_submit_shows_error() {
        let mut app = app_at(2026, 10, 19);
        app.open_create_form(DayRange { start: 3, end: 5 });
        app.submit_form();
        let out = draw(&mut app);
        assert!(out.contains("Task name is required"));
    }

    #[test]
    fn long_names_scroll_to_cursor() {
        let mut form = TaskForm::create(DayRange { start: 1, end: 1 });
        form.insert_str("abcdefghij");
        let (shown, col) = scrolled_name(&form, 5);
        assert_eq!(shown, "ghij");
        assert_eq!(col, 4);
        form.cursor_home();
        let (shown, col) = scrolled_name(&form, 5);
        assert_eq!(shown, "abcd\u{2026}");
        assert_eq!(col, 0);
    }
}
