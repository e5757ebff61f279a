use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use log::{debug, warn};

use crate::gesture::{DayHitTest, Gesture, Outcome, Selection, TaskDrag};
use crate::tui::app::{App, Mode};
use crate::tui::form::FormField;
use crate::tui::interaction::{Layer, Target};

/// Route a mouse event. Regions come from the last render.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => left_down(app, x, y),
        MouseEventKind::Down(MouseButton::Right) => right_down(app, x, y),
        MouseEventKind::Drag(MouseButton::Left) => dragged(app, x, y),
        // Release is honored wherever it lands, so a drag that leaves the grid still ends
        MouseEventKind::Up(MouseButton::Left) => released(app, x, y),
        MouseEventKind::ScrollUp if app.mode != Mode::Dialog && app.gestures.is_idle() => {
            app.shift_month(-1)
        }
        MouseEventKind::ScrollDown if app.mode != Mode::Dialog && app.gestures.is_idle() => {
            app.shift_month(1)
        }
        _ => {}
    }
}

fn left_down(app: &mut App, x: u16, y: u16) {
    app.status_message = None;
    if app.show_help {
        app.show_help = false;
        return;
    }
    if app.mode == Mode::Dialog {
        dialog_click(app, x, y);
        return;
    }
    if !app.gestures.is_idle() {
        // The terminal never reported the previous release
        warn!("dropping gesture that never saw a release");
        app.gestures.abandon();
    }

    let target = app.hits.target_at(Layer::Base, x, y);
    if app.mode == Mode::Search && target != Some(Target::SearchBox) {
        app.mode = Mode::Navigate;
    }

    match target {
        Some(Target::BarHandle(id, edge)) => {
            let drag = TaskDrag::start_resize(id, edge, x, y, &app.geometry);
            app.gestures.begin(Gesture::Task(drag));
        }
        Some(Target::BarBody(id)) => {
            app.gestures
                .begin(Gesture::Task(TaskDrag::start_move(id, x, y)));
        }
        Some(Target::PrevMonth) => app.shift_month(-1),
        Some(Target::NextMonth) => app.shift_month(1),
        Some(Target::CategoryToggle(category)) => app.toggle_category(category),
        Some(Target::TimeWindow) => app.cycle_window(),
        Some(Target::SearchBox) => app.mode = Mode::Search,
        Some(_) => {}
        None => {
            if let Some(selection) = Selection::begin(app.geometry.day_at(x, y)) {
                debug!("selection started on day {}", selection.anchor());
                app.gestures.begin(Gesture::Select(selection));
            }
        }
    }
}

fn dialog_click(app: &mut App, x: u16, y: u16) {
    let inside = app.dialog_area.is_some_and(|r| {
        x >= r.x && x < r.x.saturating_add(r.width) && y >= r.y && y < r.y.saturating_add(r.height)
    });
    if !inside {
        app.cancel_form();
        return;
    }
    match app.hits.target_at(Layer::Dialog, x, y) {
        Some(Target::DialogCancel) => app.cancel_form(),
        Some(Target::DialogSubmit) => app.submit_form(),
        Some(Target::DialogCategory) => {
            if let Some(form) = app.form.as_mut() {
                form.focus = FormField::Category;
                form.next_category();
            }
        }
        Some(Target::DialogName) => {
            if let Some(form) = app.form.as_mut() {
                form.focus = FormField::Name;
            }
        }
        _ => {}
    }
}

fn right_down(app: &mut App, x: u16, y: u16) {
    if app.mode == Mode::Dialog || !app.gestures.is_idle() {
        return;
    }
    match app.hits.target_at(Layer::Base, x, y) {
        Some(Target::BarBody(id)) | Some(Target::BarHandle(id, _)) => app.open_edit_form(id),
        _ => {}
    }
}

fn dragged(app: &mut App, x: u16, y: u16) {
    if app.gestures.is_idle() {
        return;
    }
    match app
        .gestures
        .pointer_moved(x, y, &app.geometry, &mut app.store)
    {
        Ok(true) => app.store_changed(false),
        Ok(false) => {}
        Err(e) => {
            warn!("drag update failed: {}", e);
            app.status_message = Some(e.to_string());
        }
    }
}

fn released(app: &mut App, x: u16, y: u16) {
    if app.gestures.is_idle() {
        return;
    }
    match app
        .gestures
        .pointer_released(x, y, &app.geometry, &mut app.store)
    {
        Ok(Outcome::Selected(range)) => app.open_create_form(range),
        Ok(Outcome::Moved(_)) | Ok(Outcome::Resized(_)) => app.store_changed(true),
        Ok(Outcome::Nothing) => {}
        Err(e) => {
            warn!("drop failed: {}", e);
            app.status_message = Some(e.to_string());
        }
    }
    // Pending writes from live resizing land now
    app.save();
    if app.pending_reload {
        app.reload_from_disk();
    }
}
