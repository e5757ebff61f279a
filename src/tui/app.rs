use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, error, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use regex::Regex;

use crate::gesture::{GestureSlot, GridGeometry};
use crate::io::autosave::AutoSave;
use crate::io::store_io::{load_store, read_tasks, save_or_record};
use crate::io::watcher::TaskFileWatcher;
use crate::model::{Category, Config, DayRange, FilterState, Task, TaskId, TimeWindow};
use crate::ops::calendar;
use crate::ops::filter::visible_tasks;
use crate::ops::task_ops::TaskStore;

use super::form::{FormMode, TaskForm};
use super::input;
use super::interaction::InteractionMap;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search box
    Search,
    /// The task form is open
    Dialog,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    /// First day of the displayed month
    pub month: NaiveDate,
    pub today: NaiveDate,
    pub filter: FilterState,
    pub mode: Mode,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub show_help: bool,
    pub should_quit: bool,
    /// The live pointer gesture, if any
    pub gestures: GestureSlot,
    /// Day cells of the last render, for hit-testing
    pub geometry: GridGeometry,
    /// Clickable regions of the last render
    pub hits: InteractionMap,
    pub form: Option<TaskForm>,
    /// Where the form was last drawn
    pub dialog_area: Option<Rect>,
    /// One-line message for the status row (save failures, refused edits)
    pub status_message: Option<String>,
    /// Where tasks are persisted. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub autosave: AutoSave,
    /// Revision whose save failed, so ticks don't retry it in a loop
    failed_revision: Option<u64>,
    /// The task file changed on disk while a gesture was live
    pub pending_reload: bool,
}

impl App {
    pub fn new(store: TaskStore, config: &Config, today: NaiveDate) -> Self {
        let revision = store.revision();
        App {
            store,
            month: calendar::first_of_month(today),
            today,
            filter: FilterState::default(),
            mode: Mode::Navigate,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            show_help: false,
            should_quit: false,
            gestures: GestureSlot::default(),
            geometry: GridGeometry::default(),
            hits: InteractionMap::default(),
            form: None,
            dialog_area: None,
            status_message: None,
            data_dir: None,
            autosave: AutoSave::new(
                Duration::from_millis(config.storage.write_delay_ms),
                revision,
            ),
            failed_revision: None,
            pending_reload: false,
        }
    }

    /// Persist to `data_dir` from now on
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = Some(data_dir);
        self
    }

    pub fn days_in_month(&self) -> u32 {
        calendar::days_in_month(self.month)
    }

    pub fn first_weekday(&self) -> u32 {
        calendar::first_weekday_of_month(self.month)
    }

    /// Whether `day` of the displayed month is today
    pub fn is_today(&self, day: u32) -> bool {
        self.month
            .with_day(day)
            .is_some_and(|date| calendar::is_same_day(date, self.today))
    }

    /// Tasks that pass the current filters, in store order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        visible_tasks(self.store.tasks(), &self.filter, self.today.day())
    }

    /// Case-insensitive matcher for the search query, for highlighting
    pub fn search_re(&self) -> Option<Regex> {
        if self.filter.query.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(&self.filter.query))).ok()
    }

    // --- navigation ---

    pub fn shift_month(&mut self, delta: i32) {
        self.month = calendar::shift_month(self.month, delta);
        // cell geometry is stale until the next render
        if self.gestures.abandon().is_some() {
            debug!("gesture abandoned on month change");
        }
    }

    pub fn goto_today(&mut self) {
        self.month = calendar::first_of_month(self.today);
        self.gestures.abandon();
    }

    /// Advance `today` when the session runs past midnight
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    // --- filters ---

    pub fn toggle_category(&mut self, category: Category) {
        let shown = self.filter.toggle(category);
        debug!("category {} shown={}", category, shown);
    }

    pub fn cycle_window(&mut self) {
        self.filter.window = TimeWindow::cycle(self.filter.window);
    }

    // --- form ---

    pub fn open_create_form(&mut self, range: DayRange) {
        self.form = Some(TaskForm::create(range));
        self.mode = Mode::Dialog;
    }

    pub fn open_edit_form(&mut self, id: TaskId) {
        if let Some(task) = self.store.get(id) {
            self.form = Some(TaskForm::edit(task));
            self.mode = Mode::Dialog;
        }
    }

    /// Close the form, discarding any pending range
    pub fn cancel_form(&mut self) {
        self.form = None;
        self.dialog_area = None;
        self.mode = Mode::Navigate;
    }

    /// Apply the form. A refused submit keeps it open.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let Some(draft) = form.submit() else {
            return;
        };
        let mode = form.mode;
        let result = match mode {
            FormMode::Create { range } => self.store.create(range, draft).map(|task| {
                info!(
                    "created task {} on days {}-{}",
                    task.id, task.start_day, task.end_day
                );
            }),
            FormMode::Edit { task_id } => self.store.update(task_id, draft).map(|_| ()),
        };
        match result {
            Ok(()) => {
                self.cancel_form();
                self.store_changed(true);
            }
            Err(e) => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(e.to_string());
                }
            }
        }
    }

    // --- persistence ---

    /// Note a store mutation; write now if forced or the write delay has passed
    pub fn store_changed(&mut self, flush: bool) {
        let now = Instant::now();
        self.autosave.observe(self.store.revision(), now);
        if flush || self.autosave.due(now) {
            self.save();
        }
    }

    /// Called every loop iteration
    pub fn tick(&mut self, now: Instant) {
        if self.autosave.due(now) && self.failed_revision != Some(self.store.revision()) {
            self.save();
        }
    }

    /// Write pending changes, if any
    pub fn save(&mut self) {
        if !self.autosave.is_dirty() {
            return;
        }
        let revision = self.store.revision();
        let Some(dir) = self.data_dir.as_deref() else {
            self.autosave.saved(revision);
            return;
        };
        match save_or_record(dir, self.store.tasks()) {
            Ok(()) => {
                self.autosave.saved(revision);
                self.failed_revision = None;
                if self.status_message.as_deref().is_some_and(|m| m.starts_with("Save failed")) {
                    self.status_message = None;
                }
            }
            Err(e) => {
                error!("save failed: {}", e);
                self.failed_revision = Some(revision);
                self.status_message = Some(format!("Save failed: {}", e));
            }
        }
    }

    /// Re-read tasks.json after another process changed it. Deferred while a
    /// gesture is live; skipped while local changes are still unsaved.
    pub fn reload_from_disk(&mut self) {
        if !self.gestures.is_idle() {
            self.pending_reload = true;
            return;
        }
        self.pending_reload = false;
        let Some(dir) = self.data_dir.clone() else {
            return;
        };
        if self.autosave.is_dirty() {
            debug!("unsaved changes pending; not reloading");
            return;
        }
        match read_tasks(&dir) {
            Ok(tasks) => {
                if self.store.replace_all(tasks) {
                    info!("reloaded {} tasks from disk", self.store.len());
                    self.autosave.saved(self.store.revision());
                }
            }
            Err(e) => warn!("ignoring unreadable task file: {}", e),
        }
    }
}

/// Terminal mouse reporting, on for as long as the guard lives
pub struct MouseCapture(());

impl MouseCapture {
    pub fn enable() -> io::Result<Self> {
        execute!(io::stdout(), EnableMouseCapture)?;
        Ok(MouseCapture(()))
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(data_dir);
    let today = Local::now().date_naive();
    let mut app = App::new(store, config, today).with_data_dir(data_dir.to_path_buf());
    info!(
        "starting with {} tasks from {}",
        app.store.len(),
        data_dir.display()
    );

    let watcher = if config.storage.watch {
        std::fs::create_dir_all(data_dir)?;
        match TaskFileWatcher::start(data_dir) {
            Ok(w) => Some(w),
            Err(e) => {
                warn!("not watching {}: {}", data_dir.display(), e);
                None
            }
        }
    } else {
        None
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let capture = MouseCapture::enable()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(io::stdout(), DisableMouseCapture);
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Whatever happened, flush pending writes
    app.save();

    // Restore terminal
    drop(capture);
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&TaskFileWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if watcher.is_some_and(|w| w.poll()) {
            app.pending_reload = true;
        }
        if app.pending_reload && app.gestures.is_idle() {
            app.reload_from_disk();
        }
        app.set_today(Local::now().date_naive());
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store_io::save_tasks;
    use crate::model::TaskDraft;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn oct_19() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn app_in(dir: &Path) -> App {
        App::new(TaskStore::new(), &Config::default(), oct_19()).with_data_dir(dir.to_path_buf())
    }

    fn draft(name: &str) -> TaskDraft {
        TaskDraft {
            name: name.into(),
            category: Category::Todo,
        }
    }

    #[test]
    fn starts_on_current_month() {
        let app = App::new(TaskStore::new(), &Config::default(), oct_19());
        assert_eq!(app.month, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        assert!(app.is_today(19));
        assert!(!app.is_today(18));
        assert_eq!(app.days_in_month(), 31);
        assert_eq!(app.first_weekday(), 4);
    }

    #[test]
    fn month_navigation_keeps_today() {
        let mut app = App::new(TaskStore::new(), &Config::default(), oct_19());
        app.shift_month(1);
        assert_eq!(app.month, NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
        assert!(!app.is_today(19));
        app.shift_month(-14);
        assert_eq!(app.month, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        app.goto_today();
        assert!(app.is_today(19));
    }

    #[test]
    fn submit_creates_and_saves() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(tmp.path());
        app.open_create_form(DayRange { start: 3, end: 5 });
        assert_eq!(app.mode, Mode::Dialog);
        for c in "Design Review".chars() {
            app.form.as_mut().unwrap().insert_char(c);
        }
        app.submit_form();
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.form.is_none());
        let saved = read_tasks(tmp.path()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Design Review");
        assert_eq!((saved[0].start_day, saved[0].end_day), (3, 5));
    }

    #[test]
    fn blank_submit_keeps_form_open() {
        let mut app = App::new(TaskStore::new(), &Config::default(), oct_19());
        app.open_create_form(DayRange { start: 3, end: 5 });
        app.submit_form();
        assert_eq!(app.mode, Mode::Dialog);
        assert!(app.form.as_ref().unwrap().error.is_some());
        assert!(app.store.is_empty());
        app.cancel_form();
        assert!(app.form.is_none());
        assert!(app.store.is_empty());
    }

    #[test]
    fn edit_form_updates_in_place() {
        let mut app = App::new(TaskStore::new(), &Config::default(), oct_19());
        let id = app
            .store
            .create(DayRange { start: 3, end: 5 }, draft("Draft"))
            .unwrap()
            .id;
        app.open_edit_form(id);
        let form = app.form.as_mut().unwrap();
        form.cursor_home();
        form.insert_str("Final ");
        form.next_category();
        app.submit_form();
        let task = app.store.get(id).unwrap();
        assert_eq!(task.name, "Final Draft");
        assert_eq!(task.category, Category::InProgress);
        assert_eq!((task.start_day, task.end_day), (3, 5));
    }

    #[test]
    fn delayed_writes_coalesce_until_flushed() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.write_delay_ms = 60_000;
        let mut app = App::new(TaskStore::new(), &config, oct_19())
            .with_data_dir(tmp.path().to_path_buf());
        app.store
            .create(DayRange { start: 1, end: 2 }, draft("one"))
            .unwrap();
        app.store_changed(false);
        assert!(read_tasks(tmp.path()).unwrap().is_empty());
        app.tick(Instant::now());
        assert!(read_tasks(tmp.path()).unwrap().is_empty());
        app.save();
        assert_eq!(read_tasks(tmp.path()).unwrap().len(), 1);
    }

    #[test]
    fn reload_picks_up_external_changes() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(tmp.path());
        let mut other = TaskStore::new();
        other
            .create(DayRange { start: 7, end: 8 }, draft("from cli"))
            .unwrap();
        save_tasks(tmp.path(), other.tasks()).unwrap();

        app.reload_from_disk();
        assert_eq!(app.store.len(), 1);
        assert!(!app.autosave.is_dirty());

        // a broken file never clobbers what we hold
        std::fs::write(tmp.path().join("tasks.json"), "{oops").unwrap();
        app.reload_from_disk();
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn reload_waits_for_gesture_end() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(tmp.path());
        app.gestures.begin(crate::gesture::Gesture::Select(
            crate::gesture::Selection::begin(Some(4)).unwrap(),
        ));
        let mut other = TaskStore::new();
        other
            .create(DayRange { start: 7, end: 8 }, draft("from cli"))
            .unwrap();
        save_tasks(tmp.path(), other.tasks()).unwrap();

        app.reload_from_disk();
        assert!(app.pending_reload);
        assert!(app.store.is_empty());

        app.gestures.abandon();
        app.reload_from_disk();
        assert!(!app.pending_reload);
        assert_eq!(app.store.len(), 1);
    }
}
