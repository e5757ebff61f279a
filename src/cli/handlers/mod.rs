use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};
use log::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::recovery::{entry_count, read_recovery_log};
use crate::io::store_io::{load_store, read_tasks, save_tasks};
use crate::model::filter::{FilterState, TimeWindow};
use crate::model::task::{Category, DayRange, Task, TaskDraft};
use crate::ops::calendar;
use crate::ops::filter::visible_tasks;
use crate::ops::task_ops::{Edge, TaskStore};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Highest day number accepted from the command line
const MAX_DAY: u32 = 31;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, data_dir: &Path, json: bool) -> CmdResult {
    match command {
        // Read commands
        Commands::List(args) => cmd_list(args, data_dir, json),
        Commands::Month(args) => cmd_month(args, data_dir, json),
        Commands::Recovery => cmd_recovery(data_dir, json),

        // Write commands
        Commands::Add(args) => cmd_add(args, data_dir, json),
        Commands::Mv(args) => cmd_mv(args, data_dir, json),
        Commands::Resize(args) => cmd_resize(args, data_dir, json),
        Commands::Edit(args) => cmd_edit(args, data_dir, json),
        Commands::Clear(args) => cmd_clear(args, data_dir),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Strict load for commands that write back: a broken file is an error rather
/// than an empty list we would then save over it.
fn load_for_write(data_dir: &Path) -> Result<TaskStore, Box<dyn std::error::Error>> {
    Ok(TaskStore::from_tasks(read_tasks(data_dir)?))
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse_category(s).ok_or_else(|| {
        format!(
            "unknown category: '{}' (expected one of: todo, in-progress, review, completed)",
            s
        )
    })
}

fn check_day(day: u32) -> Result<u32, String> {
    if (1..=MAX_DAY).contains(&day) {
        Ok(day)
    } else {
        Err(format!("day must be between 1 and {}: {}", MAX_DAY, day))
    }
}

fn parse_month(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| format!("invalid month '{}' (expected YYYY-MM)", s))
}

fn print_task(task: &Task, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(task))?);
    } else {
        println!("{}", format_task_line(task));
    }
    Ok(())
}

fn find_task(store: &TaskStore, id: u64) -> Result<&Task, String> {
    store.get(id).ok_or_else(|| format!("task not found: {}", id))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, data_dir: &Path, json: bool) -> CmdResult {
    let store = load_store(data_dir);

    let mut filter = FilterState {
        query: args.search.unwrap_or_default(),
        ..FilterState::default()
    };
    for name in &args.hide {
        filter.set_shown(parse_category(name)?, false);
    }
    if let Some(weeks) = args.within {
        filter.window = Some(
            TimeWindow::from_weeks(weeks)
                .ok_or_else(|| format!("--within must be 1, 2 or 3 (got {})", weeks))?,
        );
    }
    let today = match args.today {
        Some(day) => check_day(day)?,
        None => Local::now().day(),
    };

    let visible = visible_tasks(store.tasks(), &filter, today);
    if json {
        let out = TaskListJson {
            showing: visible.len(),
            total: store.len(),
            tasks: visible.iter().map(|t| task_to_json(t)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_task_list(&visible, store.len()) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_month(args: MonthArgs, data_dir: &Path, json: bool) -> CmdResult {
    let today = Local::now().date_naive();
    let month = match args.month.as_deref() {
        Some(s) => parse_month(s)?,
        None => calendar::first_of_month(today),
    };
    let store = load_store(data_dir);
    let tasks: Vec<&Task> = store.tasks().iter().collect();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&month_to_json(month, &tasks))?
        );
    } else {
        for line in format_month(month, &tasks, today) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_recovery(data_dir: &Path, json: bool) -> CmdResult {
    let log = read_recovery_log(data_dir);
    if json {
        let out = RecoveryJson {
            entries: entry_count(data_dir),
            log,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    match log {
        Some(text) => print!("{}", text),
        None => println!("No recovery entries"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, data_dir: &Path, json: bool) -> CmdResult {
    let mut store = load_for_write(data_dir)?;
    let start = check_day(args.start)?;
    let end = check_day(args.end.unwrap_or(start))?;
    let draft = TaskDraft {
        name: args.name,
        category: parse_category(&args.category)?,
    };

    let task = store.create(DayRange { start, end }, draft)?.clone();
    save_tasks(data_dir, store.tasks())?;
    info!("added task {} ({}-{})", task.id, task.start_day, task.end_day);

    if json {
        print_task(&task, true)
    } else {
        println!("{}", task.id);
        Ok(())
    }
}

fn cmd_mv(args: MvArgs, data_dir: &Path, json: bool) -> CmdResult {
    let mut store = load_for_write(data_dir)?;
    let day = check_day(args.day)?;
    if store.move_to(args.id, day)? {
        save_tasks(data_dir, store.tasks())?;
        info!("moved task {} to day {}", args.id, day);
    }
    print_task(find_task(&store, args.id)?, json)
}

fn cmd_resize(args: ResizeArgs, data_dir: &Path, json: bool) -> CmdResult {
    let mut store = load_for_write(data_dir)?;
    let (edge, day) = match (args.start, args.end) {
        (Some(day), _) => (Edge::Start, day),
        (None, Some(day)) => (Edge::End, day),
        (None, None) => return Err("one of --start or --end is required".into()),
    };
    let day = check_day(day)?;

    if store.resize(args.id, edge, day)? {
        save_tasks(data_dir, store.tasks())?;
        info!("resized task {} ({:?} -> {})", args.id, edge, day);
    } else {
        let task = find_task(&store, args.id)?;
        match edge {
            Edge::Start if day > task.end_day => {
                return Err(format!(
                    "start day {} is after the end day {}",
                    day, task.end_day
                )
                .into());
            }
            Edge::End if day < task.start_day => {
                return Err(format!(
                    "end day {} is before the start day {}",
                    day, task.start_day
                )
                .into());
            }
            _ => {}
        }
    }
    print_task(find_task(&store, args.id)?, json)
}

fn cmd_edit(args: EditArgs, data_dir: &Path, json: bool) -> CmdResult {
    if args.name.is_none() && args.category.is_none() {
        return Err("nothing to change (use --name and/or --category)".into());
    }
    let mut store = load_for_write(data_dir)?;
    let current = find_task(&store, args.id)?;
    let draft = TaskDraft {
        name: args.name.unwrap_or_else(|| current.name.clone()),
        category: match args.category.as_deref() {
            Some(c) => parse_category(c)?,
            None => current.category,
        },
    };

    if store.update(args.id, draft)? {
        save_tasks(data_dir, store.tasks())?;
        info!("edited task {}", args.id);
    }
    print_task(find_task(&store, args.id)?, json)
}

fn cmd_clear(args: ClearArgs, data_dir: &Path) -> CmdResult {
    let mut store = load_store(data_dir);
    if !args.yes {
        return Err(format!(
            "refusing to delete {} task(s) without --yes",
            store.len()
        )
        .into());
    }
    let removed = store.clear();
    save_tasks(data_dir, store.tasks())?;
    info!("cleared {} tasks", removed);
    println!("Cleared {} task(s)", removed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_parse() {
        assert_eq!(parse_category("done"), Ok(Category::Completed));
        assert_eq!(parse_category("In Progress"), Ok(Category::InProgress));
        assert!(parse_category("later").is_err());
    }

    #[test]
    fn days_are_bounded() {
        assert_eq!(check_day(1), Ok(1));
        assert_eq!(check_day(31), Ok(31));
        assert!(check_day(0).is_err());
        assert!(check_day(32).is_err());
    }

    #[test]
    fn month_argument() {
        assert_eq!(
            parse_month("2026-10"),
            Ok(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap())
        );
        assert!(parse_month("2026-13").is_err());
        assert!(parse_month("october").is_err());
    }
}
