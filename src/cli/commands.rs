use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "plancal", about = concat!("plancal v", env!("CARGO_PKG_VERSION"), " - drag to plan, drag to reschedule"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep tasks in a different data directory
    #[arg(short = 'D', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks, optionally filtered like the calendar view
    List(ListArgs),
    /// Add a task over a range of days
    Add(AddArgs),
    /// Move a task to a new start day (keeps its length)
    Mv(MvArgs),
    /// Move one edge of a task
    Resize(ResizeArgs),
    /// Change a task's name or category
    Edit(EditArgs),
    /// Print a month calendar with per-day task counts
    Month(MonthArgs),
    /// Delete every saved task
    Clear(ClearArgs),
    /// Show the recovery log
    Recovery,
}

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive substring of the task name
    #[arg(long)]
    pub search: Option<String>,
    /// Hide a category (repeatable)
    #[arg(long, value_name = "CATEGORY")]
    pub hide: Vec<String>,
    /// Only tasks starting within N weeks of today (1-3)
    #[arg(long, value_name = "N")]
    pub within: Option<u32>,
    /// Day of month to treat as today (defaults to the local date)
    #[arg(long, value_name = "DAY")]
    pub today: Option<u32>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,
    /// First day
    #[arg(long, value_name = "DAY")]
    pub start: u32,
    /// Last day (defaults to the start day)
    #[arg(long, value_name = "DAY")]
    pub end: Option<u32>,
    /// Category (todo, in-progress, review, completed)
    #[arg(long, default_value = "To Do")]
    pub category: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task ID
    pub id: u64,
    /// New start day
    pub day: u32,
}

#[derive(Args)]
pub struct ResizeArgs {
    /// Task ID
    pub id: u64,
    /// New first day
    #[arg(long, value_name = "DAY", conflicts_with = "end", required_unless_present = "end")]
    pub start: Option<u32>,
    /// New last day
    #[arg(long, value_name = "DAY")]
    pub end: Option<u32>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: u64,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct MonthArgs {
    /// Month to show, as YYYY-MM (defaults to the current month)
    pub month: Option<String>,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Required: confirms that all tasks should be deleted
    #[arg(long)]
    pub yes: bool,
}
