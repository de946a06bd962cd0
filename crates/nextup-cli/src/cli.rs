use clap::{Parser, Subcommand, ValueEnum};

/// A personal task scheduler with repeat rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the next date of a repeat rule
    NextDate(NextDateCommand),
    /// Show the upcoming dates of a repeat rule
    Preview(PreviewCommand),
    /// Add a new task
    Add(AddCommand),
    /// List upcoming tasks or search them
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as done
    Done(DoneCommand),
    /// Delete a task
    Delete(DeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct NextDateCommand {
    /// The task's own date (YYYYMMDD)
    #[arg(long)]
    pub date: String,
    /// The date the result must come after (YYYYMMDD)
    #[arg(long)]
    pub now: String,
    /// The repeat rule, e.g. "d 7" or "m 1,-1"
    #[arg(long)]
    pub repeat: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// The repeat rule
    pub repeat: String,
    /// Start date (YYYYMMDD), defaults to today
    #[arg(long)]
    pub from: Option<String>,
    /// Number of dates to show
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The date of the task (YYYYMMDD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// A comment for the task
    #[arg(short, long)]
    pub comment: Option<String>,
    /// Raw repeat rule (y, d N, w 1,2..., m 1,-1 [months])
    #[arg(short, long, conflicts_with = "every")]
    pub repeat: Option<String>,
    /// Human-friendly repeat rule
    #[arg(long, value_enum)]
    pub every: Option<RepeatShortcut>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Text to search for, or a date as DD.MM.YYYY
    #[arg(short, long)]
    pub search: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task
    pub id: i64,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long)]
    pub repeat: Option<String>,
    #[arg(long, conflicts_with = "repeat", help = "Remove the repeat rule")]
    pub repeat_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as done
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Force deletion without confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Human-friendly repeat patterns
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatShortcut {
    /// Every day
    Daily,
    /// Every week on the task's weekday
    Weekly,
    /// Every month on the task's day of month
    Monthly,
    /// Every year on the task's date
    Yearly,
    /// Monday to Friday
    Weekdays,
    /// Saturday and Sunday
    Weekends,
}

impl RepeatShortcut {
    /// Converts the shortcut to a repeat rule anchored on `date`.
    pub fn to_rule(self, date: chrono::NaiveDate) -> String {
        use chrono::Datelike;

        match self {
            RepeatShortcut::Daily => "d 1".to_string(),
            RepeatShortcut::Weekly => format!("w {}", date.weekday().number_from_monday()),
            RepeatShortcut::Monthly => format!("m {}", date.day()),
            RepeatShortcut::Yearly => "y".to_string(),
            RepeatShortcut::Weekdays => "w 1,2,3,4,5".to_string(),
            RepeatShortcut::Weekends => "w 6,7".to_string(),
        }
    }
}
