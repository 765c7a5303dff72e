use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::models::{Priority, PriorityFilter, StatusFilter, DUE_DATE_FORMAT};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "tasklist",
    version = VERSION,
    about = "Small personal task list with filters and search",
    after_help = "\
NOTE:
  Data lives in <project>/.tasklist/tasklist.db, found by walking up from the
  current directory (or --dir). Run `tasklist init` once per project.

EXIT CODES:
  0  Success (including toggle/delete/edit of an unknown ID, which is a no-op)
  1  Error (not initialized, empty title, ambiguous ID, etc.)

BEHAVIOR NOTES:
  `edit` removes the task immediately and stages its values. The next `add`
  saves them as a new task with a new ID. Abandoning the edit loses the task.
  Use `update` to change a task in place instead.
  Save failures are not fatal: the command still succeeds and reports
  `persisted: false` in JSON output. Set TASKLIST_LOG=warn to see them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Project directory (default: search upward from the current directory)
    #[arg(long, global = true, env = "TASKLIST_DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize tasklist in this directory
    Init,

    #[command(flatten)]
    Task(TaskCommands),

    /// List tasks matching the filters, with statistics
    List {
        /// Completion filter: all, pending, completed
        #[arg(long, default_value = "all", value_parser = parse_status_filter)]
        status: StatusFilter,

        /// Priority filter: all, low, medium, high
        #[arg(long, default_value = "all", value_parser = parse_priority_filter)]
        priority: PriorityFilter,

        /// Case-insensitive substring of the title
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show task counts over the whole list
    Stats,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task (uses staged values from `edit` as defaults)
    Add {
        /// Task title
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Show task details
    Show {
        /// Task ID or its trailing characters
        id: String,
    },
    /// Toggle a task between pending and completed
    Toggle {
        /// Task ID or its trailing characters
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID or its trailing characters
        id: String,
    },
    /// Remove a task and stage its values for the next `add`
    Edit {
        /// Task ID or its trailing characters
        id: String,
    },
    /// Change a task in place, keeping its ID
    Update {
        /// Task ID or its trailing characters
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
}

#[derive(Args, Debug, Default)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    /// low, medium, high
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub category: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_due)]
    pub due: Option<NaiveDate>,
    /// Remove the due date
    #[arg(long, conflicts_with = "due")]
    pub clear_due: bool,
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::from_str(s)
        .ok_or_else(|| format!("invalid priority '{s}' (expected low, medium, high)"))
}

fn parse_priority_filter(s: &str) -> Result<PriorityFilter, String> {
    PriorityFilter::from_str(s)
        .ok_or_else(|| format!("invalid priority filter '{s}' (expected all, low, medium, high)"))
}

fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    StatusFilter::from_str(s)
        .ok_or_else(|| format!("invalid status filter '{s}' (expected all, pending, completed)"))
}

fn parse_due(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DUE_DATE_FORMAT).map_err(|e| format!("invalid date '{s}': {e}"))
}
