use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::task::Priority;
use crate::ops::sort::SortKey;

#[derive(Parser)]
#[command(name = "sprig", about = concat!("sprig v", env!("CARGO_PKG_VERSION"), " - nested todos in a plain JSON file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to operate on (default: todos.json)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the task tree
    List,
    /// Add a task at the top level, or under another task
    Add(AddArgs),
    /// Edit a task's text, priority, or due date
    Edit(EditArgs),
    /// Mark a task done (cascades to all its subtasks)
    Done(PathArg),
    /// Mark a task not done (cascades to all its subtasks)
    Undone(PathArg),
    /// Remove a task and its whole subtree
    Rm(PathArg),
    /// Remove completed top-level tasks, or everything with --all
    Clear(ClearArgs),
    /// Choose the sort key and direction
    Sort(SortArgs),
    /// Show task counts
    Stats,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
    /// Priority: low, medium, high, or critical
    #[arg(long, default_value = "medium")]
    pub priority: Priority,
    /// Due date as YYYY-MM-DD
    #[arg(long, default_value = "", value_parser = parse_due_date)]
    pub due: String,
    /// Add as a subtask of the task at this display path (e.g. 2.1)
    #[arg(long)]
    pub under: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Display path of the task (e.g. 2.1)
    pub path: String,
    /// New text
    #[arg(long)]
    pub text: Option<String>,
    /// New priority
    #[arg(long)]
    pub priority: Option<Priority>,
    /// New due date as YYYY-MM-DD (pass an empty string to clear it)
    #[arg(long, value_parser = parse_due_date)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct PathArg {
    /// Display path of the task (e.g. 2.1)
    pub path: String,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Remove every task, not just completed top-level ones
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct SortArgs {
    /// Sort key: created, priority, due, or name
    pub key: SortKey,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

/// Accept an empty string (no due date) or a real calendar date in
/// zero-padded `YYYY-MM-DD` form. The padding is load-bearing: due-date
/// ordering is lexicographic on the stored string.
fn parse_due_date(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Ok(String::new());
    }
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) if date.format("%Y-%m-%d").to_string() == s => Ok(s.to_string()),
        _ => Err(format!("due date must be YYYY-MM-DD, got '{}'", s)),
    }
}
