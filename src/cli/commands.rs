use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "td",
    about = concat!("[#] taskdeck v", env!("CARGO_PKG_VERSION"), " - kanban, list, and calendar in your terminal"),
    version
)]
pub struct Cli {
    /// No subcommand launches the TUI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Remote store base URL (overrides config.toml)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Data directory for the offline cache (overrides config.toml)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Skip the remote store; work against the offline cache only
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Search tasks by substring (title, notes, project)
    Search(SearchArgs),
    /// Mark a task done
    Done(DoneArgs),
    /// Show task statistics
    Stats,
    /// Export the current document to a timestamped JSON file
    Export(ExportArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Project reference
    #[arg(long)]
    pub project: Option<String>,
    /// Assignee reference
    #[arg(long)]
    pub assignee: Option<String>,
    /// Priority (p0, p1, p2, p3; default p2)
    #[arg(long)]
    pub priority: Option<String>,
    /// Status (backlog, todo, doing, review, done; default todo)
    #[arg(long)]
    pub status: Option<String>,
    /// Deadline as YYYY-MM-DD
    #[arg(long)]
    pub deadline: Option<String>,
    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by project (exact match)
    #[arg(long)]
    pub project: Option<String>,
    /// Filter by assignee (exact match)
    #[arg(long)]
    pub assignee: Option<String>,
    /// Filter by priority (p0..p3)
    #[arg(long)]
    pub priority: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Substring to search for (case-insensitive)
    pub query: String,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Task id
    pub id: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output path (default: taskdeck-export-<timestamp>.json)
    pub path: Option<PathBuf>,
}
