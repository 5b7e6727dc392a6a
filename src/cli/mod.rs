//! Command-line interface for taskmaster
//!
//! This module defines the CLI structure using clap derive macros.
//! Command handlers live in submodules, one per command family.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::pomodoro::{DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES};

mod analytics;
mod list;
mod pomodoro;
mod task;
mod transfer;

/// taskmaster - local task management
///
/// Tasks persist as JSON under the data directory; every mutating command
/// is a load-mutate-save cycle with a timestamped backup of the previous
/// file.
#[derive(Parser, Debug)]
#[command(name = "taskmaster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to ~/.taskmaster)
    #[arg(long, global = true, env = "TASKMASTER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new task
    Create {
        /// Task title
        title: String,

        /// Task description
        #[arg(short = 'd', long)]
        description: Option<String>,

        /// Priority: 1-4 or low, medium, high, urgent
        #[arg(short = 'p', long)]
        priority: Option<String>,

        /// Category label
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Estimated hours
        #[arg(short = 'e', long)]
        estimate: Option<f64>,

        /// Tags
        #[arg(short = 't', long, num_args = 1..)]
        tags: Vec<String>,
    },

    /// List tasks, optionally filtered
    List {
        /// Filter by status
        #[arg(short = 's', long)]
        status: Option<String>,

        /// Filter by minimum priority
        #[arg(short = 'p', long)]
        priority: Option<String>,

        /// Filter by category
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Only tasks due within a day (including overdue)
        #[arg(long)]
        due_soon: bool,

        /// Show the full detail block per task
        #[arg(long)]
        detailed: bool,
    },

    /// Show task details
    Show {
        /// Task id or unique prefix
        id: String,
    },

    /// Update fields on a task
    Update {
        /// Task id or unique prefix
        id: String,

        /// New title
        #[arg(short = 't', long)]
        title: Option<String>,

        /// New description
        #[arg(short = 'd', long)]
        description: Option<String>,

        /// New status: todo, in_progress, blocked, done, cancelled
        #[arg(short = 's', long)]
        status: Option<String>,

        /// New priority: 1-4 or low, medium, high, urgent
        #[arg(short = 'p', long)]
        priority: Option<String>,

        /// New category
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Mark task(s) as done
    Complete {
        /// Task ids or unique prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete task(s)
    #[command(alias = "remove")]
    Delete {
        /// Task ids or unique prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Apply the same update to multiple tasks
    BulkUpdate {
        /// Task ids or unique prefixes
        #[arg(required = true)]
        ids: Vec<String>,

        /// New status: todo, in_progress, blocked, done, cancelled
        #[arg(short = 's', long)]
        status: Option<String>,

        /// New priority: 1-4 or low, medium, high, urgent
        #[arg(short = 'p', long)]
        priority: Option<String>,

        /// New category
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Log worked hours against a task
    Time {
        /// Task id or unique prefix
        id: String,

        /// Hours worked (positive)
        hours: f64,
    },

    /// Run a Pomodoro work session against a task
    Pomodoro {
        /// Task id or unique prefix
        id: String,

        /// Work minutes
        #[arg(short = 'w', long = "work", default_value_t = DEFAULT_WORK_MINUTES)]
        work: u64,

        /// Break minutes
        #[arg(short = 'b', long = "break", default_value_t = DEFAULT_BREAK_MINUTES)]
        break_minutes: u64,
    },

    /// Search tasks by substring
    Search {
        /// Query matched against title, description, category, and tags
        query: String,
    },

    /// Show aggregate analytics
    Analytics,

    /// Export the task snapshot to a file
    Export {
        /// Destination path
        path: PathBuf,
    },

    /// Import tasks from a snapshot file, merging into the store
    Import {
        /// Source path
        path: PathBuf,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Create {
                title,
                description,
                priority,
                category,
                due,
                estimate,
                tags,
            } => task::run_create(task::CreateOptions {
                title,
                description,
                priority,
                category,
                due,
                estimate,
                tags,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List {
                status,
                priority,
                category,
                due_soon,
                detailed,
            } => list::run_list(list::ListOptions {
                status,
                priority,
                category,
                due_soon,
                detailed,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Show { id } => task::run_show(task::ShowOptions {
                id,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Update {
                id,
                title,
                description,
                status,
                priority,
                category,
                due,
            } => task::run_update(task::UpdateOptions {
                id,
                title,
                description,
                status,
                priority,
                category,
                due,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Complete { ids } => task::run_complete(task::CompleteOptions {
                ids,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Delete { ids } => task::run_delete(task::DeleteOptions {
                ids,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::BulkUpdate {
                ids,
                status,
                priority,
                category,
                due,
            } => task::run_bulk_update(task::BulkUpdateOptions {
                ids,
                status,
                priority,
                category,
                due,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Time { id, hours } => task::run_time(task::TimeOptions {
                id,
                hours,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Pomodoro {
                id,
                work,
                break_minutes,
            } => pomodoro::run(pomodoro::PomodoroOptions {
                id,
                work,
                break_minutes,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Search { query } => list::run_search(list::SearchOptions {
                query,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Analytics => analytics::run(analytics::AnalyticsOptions {
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Export { path } => transfer::run_export(transfer::ExportOptions {
                path,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Import { path } => transfer::run_import(transfer::ImportOptions {
                path,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}
