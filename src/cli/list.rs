//! taskmaster list and search command implementations.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::TaskFilter;
use crate::task::Task;

use super::task::{detail_lines, format_task_line, open_store, parse_priority, parse_status, today};

pub struct ListOptions {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due_soon: bool,
    pub detailed: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct SearchOptions {
    pub query: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let store = open_store(options.data_dir)?;
    let filter = TaskFilter {
        status: parse_status(options.status.as_deref())?,
        min_priority: parse_priority(options.priority.as_deref())?,
        category: options.category,
        due_within_days: options.due_soon.then_some(1),
    };

    let today = today();
    let tasks: Vec<&Task> = store.filter(&filter, today).collect();

    let mut human = HumanOutput::new(format!("{} task(s)", tasks.len()));
    for task in &tasks {
        if options.detailed {
            human.push_detail(format!("[{}] {}", task.id, task.title));
            for line in detail_lines(task, today) {
                human.push_detail(format!("  {line}"));
            }
        } else {
            human.push_detail(format_task_line(task, today));
        }
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &tasks,
        Some(&human),
    )
}

pub fn run_search(options: SearchOptions) -> Result<()> {
    let store = open_store(options.data_dir)?;
    let today = today();
    let tasks: Vec<&Task> = store.search(&options.query).collect();

    let mut human = HumanOutput::new(format!(
        "{} task(s) matching '{}'",
        tasks.len(),
        options.query
    ));
    for task in &tasks {
        human.push_detail(format_task_line(task, today));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "search",
        &tasks,
        Some(&human),
    )
}
