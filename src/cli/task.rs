//! taskmaster task command implementations.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::config::StorePaths;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::{BulkOutcome, TaskStore};
use crate::task::{parse_due_date, DueState, Priority, Status, Task, TaskDraft, TaskPatch};

pub struct CreateOptions {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due: Option<String>,
    pub estimate: Option<f64>,
    pub tags: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct UpdateOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct CompleteOptions {
    pub ids: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub ids: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct BulkUpdateOptions {
    pub ids: Vec<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct TimeOptions {
    pub id: String,
    pub hours: f64,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Open the store for one command invocation
pub(crate) fn open_store(data_dir: Option<PathBuf>) -> Result<TaskStore> {
    let paths = StorePaths::resolve(data_dir)?;
    TaskStore::open(paths)
}

pub(super) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn run_create(options: CreateOptions) -> Result<()> {
    let mut store = open_store(options.data_dir)?;

    let draft = TaskDraft {
        title: options.title,
        description: options.description,
        priority: parse_priority(options.priority.as_deref())?,
        category: options.category,
        tags: options.tags,
        due_date: parse_due(options.due.as_deref())?,
        estimated_hours: options.estimate,
    };
    let id = store.create(draft)?;
    let task = store.get(&id)?;

    let mut human = HumanOutput::new("Task created");
    human.push_summary("ID", id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Priority", task.priority.to_string());
    if let Some(due) = task.due_date {
        human.push_summary("Due", due.to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "create",
        &task,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let store = open_store(options.data_dir)?;
    let task = store.get(&options.id)?;

    let mut human = HumanOutput::new(format!("[{}] {}", task.id, task.title));
    for line in detail_lines(task, today()) {
        human.push_detail(line);
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "show",
        &task,
        Some(&human),
    )
}

pub fn run_update(options: UpdateOptions) -> Result<()> {
    let mut store = open_store(options.data_dir)?;
    let patch = build_patch(
        options.title,
        options.description,
        options.status.as_deref(),
        options.priority.as_deref(),
        options.category,
        options.due.as_deref(),
    )?;

    let task = store.update(&options.id, patch)?;

    let mut human = HumanOutput::new("Task updated");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Status", task.status.to_string());
    human.push_summary("Priority", task.priority.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "update",
        &task,
        Some(&human),
    )
}

pub fn run_complete(options: CompleteOptions) -> Result<()> {
    let mut store = open_store(options.data_dir)?;
    let outcome = store.complete_many(&options.ids)?;
    emit_bulk(
        "complete",
        "Completed",
        outcome,
        options.json,
        options.quiet,
    )
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let mut store = open_store(options.data_dir)?;
    let outcome = store.delete_many(&options.ids)?;
    emit_bulk("delete", "Deleted", outcome, options.json, options.quiet)
}

pub fn run_bulk_update(options: BulkUpdateOptions) -> Result<()> {
    let patch = build_patch(
        None,
        None,
        options.status.as_deref(),
        options.priority.as_deref(),
        options.category,
        options.due.as_deref(),
    )?;
    if patch.is_empty() {
        return Err(Error::Validation(
            "no update fields specified; use -s, -p, -c, or --due".to_string(),
        ));
    }

    let mut store = open_store(options.data_dir)?;
    let outcome = store.update_many(&options.ids, &patch)?;
    emit_bulk(
        "bulk-update",
        "Updated",
        outcome,
        options.json,
        options.quiet,
    )
}

pub fn run_time(options: TimeOptions) -> Result<()> {
    let mut store = open_store(options.data_dir)?;
    let task = store.log_time(&options.id, options.hours)?;

    let mut human = HumanOutput::new(format!("Logged {} hours", options.hours));
    human.push_summary("ID", task.id.clone());
    human.push_summary("Total", format!("{:.1}h", task.actual_hours));
    if let Some(estimate) = task.estimated_hours {
        human.push_summary("Estimated", format!("{estimate:.1}h"));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "time",
        &task,
        Some(&human),
    )
}

#[derive(Serialize)]
struct BulkReportView {
    succeeded: Vec<String>,
    failed: Vec<BulkFailureView>,
}

#[derive(Serialize)]
struct BulkFailureView {
    input: String,
    error: String,
    code: i32,
}

/// Render a bulk report, then surface the first per-item failure (if any)
/// so the process exits with its code. Successes are already persisted.
fn emit_bulk(
    command: &str,
    verb: &str,
    outcome: BulkOutcome,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let view = BulkReportView {
        succeeded: outcome.succeeded.clone(),
        failed: outcome
            .failed
            .iter()
            .map(|failure| BulkFailureView {
                input: failure.input.clone(),
                error: failure.error.to_string(),
                code: failure.error.exit_code(),
            })
            .collect(),
    };

    let mut human = HumanOutput::new(format!(
        "{verb} {} task(s)",
        outcome.succeeded.len()
    ));
    if !outcome.succeeded.is_empty() {
        human.push_summary("Succeeded", outcome.succeeded.join(", "));
    }
    for failure in &outcome.failed {
        human.push_warning(format!("{}: {}", failure.input, failure.error));
    }

    emit_success(OutputOptions { json, quiet }, command, &view, Some(&human))?;

    match outcome.failed.into_iter().next() {
        Some(first) => Err(first.error),
        None => Ok(()),
    }
}

pub(super) fn parse_priority(value: Option<&str>) -> Result<Option<Priority>> {
    value.map(str::parse).transpose()
}

pub(super) fn parse_status(value: Option<&str>) -> Result<Option<Status>> {
    value.map(str::parse).transpose()
}

pub(super) fn parse_due(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value.map(parse_due_date).transpose()
}

fn build_patch(
    title: Option<String>,
    description: Option<String>,
    status: Option<&str>,
    priority: Option<&str>,
    category: Option<String>,
    due: Option<&str>,
) -> Result<TaskPatch> {
    Ok(TaskPatch {
        title,
        description,
        status: parse_status(status)?,
        priority: parse_priority(priority)?,
        category: category.map(Some),
        due_date: parse_due(due)?,
    })
}

pub(super) fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let mut line = format!(
        "[{}] {:<11} p{} {}",
        task.id,
        task.status.as_str(),
        u8::from(task.priority),
        task.title
    );
    if let Some(category) = &task.category {
        line.push_str(&format!(" ({category})"));
    }
    match task.due_state(today) {
        Some(DueState::Overdue(days)) => line.push_str(&format!(" OVERDUE by {days} day(s)")),
        Some(DueState::Today) => line.push_str(" due today"),
        Some(DueState::Tomorrow) => line.push_str(" due tomorrow"),
        Some(DueState::InDays(days)) => line.push_str(&format!(" due in {days} days")),
        None => {}
    }
    line
}

pub(super) fn detail_lines(task: &Task, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        format!("Status: {}", task.status),
        format!("Priority: {}", task.priority),
    ];
    if let Some(category) = &task.category {
        lines.push(format!("Category: {category}"));
    }
    if !task.tags.is_empty() {
        let tags: Vec<&str> = task.tags.iter().map(String::as_str).collect();
        lines.push(format!("Tags: {}", tags.join(", ")));
    }
    if let Some(due) = task.due_date {
        let proximity = match task.due_state(today) {
            Some(DueState::Overdue(days)) => format!(" (overdue by {days} day(s))"),
            Some(DueState::Today) => " (today)".to_string(),
            Some(DueState::Tomorrow) => " (tomorrow)".to_string(),
            Some(DueState::InDays(days)) => format!(" (in {days} days)"),
            None => String::new(),
        };
        lines.push(format!("Due: {due}{proximity}"));
    }
    match task.estimated_hours {
        Some(estimate) => lines.push(format!(
            "Time: {:.1}h logged / {estimate:.1}h estimated",
            task.actual_hours
        )),
        None => lines.push(format!("Time: {:.1}h logged", task.actual_hours)),
    }
    lines.push(format!(
        "Created: {}",
        task.created_at.format("%Y-%m-%d %H:%M")
    ));
    lines.push(format!(
        "Updated: {}",
        task.updated_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(completed_at) = task.completed_at {
        lines.push(format!(
            "Completed: {}",
            completed_at.format("%Y-%m-%d %H:%M")
        ));
    }
    if let Some(description) = &task.description {
        lines.push(format!("Description: {description}"));
    }
    lines
}
