//! Task store: the authoritative collection plus durable persistence.
//!
//! Each CLI invocation is a load-mutate-save cycle over a single JSON
//! snapshot file. Before every save the previous file is copied into the
//! backup directory with a sortable timestamp suffix; the snapshot itself
//! is then written atomically (temp file + rename). Concurrent invocations
//! are out of scope: last writer wins, and backups are best-effort.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::StorePaths;
use crate::error::{Error, Result};
use crate::resolver;
use crate::task::{Priority, Status, Task, TaskDraft, TaskPatch};

pub const SNAPSHOT_SCHEMA_VERSION: &str = "taskmaster.v1";
const TASK_ID_LEN: usize = 8;
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// On-disk snapshot layout: schema header plus all tasks in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

impl Snapshot {
    fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            tasks,
        }
    }
}

/// Criteria for `TaskStore::filter`; unset fields are not constraints
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub min_priority: Option<Priority>,
    pub category: Option<String>,
    pub due_within_days: Option<i64>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.min_priority.is_none()
            && self.category.is_none()
            && self.due_within_days.is_none()
    }

    fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(min_priority) = self.min_priority {
            if task.priority < min_priority {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if task.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(days) = self.due_within_days {
            let horizon = today + chrono::Duration::days(days);
            match task.due_date {
                Some(due) if due <= horizon => {}
                _ => return false,
            }
        }
        true
    }
}

/// Per-item result of a bulk operation
#[derive(Debug)]
pub struct BulkFailure {
    pub input: String,
    pub error: Error,
}

/// Aggregated bulk report: best-effort, one entry per input
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn record(&mut self, input: &str, result: Result<String>) {
        match result {
            Ok(id) => self.succeeded.push(id),
            Err(error) => self.failed.push(BulkFailure {
                input: input.to_string(),
                error,
            }),
        }
    }
}

/// Result of importing a snapshot into the store
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub replaced: usize,
}

/// Owns all tasks and the persistence discipline around them
#[derive(Debug)]
pub struct TaskStore {
    paths: StorePaths,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load the store from its data file. A missing file is an empty
    /// store; an unparsable file aborts with `CorruptData` and is left
    /// untouched on disk.
    pub fn open(paths: StorePaths) -> Result<Self> {
        let tasks = match read_snapshot(&paths.data_file)? {
            Some(snapshot) => snapshot.tasks,
            None => Vec::new(),
        };

        let store = Self { paths, tasks };
        store.check_unique_ids()?;
        tracing::debug!(tasks = store.tasks.len(), "store loaded");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn data_file(&self) -> &Path {
        &self.paths.data_file
    }

    /// Resolve a full id or unique prefix to a canonical id
    pub fn resolve(&self, input: &str) -> Result<String> {
        resolver::resolve(input, self.tasks.iter().map(|task| task.id.as_str()))
    }

    pub fn get(&self, id_or_prefix: &str) -> Result<&Task> {
        let id = self.resolve(id_or_prefix)?;
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// Create a task from a validated draft, assign a fresh unique id,
    /// and persist. Returns the new id.
    pub fn create(&mut self, draft: TaskDraft) -> Result<String> {
        let id = self.generate_task_id();
        let task = Task::new(id.clone(), draft)?;
        self.tasks.push(task);
        self.save()?;
        Ok(id)
    }

    /// Apply a field update to one task and persist
    pub fn update(&mut self, id_or_prefix: &str, patch: TaskPatch) -> Result<&Task> {
        let id = self.resolve(id_or_prefix)?;
        let task = self.task_mut(&id)?;
        task.apply(patch)?;
        self.save()?;
        self.get(&id)
    }

    /// Add worked hours to one task and persist
    pub fn log_time(&mut self, id_or_prefix: &str, hours: f64) -> Result<&Task> {
        let id = self.resolve(id_or_prefix)?;
        let task = self.task_mut(&id)?;
        task.log_time(hours)?;
        self.save()?;
        self.get(&id)
    }

    /// Delete every input that resolves; failures never abort the rest.
    /// Saves once if anything was deleted.
    pub fn delete_many(&mut self, inputs: &[String]) -> Result<BulkOutcome> {
        let mut outcome = BulkOutcome::default();
        for input in inputs {
            let result = self.resolve(input).map(|id| {
                self.tasks.retain(|task| task.id != id);
                id
            });
            outcome.record(input, result);
        }
        if !outcome.succeeded.is_empty() {
            self.save()?;
        }
        Ok(outcome)
    }

    /// Mark every input that resolves as done. Completing an already-done
    /// task succeeds without touching it.
    pub fn complete_many(&mut self, inputs: &[String]) -> Result<BulkOutcome> {
        let mut outcome = BulkOutcome::default();
        let mut changed = false;
        for input in inputs {
            let result = self.resolve(input).and_then(|id| {
                let task = self.task_mut(&id)?;
                if task.status != Status::Done {
                    let patch = TaskPatch {
                        status: Some(Status::Done),
                        ..TaskPatch::default()
                    };
                    task.apply(patch)?;
                    changed = true;
                }
                Ok(id)
            });
            outcome.record(input, result);
        }
        if changed {
            self.save()?;
        }
        Ok(outcome)
    }

    /// Apply the same patch to every input that resolves
    pub fn update_many(&mut self, inputs: &[String], patch: &TaskPatch) -> Result<BulkOutcome> {
        let mut outcome = BulkOutcome::default();
        for input in inputs {
            let result = self.resolve(input).and_then(|id| {
                let task = self.task_mut(&id)?;
                task.apply(patch.clone())?;
                Ok(id)
            });
            outcome.record(input, result);
        }
        if !outcome.succeeded.is_empty() {
            self.save()?;
        }
        Ok(outcome)
    }

    /// Lazily iterate tasks matching all provided criteria, in insertion
    /// order
    pub fn filter<'a>(
        &'a self,
        filter: &'a TaskFilter,
        today: NaiveDate,
    ) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks
            .iter()
            .filter(move |task| filter.matches(task, today))
    }

    /// Case-insensitive substring search over title, description,
    /// category, and tags, in insertion order
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Task> + 'a {
        let needle = query.to_lowercase();
        self.tasks
            .iter()
            .filter(move |task| matches_query(task, &needle))
    }

    /// Write the current snapshot to an arbitrary path. Returns the number
    /// of exported tasks.
    pub fn export(&self, path: &Path) -> Result<usize> {
        let snapshot = Snapshot::from_tasks(self.tasks.clone());
        let json = serde_json::to_string_pretty(&snapshot)?;
        write_atomic(path, json.as_bytes())?;
        Ok(snapshot.tasks.len())
    }

    /// Merge a snapshot file into the store: same-id tasks are replaced in
    /// place, new tasks are appended. Persists on success.
    pub fn import(&mut self, path: &Path) -> Result<ImportReport> {
        let snapshot = read_snapshot(path)?.ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("import file not found: {}", path.display()),
            ))
        })?;

        let mut report = ImportReport {
            added: 0,
            replaced: 0,
        };
        for task in snapshot.tasks {
            match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
                Some(existing) => {
                    *existing = task;
                    report.replaced += 1;
                }
                None => {
                    self.tasks.push(task);
                    report.added += 1;
                }
            }
        }
        self.save()?;
        Ok(report)
    }

    /// Persist the full snapshot: back up the previous file (best-effort),
    /// then write atomically.
    pub fn save(&self) -> Result<()> {
        self.backup_existing();

        let snapshot = Snapshot::from_tasks(self.tasks.clone());
        let json = serde_json::to_string_pretty(&snapshot)?;
        write_atomic(&self.paths.data_file, json.as_bytes())?;
        tracing::debug!(tasks = snapshot.tasks.len(), "snapshot saved");
        Ok(())
    }

    /// Copy the current data file into the backup directory. Failures are
    /// logged and never block the primary write.
    fn backup_existing(&self) {
        if !self.paths.data_file.exists() {
            return;
        }

        let name = format!(
            "tasks_backup_{}.json",
            Utc::now().format(BACKUP_TIMESTAMP_FORMAT)
        );
        let backup_path = self.paths.backup_dir.join(&name);
        let result = fs::create_dir_all(&self.paths.backup_dir)
            .and_then(|_| fs::copy(&self.paths.data_file, &backup_path));
        match result {
            Ok(_) => {
                tracing::debug!(backup = %backup_path.display(), "backup written");
                self.prune_backups();
            }
            Err(err) => {
                tracing::warn!(error = %err, "backup failed; continuing with save");
            }
        }
    }

    /// Drop the oldest backups beyond the configured retention count
    fn prune_backups(&self) {
        let Some(keep) = self.paths.backups_keep else {
            return;
        };

        let entries = match fs::read_dir(&self.paths.backup_dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "backup pruning skipped");
                return;
            }
        };

        let mut backups: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with("tasks_backup_") && name.ends_with(".json"))
                    .unwrap_or(false)
            })
            .collect();

        if backups.len() <= keep {
            return;
        }

        // Timestamp-suffixed names sort chronologically.
        backups.sort();
        let excess = backups.len() - keep;
        for path in backups.into_iter().take(excess) {
            if let Err(err) = fs::remove_file(&path) {
                tracing::warn!(backup = %path.display(), error = %err, "backup pruning failed");
            }
        }
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn generate_task_id(&self) -> String {
        loop {
            let full = Uuid::new_v4().simple().to_string();
            let id = full[..TASK_ID_LEN].to_string();
            if !self.tasks.iter().any(|task| task.id == id) {
                return id;
            }
        }
    }

    fn check_unique_ids(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(Error::CorruptData {
                    path: self.paths.data_file.clone(),
                    detail: format!("duplicate task id '{}'", task.id),
                });
            }
        }
        Ok(())
    }
}

fn matches_query(task: &Task, needle: &str) -> bool {
    if task.title.to_lowercase().contains(needle) {
        return true;
    }
    if let Some(description) = &task.description {
        if description.to_lowercase().contains(needle) {
            return true;
        }
    }
    if let Some(category) = &task.category {
        if category.to_lowercase().contains(needle) {
            return true;
        }
    }
    task.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

fn read_snapshot(path: &Path) -> Result<Option<Snapshot>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&content).map_err(|err| Error::CorruptData {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;
    if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(Error::CorruptData {
            path: path.to_path_buf(),
            detail: format!("unsupported schema_version '{}'", snapshot.schema_version),
        });
    }
    Ok(Some(snapshot))
}

/// Write data atomically using temp file + rename, so readers never see a
/// partial snapshot and a failed write leaves the previous file intact.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
