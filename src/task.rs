//! Task entity for taskmaster.
//!
//! A task is a single trackable unit of work with status, priority, and
//! optional scheduling metadata. Construction and every field mutation go
//! through validation; `updated_at` refreshes on each mutation and
//! `completed_at` records the first transition to done.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Task lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    InProgress,
    Blocked,
    Done,
    Cancelled,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Todo,
        Status::InProgress,
        Status::Blocked,
        Status::Done,
        Status::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Blocked => "blocked",
            Status::Done => "done",
            Status::Cancelled => "cancelled",
        }
    }

    /// Statuses that no longer count against overdue reporting
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Done | Status::Cancelled)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Status::Todo),
            "in_progress" => Ok(Status::InProgress),
            "blocked" => Ok(Status::Blocked),
            "done" => Ok(Status::Done),
            "cancelled" => Ok(Status::Cancelled),
            other => Err(Error::Validation(format!(
                "unknown status '{other}' (expected todo, in_progress, blocked, done, or cancelled)"
            ))),
        }
    }
}

/// Task priority, persisted as the integer 1-4
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
    Urgent = 4,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> u8 {
        priority as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            4 => Ok(Priority::Urgent),
            other => Err(Error::Validation(format!(
                "priority must be 1-4, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", *self as u8, self.name())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Priority::try_from(value);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(Error::Validation(format!(
                "unknown priority '{other}' (expected 1-4 or low, medium, high, urgent)"
            ))),
        }
    }
}

/// A single trackable unit of work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub actual_hours: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Validated construction input for a new task
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: Option<f64>,
}

/// Typed field update: one optional slot per mutable field.
///
/// `category` uses a nested Option so a patch can distinguish "leave as is"
/// from "clear the category".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<Option<String>>,
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
    }
}

/// Due-date proximity relative to a reference day, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueState {
    Overdue(i64),
    Today,
    Tomorrow,
    InDays(i64),
}

impl Task {
    /// Build a validated task. The id is assigned by the store.
    pub fn new(id: String, draft: TaskDraft) -> Result<Self> {
        let title = validate_title(&draft.title)?;
        if let Some(estimate) = draft.estimated_hours {
            validate_estimate(estimate)?;
        }

        let now = Utc::now();
        Ok(Self {
            id,
            title,
            description: draft.description,
            status: Status::Todo,
            priority: draft.priority.unwrap_or_default(),
            category: draft.category,
            tags: draft.tags.into_iter().collect(),
            due_date: draft.due_date,
            estimated_hours: draft.estimated_hours,
            actual_hours: 0.0,
            created_at: now,
            updated_at: now,
            completed_at: None,
        })
    }

    /// Apply a field update, refreshing `updated_at`.
    ///
    /// `completed_at` is set on the first transition to done and never
    /// cleared by later status changes.
    pub fn apply(&mut self, patch: TaskPatch) -> Result<()> {
        if let Some(title) = &patch.title {
            self.title = validate_title(title)?;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(status) = patch.status {
            self.status = status;
            if status == Status::Done && self.completed_at.is_none() {
                self.completed_at = Some(Utc::now());
            }
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Add worked hours. Rejects zero, negative, and non-finite values.
    pub fn log_time(&mut self, hours: f64) -> Result<()> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(Error::Validation(format!(
                "hours must be a positive number, got {hours}"
            )));
        }
        self.actual_hours += hours;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Due-date proximity relative to `today`, if a due date is set
    pub fn due_state(&self, today: NaiveDate) -> Option<DueState> {
        let due = self.due_date?;
        let days = (due - today).num_days();
        Some(match days {
            d if d < 0 => DueState::Overdue(-d),
            0 => DueState::Today,
            1 => DueState::Tomorrow,
            d => DueState::InDays(d),
        })
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        matches!(self.due_state(today), Some(DueState::Overdue(_))) && !self.status.is_terminal()
    }
}

fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("title cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn validate_estimate(hours: f64) -> Result<()> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(Error::Validation(format!(
            "estimated hours must be non-negative, got {hours}"
        )));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` due date string
pub fn parse_due_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT)
        .map_err(|_| Error::Validation(format!("invalid due date '{value}' (expected YYYY-MM-DD)")))
}
