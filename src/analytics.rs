//! Aggregate statistics over a store snapshot.
//!
//! The engine borrows the task slice read-only and computes everything in
//! one pass; it never mutates the store.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::{Priority, Status, Task};

/// Category bucket for tasks without a category
pub const UNCATEGORIZED: &str = "none";

/// Read-only summary of a task set
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    /// completed / total; 0.0 for an empty store
    pub completion_rate: f64,
    pub overdue: usize,
    pub total_estimated_hours: f64,
    pub total_actual_hours: f64,
    /// Mean absolute percentage difference between actual and estimated
    /// hours, over tasks with a positive estimate. Absent when no task
    /// carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_accuracy: Option<f64>,
    pub by_status: BTreeMap<Status, usize>,
    pub by_priority: BTreeMap<u8, usize>,
    pub by_category: BTreeMap<String, usize>,
}

impl Summary {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let total = tasks.len();
        let mut completed = 0;
        let mut overdue = 0;
        let mut total_estimated_hours = 0.0;
        let mut total_actual_hours = 0.0;
        let mut deviation_sum = 0.0;
        let mut deviation_count = 0usize;
        let mut by_status: BTreeMap<Status, usize> = BTreeMap::new();
        let mut by_priority: BTreeMap<u8, usize> = BTreeMap::new();
        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();

        for task in tasks {
            if task.status == Status::Done {
                completed += 1;
            }
            if task.is_overdue(today) {
                overdue += 1;
            }

            total_actual_hours += task.actual_hours;
            if let Some(estimate) = task.estimated_hours {
                total_estimated_hours += estimate;
                if estimate > 0.0 {
                    deviation_sum += (task.actual_hours - estimate).abs() / estimate;
                    deviation_count += 1;
                }
            }

            *by_status.entry(task.status).or_insert(0) += 1;
            *by_priority.entry(task.priority.into()).or_insert(0) += 1;
            let category = task
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            *by_category.entry(category).or_insert(0) += 1;
        }

        let completion_rate = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        };
        let time_accuracy = if deviation_count == 0 {
            None
        } else {
            Some(deviation_sum / deviation_count as f64)
        };

        Self {
            total,
            completed,
            completion_rate,
            overdue,
            total_estimated_hours,
            total_actual_hours,
            time_accuracy,
            by_status,
            by_priority,
            by_category,
        }
    }

    pub fn status_count(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn priority_count(&self, priority: Priority) -> usize {
        self.by_priority.get(&priority.into()).copied().unwrap_or(0)
    }
}
