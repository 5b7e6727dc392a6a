//! taskmaster analytics command implementation.

use std::path::PathBuf;

use crate::analytics::Summary;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{Priority, Status};

use super::task::{open_store, today};

pub struct AnalyticsOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(options: AnalyticsOptions) -> Result<()> {
    let store = open_store(options.data_dir)?;
    let summary = Summary::compute(store.tasks(), today());

    let mut human = HumanOutput::new("Task analytics");
    human.push_summary("Total", summary.total.to_string());
    human.push_summary(
        "Completed",
        format!(
            "{} ({:.1}%)",
            summary.completed,
            summary.completion_rate * 100.0
        ),
    );
    human.push_summary("Overdue", summary.overdue.to_string());
    human.push_summary(
        "Time",
        format!(
            "{:.1}h logged / {:.1}h estimated",
            summary.total_actual_hours, summary.total_estimated_hours
        ),
    );
    if let Some(accuracy) = summary.time_accuracy {
        human.push_summary(
            "Estimate deviation",
            format!("{:.1}% mean absolute", accuracy * 100.0),
        );
    }

    for status in Status::ALL {
        let count = summary.status_count(status);
        if count > 0 {
            human.push_detail(format!("{}: {count}", status));
        }
    }
    for priority in Priority::ALL {
        let count = summary.priority_count(priority);
        if count > 0 {
            human.push_detail(format!("{}: {count}", priority.name()));
        }
    }
    for (category, count) in &summary.by_category {
        human.push_detail(format!("category {category}: {count}"));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "analytics",
        &summary,
        Some(&human),
    )
}
