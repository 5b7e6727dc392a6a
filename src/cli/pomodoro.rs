//! taskmaster pomodoro command implementation.
//!
//! The countdown itself has no data-model impact; the store is written
//! once, after the work interval completes. Killing the session mid-way
//! logs nothing.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::pomodoro::PomodoroTimer;

use super::task::open_store;

pub struct PomodoroOptions {
    pub id: String,
    pub work: u64,
    pub break_minutes: u64,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct PomodoroView {
    id: String,
    work_minutes: u64,
    break_minutes: u64,
    logged_hours: f64,
    total_hours: f64,
}

pub fn run(options: PomodoroOptions) -> Result<()> {
    let mut store = open_store(options.data_dir)?;
    let timer = PomodoroTimer::new(options.work, options.break_minutes)?;

    // Resolve up front so a bad id fails before the countdown starts.
    let id = store.resolve(&options.id)?;
    let title = store.get(&id)?.title.clone();

    let show_progress = !options.quiet && !options.json;
    if show_progress {
        println!(
            "Starting {}-minute session for [{id}] {title}",
            timer.work_minutes()
        );
    }
    timer.run_work_interval(|remaining| {
        if show_progress {
            println!("{remaining} minute(s) remaining");
        }
    });

    let task = store.log_time(&id, timer.work_hours())?;

    let view = PomodoroView {
        id: id.clone(),
        work_minutes: timer.work_minutes(),
        break_minutes: timer.break_minutes(),
        logged_hours: timer.work_hours(),
        total_hours: task.actual_hours,
    };

    let mut human = HumanOutput::new("Session complete");
    human.push_summary("ID", id);
    human.push_summary("Logged", format!("{:.2}h", view.logged_hours));
    human.push_summary("Total", format!("{:.1}h", view.total_hours));
    human.push_detail(format!(
        "Take a {}-minute break",
        timer.break_minutes()
    ));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "pomodoro",
        &view,
        Some(&human),
    )
}
