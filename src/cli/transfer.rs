//! taskmaster export and import command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

use super::task::open_store;

pub struct ExportOptions {
    pub path: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ImportOptions {
    pub path: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ExportView {
    path: String,
    exported: usize,
}

pub fn run_export(options: ExportOptions) -> Result<()> {
    let store = open_store(options.data_dir)?;
    let exported = store.export(&options.path)?;

    let view = ExportView {
        path: options.path.display().to_string(),
        exported,
    };

    let mut human = HumanOutput::new("Export complete");
    human.push_summary("Tasks", exported.to_string());
    human.push_summary("Path", view.path.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "export",
        &view,
        Some(&human),
    )
}

pub fn run_import(options: ImportOptions) -> Result<()> {
    let mut store = open_store(options.data_dir)?;
    let report = store.import(&options.path)?;

    let mut human = HumanOutput::new("Import complete");
    human.push_summary("Added", report.added.to_string());
    human.push_summary("Replaced", report.replaced.to_string());
    human.push_summary("Total", store.len().to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "import",
        &report,
        Some(&human),
    )
}
