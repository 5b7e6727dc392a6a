//! taskmaster - Task Management Library
//!
//! This library provides the core functionality for the taskmaster CLI
//! tool: a local, single-user task store persisted as JSON on disk.
//!
//! # Core Concepts
//!
//! - **Tasks**: Validated records with status, priority, tags, due dates,
//!   and accumulated time tracking
//! - **Partial IDs**: Any unique prefix of a task id works on the command
//!   line; canonical ids are always full-length
//! - **Snapshot Persistence**: Each invocation is a load-mutate-save cycle
//!   with a timestamped backup of the previous file before every save
//! - **Analytics**: Read-only aggregate statistics over the current store
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Data-directory resolution and `config.toml` loading
//! - `error`: Error types, exit codes, and result aliases
//! - `task`: Task entity with validated construction and mutation
//! - `resolver`: Partial-id resolution
//! - `store`: Task collection, persistence, CRUD, filter, and search
//! - `analytics`: Summary computation over a store snapshot
//! - `pomodoro`: Work-session timer wrapper
//! - `output`: Human and JSON output formatting

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pomodoro;
pub mod resolver;
pub mod store;
pub mod task;

pub use error::{Error, Result};
