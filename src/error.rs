//! Error types for taskmaster
//!
//! Exit codes:
//! - 0: Success
//! - 2: Validation failure (bad field value, bad argument, bad config)
//! - 3: No task matches the given id or prefix
//! - 4: Prefix matches more than one task
//! - 5: Data file exists but cannot be parsed
//! - 6: Filesystem failure (save, backup, export, import)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the taskmaster CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const AMBIGUOUS_ID: i32 = 4;
    pub const CORRUPT_DATA: i32 = 5;
    pub const IO: i32 = 6;
}

/// Main error type for taskmaster operations
#[derive(Error, Debug)]
pub enum Error {
    // Validation failures (exit code 2)
    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Lookup failures (exit codes 3 and 4)
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Ambiguous task id '{input}': matches {}", candidates.join(", "))]
    AmbiguousId {
        input: String,
        candidates: Vec<String>,
    },

    // Data failures (exit code 5)
    #[error("Data file is corrupt: {path}: {detail}")]
    CorruptData { path: PathBuf, detail: String },

    // Filesystem failures (exit code 6)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) | Error::InvalidConfig(_) => exit_codes::VALIDATION,
            Error::NotFound(_) => exit_codes::NOT_FOUND,
            Error::AmbiguousId { .. } => exit_codes::AMBIGUOUS_ID,
            Error::CorruptData { .. } => exit_codes::CORRUPT_DATA,
            Error::Io(_) | Error::Json(_) => exit_codes::IO,
        }
    }

    /// Extra machine-readable context for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::AmbiguousId { candidates, .. } => {
                Some(serde_json::json!({ "candidates": candidates }))
            }
            Error::CorruptData { path, .. } => {
                Some(serde_json::json!({ "path": path.display().to_string() }))
            }
            _ => None,
        }
    }
}

/// Result type alias for taskmaster operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable_per_variant() {
        assert_eq!(
            Error::Validation("priority".to_string()).exit_code(),
            exit_codes::VALIDATION
        );
        assert_eq!(
            Error::NotFound("zzz".to_string()).exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            Error::AmbiguousId {
                input: "a1".to_string(),
                candidates: vec!["a1b2c3d4".to_string(), "a1b9f0e1".to_string()],
            }
            .exit_code(),
            exit_codes::AMBIGUOUS_ID
        );
        assert_eq!(
            Error::CorruptData {
                path: PathBuf::from("tasks.json"),
                detail: "expected value".to_string(),
            }
            .exit_code(),
            exit_codes::CORRUPT_DATA
        );
    }

    #[test]
    fn ambiguous_id_message_lists_candidates() {
        let err = Error::AmbiguousId {
            input: "a1b".to_string(),
            candidates: vec!["a1b2c3d4".to_string(), "a1b9f0e1".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("a1b2c3d4"));
        assert!(message.contains("a1b9f0e1"));
    }
}
