//! Partial task-id resolution.
//!
//! Users may type any unique prefix of a task id instead of the full id.
//! Resolution is a pure lookup over the store's live id set; short ids are
//! never persisted. Canonical ids are always full-length.

use crate::error::{Error, Result};

/// Resolve a user-supplied id or prefix against the full id set.
///
/// A full-length exact match wins outright. Otherwise all ids sharing the
/// prefix (case-sensitive) are collected: zero is `NotFound`, one resolves,
/// and more than one is `AmbiguousId` carrying the sorted candidate list.
pub fn resolve<'a, I>(input: &str, ids: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("task id cannot be empty".to_string()));
    }

    let mut matches: Vec<&str> = Vec::new();
    for id in ids {
        if id == trimmed {
            return Ok(id.to_string());
        }
        if id.starts_with(trimmed) {
            matches.push(id);
        }
    }

    match matches.len() {
        0 => Err(Error::NotFound(trimmed.to_string())),
        1 => Ok(matches[0].to_string()),
        _ => {
            let mut candidates: Vec<String> =
                matches.into_iter().map(|id| id.to_string()).collect();
            candidates.sort();
            Err(Error::AmbiguousId {
                input: trimmed.to_string(),
                candidates,
            })
        }
    }
}
