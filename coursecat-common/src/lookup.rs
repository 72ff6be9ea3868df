//! Outcome of reading an optional JSON input
//!
//! Sidecar files and previously written catalogs are convenience inputs: a
//! missing or broken one must never stop a run. Readers return a [`Lookup`]
//! and each call site picks its own fallback.

use serde::de::DeserializeOwned;
use std::path::Path;

/// Result of a best-effort read
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// File present and parsed
    Found(T),
    /// No file at the expected path
    Absent,
    /// File present but unreadable or not the expected shape
    Malformed(String),
}

/// Read and deserialize a JSON file, never failing
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Lookup<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Lookup::Absent,
        Err(e) => return Lookup::Malformed(e.to_string()),
    };

    match serde_json::from_str(&content) {
        Ok(value) => Lookup::Found(value),
        Err(e) => Lookup::Malformed(e.to_string()),
    }
}
