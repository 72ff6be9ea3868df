//! Sidecar metadata lookup
//!
//! A document `notes.pdf` may carry hand-written overrides in
//! `notes.pdf.json`. Sidecars are optional conveniences, so a missing or
//! malformed one only means "no override".

use coursecat_common::lookup::{read_json, Lookup};
use coursecat_common::models::SidecarOverride;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to a document path to locate its sidecar
pub const SIDECAR_SUFFIX: &str = ".json";

/// Sidecar path for a document: the full document path plus `.json`
pub fn sidecar_path(document: &Path) -> PathBuf {
    let mut raw: OsString = document.as_os_str().to_owned();
    raw.push(SIDECAR_SUFFIX);
    PathBuf::from(raw)
}

/// Read the sidecar, degrading every failure to "no override"
pub fn resolve(document: &Path) -> Option<SidecarOverride> {
    let path = sidecar_path(document);
    match read_json(&path) {
        Lookup::Found(sidecar) => {
            tracing::debug!(path = %path.display(), "Applying sidecar overrides");
            Some(sidecar)
        }
        Lookup::Absent => None,
        Lookup::Malformed(reason) => {
            tracing::warn!(
                path = %path.display(),
                error = %reason,
                "Ignoring malformed sidecar"
            );
            None
        }
    }
}
