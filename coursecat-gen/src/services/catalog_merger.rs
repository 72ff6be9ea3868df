//! Merging fresh paper entries with the previously written catalog
//!
//! Merge strategy: structure comes from the current scan, but hand edits in
//! the old output survive. For each entry matched by `file`, a truthy old
//! `title`, `description`, `year` or `subject` replaces the fresh value.
//! Only the exam-paper catalog is merged; syllabus catalogs are regenerated.

use std::collections::HashMap;
use std::path::Path;

use coursecat_common::lookup::{read_json, Lookup};
use coursecat_common::models::PaperEntry;

use super::catalog_builder::sort_papers;

/// Read a previous run's catalog, treating any failure as an empty catalog
pub fn load_prior_catalog(path: &Path) -> Vec<PaperEntry> {
    match read_json::<Vec<PaperEntry>>(path) {
        Lookup::Found(entries) => {
            tracing::debug!(
                path = %path.display(),
                entries = entries.len(),
                "Loaded prior catalog"
            );
            entries
        }
        Lookup::Absent => Vec::new(),
        Lookup::Malformed(reason) => {
            tracing::warn!(
                path = %path.display(),
                error = %reason,
                "Prior catalog unreadable, hand edits for this semester are lost"
            );
            Vec::new()
        }
    }
}

/// Apply surviving hand edits from `prior` to `fresh`, then re-sort
pub fn merge_with_prior(fresh: Vec<PaperEntry>, prior: &[PaperEntry]) -> Vec<PaperEntry> {
    let mut by_file: HashMap<&str, &PaperEntry> = HashMap::with_capacity(prior.len());
    for old in prior {
        by_file.entry(old.file.as_str()).or_insert(old);
    }

    let mut merged: Vec<PaperEntry> = fresh
        .into_iter()
        .map(|entry| match by_file.get(entry.file.as_str()) {
            Some(old) => merge_entry(entry, old),
            None => entry,
        })
        .collect();

    sort_papers(&mut merged);
    merged
}

fn merge_entry(mut entry: PaperEntry, old: &PaperEntry) -> PaperEntry {
    if !old.title.is_empty() {
        entry.title = old.title.clone();
    }
    if !old.description.is_empty() {
        entry.description = old.description.clone();
    }
    if let Some(year) = old.year.filter(|y| *y != 0) {
        entry.year = Some(year);
    }
    if !old.subject.is_empty() {
        entry.subject = old.subject.clone();
    }
    entry
}
