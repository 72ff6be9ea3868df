//! Catalog file output
//!
//! Each catalog is rendered in full and swapped into place with a rename, so
//! readers never observe a half-written file.
//!
//! The output directory also holds a small hidden index of the semesters that
//! received entries, so catalogs named after arbitrary folders can still be
//! found and emptied once their documents are gone.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use coursecat_common::lookup::{read_json, Lookup};
use coursecat_common::models::SemesterKey;
use coursecat_common::{CatalogMode, Error, Result};
use serde::{Deserialize, Serialize};

/// Index of non-empty semesters per mode, kept next to the catalogs
pub const SEMESTER_INDEX_FILE: &str = ".coursecat-semesters.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct SemesterIndex {
    exam_papers: Vec<String>,
    syllabus: Vec<String>,
}

impl SemesterIndex {
    fn keys_mut(&mut self, mode: CatalogMode) -> &mut Vec<String> {
        match mode {
            CatalogMode::ExamPapers => &mut self.exam_papers,
            CatalogMode::Syllabus => &mut self.syllabus,
        }
    }
}

/// Pretty JSON (2-space indent) with a trailing newline
pub fn render_catalog<T: Serialize + ?Sized>(catalog: &T) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(catalog)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Replace `path` with `content` via a temporary sibling file
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::Write {
            path: path.to_path_buf(),
            message: "path has no file name".to_string(),
        })?;
    let temp_path = parent.join(format!(".{}.{}.tmp", file_name, std::process::id()));

    let write_err = |e: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut temp_file = std::fs::File::create(&temp_path).map_err(write_err)?;
    temp_file.write_all(content.as_bytes()).map_err(write_err)?;
    temp_file.sync_all().map_err(write_err)?;
    drop(temp_file);

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(write_err(e));
    }

    Ok(())
}

/// Semesters that already have a catalog file for `mode` in `output_dir`
///
/// Canonical file names (`sem_<n>`, `unknown`) are recognized directly; any
/// other key must be listed in the semester index. A missing or unreadable
/// output directory yields an empty set.
pub fn existing_semesters(output_dir: &Path, mode: CatalogMode) -> BTreeSet<SemesterKey> {
    let mut semesters = canonical_semesters(output_dir, mode);
    let mut index = load_semester_index(output_dir);
    semesters.extend(
        index
            .keys_mut(mode)
            .iter()
            .filter_map(|raw| SemesterKey::from_recorded(raw)),
    );
    semesters
}

/// Replace the index entry for `mode` with `semesters`
pub fn record_semesters<'a>(
    output_dir: &Path,
    mode: CatalogMode,
    semesters: impl IntoIterator<Item = &'a SemesterKey>,
) -> Result<()> {
    let mut index = load_semester_index(output_dir);
    *index.keys_mut(mode) = semesters.into_iter().map(|k| k.as_str().to_string()).collect();
    write_atomic(&output_dir.join(SEMESTER_INDEX_FILE), &render_catalog(&index)?)
}

fn load_semester_index(output_dir: &Path) -> SemesterIndex {
    let path = output_dir.join(SEMESTER_INDEX_FILE);
    match read_json(&path) {
        Lookup::Found(index) => index,
        Lookup::Absent => SemesterIndex::default(),
        Lookup::Malformed(reason) => {
            tracing::warn!(
                path = %path.display(),
                error = %reason,
                "Semester index unreadable, only canonical catalogs will be cleaned up"
            );
            SemesterIndex::default()
        }
    }
}

fn canonical_semesters(output_dir: &Path, mode: CatalogMode) -> BTreeSet<SemesterKey> {
    let entries = match std::fs::read_dir(output_dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %output_dir.display(),
                    error = %e,
                    "Cannot list output directory"
                );
            }
            return BTreeSet::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name();
            SemesterKey::from_catalog_file_name(&name.to_string_lossy(), mode)
        })
        .collect()
}
