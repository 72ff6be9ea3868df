//! Document file scanner
//!
//! Recursive discovery of every document under the input root. Traversal is
//! sequential and sorted by name so repeated runs see files in the same order.

use coursecat_common::{Error, GeneratorConfig, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Scan result with statistics
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Document paths relative to the scanned root, in walk order
    pub files: Vec<PathBuf>,
    /// Entries that could not be read and were skipped
    pub skipped: usize,
}

/// Document file scanner
pub struct FileScanner {
    /// `.` plus the lowercase extension, e.g. `.pdf` or `.tar.gz`
    suffix: String,
    ignore_patterns: Vec<String>,
}

impl FileScanner {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            suffix: format!(".{}", config.extension.trim_start_matches('.').to_lowercase()),
            ignore_patterns: config.ignore_patterns.clone(),
        }
    }

    /// Scan the root for document files
    ///
    /// Fails only when the root itself is missing or not a directory.
    /// Symlinks are not followed.
    pub fn scan(&self, root_path: &Path) -> Result<ScanResult> {
        if !root_path.exists() {
            return Err(Error::RootNotFound(root_path.to_path_buf()));
        }

        if !root_path.is_dir() {
            return Err(Error::NotADirectory(root_path.to_path_buf()));
        }

        let mut result = ScanResult::default();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.is_document(entry.path()) {
                        let relative = entry
                            .path()
                            .strip_prefix(root_path)
                            .unwrap_or(entry.path())
                            .to_path_buf();
                        result.files.push(relative);
                    }
                }
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    result.skipped += 1;
                }
            }
        }

        tracing::debug!(
            root = %root_path.display(),
            documents = result.files.len(),
            skipped = result.skipped,
            "Scan complete"
        );

        Ok(result)
    }

    /// Prune ignored names and hidden directories; the root itself is always kept
    ///
    /// Hidden files are still candidates, only hidden folders are skipped.
    fn should_process_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }

        let file_name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() && file_name.starts_with('.') {
            return false;
        }

        !self
            .ignore_patterns
            .iter()
            .any(|pattern| file_name.as_ref() == pattern.as_str())
    }

    /// Name ends in the configured extension, case-insensitive
    fn is_document(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                let name = name.to_string_lossy().to_lowercase();
                name.len() > self.suffix.len() && name.ends_with(&self.suffix)
            })
            .unwrap_or(false)
    }
}
