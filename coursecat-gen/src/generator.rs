//! One generator run
//!
//! Walk → classify + sidecar → build → merge (exam papers only) → write.
//! Only a missing input root aborts; it is detected before anything is
//! written.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use coursecat_common::models::SemesterKey;
use coursecat_common::{CatalogMode, GeneratorConfig, Result};
use tracing::{debug, info};

use crate::services::catalog_builder::{
    build_paper_catalogs, build_syllabus_catalogs, DocumentRecord,
};
use crate::services::catalog_merger::{load_prior_catalog, merge_with_prior};
use crate::services::catalog_writer::{
    existing_semesters, record_semesters, render_catalog, write_atomic,
};
use crate::services::file_scanner::FileScanner;
use crate::services::path_classifier::classify;
use crate::services::sidecar;

/// Outcome for one semester catalog file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterReport {
    pub semester: SemesterKey,
    pub output_path: PathBuf,
    /// Entries (exam papers) or subjects (syllabus)
    pub count: usize,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub mode: CatalogMode,
    pub files_scanned: usize,
    /// Walk entries that could not be read
    pub files_skipped: usize,
    /// Documents that belong to the other mode's catalog
    pub files_excluded: usize,
    pub dry_run: bool,
    pub semesters: Vec<SemesterReport>,
}

/// Run the generator once with `config`
pub fn generate(config: &GeneratorConfig) -> Result<RunReport> {
    info!(
        root = %config.root_dir.display(),
        output = %config.output_dir.display(),
        mode = %config.mode,
        "Generating catalogs"
    );

    let scan = FileScanner::from_config(config).scan(&config.root_dir)?;
    let records = collect_records(config, &scan.files);

    if !config.dry_run {
        std::fs::create_dir_all(&config.output_dir)?;
    }

    let semesters = match config.mode {
        CatalogMode::ExamPapers => write_paper_catalogs(config, &records)?,
        CatalogMode::Syllabus => write_syllabus_catalogs(config, &records)?,
    };
    record_non_empty(config, &semesters)?;

    let files_excluded = records
        .iter()
        .filter(|r| match config.mode {
            CatalogMode::ExamPapers => !r.under_papers,
            CatalogMode::Syllabus => r.under_papers,
        })
        .count();

    info!(
        documents = scan.files.len(),
        excluded = files_excluded,
        semesters = semesters.len(),
        "Generation complete"
    );

    Ok(RunReport {
        mode: config.mode,
        files_scanned: scan.files.len(),
        files_skipped: scan.skipped,
        files_excluded,
        dry_run: config.dry_run,
        semesters,
    })
}

/// Classify every scanned document and apply its sidecar
fn collect_records(config: &GeneratorConfig, files: &[PathBuf]) -> Vec<DocumentRecord> {
    let root_prefix = config
        .root_dir
        .strip_prefix(&config.base_dir)
        .unwrap_or(Path::new(""));

    files
        .iter()
        .map(|relative| {
            let catalog_path = catalog_path(&root_prefix.join(relative));
            let classification = classify(&catalog_path, &config.extension);
            let overrides = sidecar::resolve(&config.root_dir.join(relative));
            debug!(
                file = %catalog_path,
                semester = %classification.semester,
                subject = %classification.subject,
                unit = ?classification.unit,
                "Classified document"
            );
            DocumentRecord::new(catalog_path, classification, overrides.as_ref())
        })
        .collect()
}

/// `/`-joined normal components, no leading slash
fn catalog_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Semesters seen now plus those with catalog files from earlier runs
fn semesters_to_write<'a>(
    config: &GeneratorConfig,
    scanned: impl Iterator<Item = &'a SemesterKey>,
) -> BTreeSet<SemesterKey> {
    let mut semesters = existing_semesters(&config.output_dir, config.mode);
    semesters.extend(scanned.cloned());
    semesters
}

fn write_paper_catalogs(
    config: &GeneratorConfig,
    records: &[DocumentRecord],
) -> Result<Vec<SemesterReport>> {
    let mut catalogs = build_paper_catalogs(records);
    let semesters = semesters_to_write(config, catalogs.keys());

    let mut reports = Vec::with_capacity(semesters.len());
    for semester in semesters {
        let output_path = config
            .output_dir
            .join(semester.catalog_file_name(CatalogMode::ExamPapers));
        let fresh = catalogs.remove(&semester).unwrap_or_default();
        let prior = load_prior_catalog(&output_path);
        let merged = merge_with_prior(fresh, &prior);

        persist(config, &output_path, &render_catalog(&merged)?)?;
        reports.push(SemesterReport {
            semester,
            output_path,
            count: merged.len(),
        });
    }
    Ok(reports)
}

fn write_syllabus_catalogs(
    config: &GeneratorConfig,
    records: &[DocumentRecord],
) -> Result<Vec<SemesterReport>> {
    let mut catalogs = build_syllabus_catalogs(records);
    let semesters = semesters_to_write(config, catalogs.keys());

    let mut reports = Vec::with_capacity(semesters.len());
    for semester in semesters {
        let output_path = config
            .output_dir
            .join(semester.catalog_file_name(CatalogMode::Syllabus));
        let subjects = catalogs.remove(&semester).unwrap_or_default();

        persist(config, &output_path, &render_catalog(&subjects)?)?;
        reports.push(SemesterReport {
            semester,
            output_path,
            count: subjects.len(),
        });
    }
    Ok(reports)
}

/// Remember which semesters hold entries so later runs can empty them
fn record_non_empty(config: &GeneratorConfig, reports: &[SemesterReport]) -> Result<()> {
    if config.dry_run {
        return Ok(());
    }
    record_semesters(
        &config.output_dir,
        config.mode,
        reports.iter().filter(|r| r.count > 0).map(|r| &r.semester),
    )
}

fn persist(config: &GeneratorConfig, path: &Path, content: &str) -> Result<()> {
    if config.dry_run {
        info!(path = %path.display(), "Dry run, not writing");
        return Ok(());
    }
    write_atomic(path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "Wrote catalog");
    Ok(())
}

impl RunReport {
    /// Look up the report for one semester
    pub fn semester(&self, key: &SemesterKey) -> Option<&SemesterReport> {
        self.semesters.iter().find(|s| &s.semester == key)
    }

    /// One line per semester: key, count and output path
    pub fn summary_lines(&self) -> Vec<String> {
        let noun = match self.mode {
            CatalogMode::ExamPapers => "entries",
            CatalogMode::Syllabus => "subjects",
        };
        self.semesters
            .iter()
            .map(|s| format!("{}: {} {} -> {}", s.semester, s.count, noun, s.output_path.display()))
            .collect()
    }
}
