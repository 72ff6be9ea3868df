//! coursecat-gen - Course catalog generator
//!
//! Walks a folder tree of course documents and regenerates the per-semester
//! catalog JSON files read by the course website:
//! - default: exam-paper catalogs (`<sem>.json`), merged with hand edits
//! - `--syllabus`: syllabus catalogs (`syllabus_<sem>.json`)

use anyhow::{Context, Result};
use clap::Parser;
use coursecat_common::config::load_toml_config;
use coursecat_common::GeneratorConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coursecat_gen::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref())
        .context("Failed to load configuration file")?;

    // Initialize tracing
    let default_level = if args.verbose {
        "debug".to_string()
    } else {
        toml_config.logging.level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting coursecat-gen v{}", env!("CARGO_PKG_VERSION"));

    let config = GeneratorConfig::resolve(args.overrides(), &toml_config)
        .context("Invalid configuration")?;

    let report = coursecat_gen::generate(&config).context("Catalog generation failed")?;

    for line in report.summary_lines() {
        println!("{line}");
    }
    println!(
        "{} catalog(s) {} for {} document(s) ({} excluded, {} unreadable)",
        report.semesters.len(),
        if report.dry_run { "checked" } else { "written" },
        report.files_scanned,
        report.files_excluded,
        report.files_skipped
    );

    Ok(())
}
