//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use coursecat_common::config::ConfigOverrides;

/// Command-line arguments for coursecat-gen
#[derive(Parser, Debug)]
#[command(name = "coursecat-gen")]
#[command(about = "Generate exam-paper or syllabus catalogs from a document folder tree")]
#[command(version)]
pub struct Args {
    /// Root folder containing the documents
    #[arg(short, long, env = "COURSECAT_ROOT")]
    pub root: Option<PathBuf>,

    /// Folder receiving the catalog JSON files
    #[arg(short, long, env = "COURSECAT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Folder that catalog file paths are relative to (default: parent of root)
    #[arg(long, env = "COURSECAT_BASE")]
    pub base: Option<PathBuf>,

    /// Document extension, matched case-insensitively
    #[arg(long, env = "COURSECAT_EXTENSION")]
    pub extension: Option<String>,

    /// Build syllabus catalogs instead of exam-paper catalogs
    #[arg(long)]
    pub syllabus: bool,

    /// Report what would be written without touching the output folder
    #[arg(long)]
    pub dry_run: bool,

    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root_dir: self.root.clone(),
            output_dir: self.output.clone(),
            base_dir: self.base.clone(),
            extension: self.extension.clone(),
            syllabus: self.syllabus,
            dry_run: self.dry_run,
        }
    }
}
