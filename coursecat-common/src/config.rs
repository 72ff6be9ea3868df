//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (handled by the CLI layer)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default input root, relative to the working directory
pub const DEFAULT_ROOT_DIR: &str = "pdfs";

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Default document extension (matched case-insensitively)
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "coursecat.toml";

/// Which catalog shape a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogMode {
    /// Flat per-semester list of papers (`<sem>.json`)
    #[default]
    ExamPapers,
    /// Subject → unit → materials tree (`syllabus_<sem>.json`)
    Syllabus,
}

impl std::fmt::Display for CatalogMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogMode::ExamPapers => f.write_str("exam papers"),
            CatalogMode::Syllabus => f.write_str("syllabus"),
        }
    }
}

/// Logging section of the TOML file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Contents of `coursecat.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub mode: Option<CatalogMode>,
    pub extension: Option<String>,
    pub ignore_patterns: Option<Vec<String>>,
    pub logging: LoggingConfig,
}

/// Values supplied on the command line (or through their environment variables)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub syllabus: bool,
    pub dry_run: bool,
}

/// Fully resolved settings for one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory tree holding the documents
    pub root_dir: PathBuf,
    /// Directory receiving the catalog files
    pub output_dir: PathBuf,
    /// Directory that catalog `file` paths are relative to
    pub base_dir: PathBuf,
    pub mode: CatalogMode,
    /// Lowercase, without leading dot
    pub extension: String,
    /// File or directory names pruned from the walk
    pub ignore_patterns: Vec<String>,
    /// Build everything but write nothing
    pub dry_run: bool,
}

impl GeneratorConfig {
    /// Config with defaults for everything except the two directories
    pub fn new(root_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        Self {
            base_dir: default_base_dir(&root_dir),
            root_dir,
            output_dir: output_dir.into(),
            mode: CatalogMode::default(),
            extension: DEFAULT_EXTENSION.to_string(),
            ignore_patterns: default_ignore_patterns(),
            dry_run: false,
        }
    }

    pub fn with_mode(mut self, mode: CatalogMode) -> Self {
        self.mode = mode;
        self
    }

    /// Merge CLI overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: ConfigOverrides, toml: &TomlConfig) -> Result<Self> {
        let root_dir = overrides
            .root_dir
            .or_else(|| toml.root_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_DIR));
        let output_dir = overrides
            .output_dir
            .or_else(|| toml.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let base_dir = overrides
            .base_dir
            .or_else(|| toml.base_dir.clone())
            .unwrap_or_else(|| default_base_dir(&root_dir));

        if !root_dir.starts_with(&base_dir) {
            return Err(Error::Config(format!(
                "base directory {} does not contain root {}",
                base_dir.display(),
                root_dir.display()
            )));
        }

        let mode = if overrides.syllabus {
            CatalogMode::Syllabus
        } else {
            toml.mode.unwrap_or_default()
        };

        let extension = normalize_extension(
            overrides
                .extension
                .as_deref()
                .or(toml.extension.as_deref())
                .unwrap_or(DEFAULT_EXTENSION),
        )?;

        let ignore_patterns = toml
            .ignore_patterns
            .clone()
            .unwrap_or_else(default_ignore_patterns);

        Ok(Self {
            root_dir,
            output_dir,
            base_dir,
            mode,
            extension,
            ignore_patterns,
            dry_run: overrides.dry_run,
        })
    }
}

/// Names skipped during traversal unless the TOML file says otherwise
pub fn default_ignore_patterns() -> Vec<String> {
    [".git", ".svn", "node_modules", "__pycache__", ".DS_Store", "Thumbs.db"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Parent of the root, so catalog paths start with the root folder's name
fn default_base_dir(root_dir: &Path) -> PathBuf {
    root_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root_dir.to_path_buf())
}

fn normalize_extension(raw: &str) -> Result<String> {
    let ext = raw.trim().trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        return Err(Error::Config("document extension must not be empty".to_string()));
    }
    Ok(ext)
}

/// Load the TOML config file
///
/// An explicitly requested file must exist and parse. Otherwise the first of
/// `./coursecat.toml` and `<config dir>/coursecat/config.toml` that exists is
/// used; a broken implicit file is logged and ignored.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        return toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid TOML in {}: {}", path.display(), e)));
    }

    for candidate in implicit_config_paths() {
        if !candidate.is_file() {
            continue;
        }
        let parsed = std::fs::read_to_string(&candidate)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str::<TomlConfig>(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => {
                debug!(path = %candidate.display(), "Loaded config file");
                return Ok(config);
            }
            Err(e) => {
                warn!(path = %candidate.display(), error = %e, "Ignoring unreadable config file");
            }
        }
    }

    Ok(TomlConfig::default())
}

fn implicit_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("coursecat").join("config.toml"));
    }
    paths
}
