//! Catalog record types
//!
//! These are the exact JSON shapes written to the output directory. The same
//! types are read back from a previous run's output as a merge source, so
//! every field tolerates being missing.

use crate::config::CatalogMode;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Sentinel key for documents whose path carries no usable semester folder
pub const UNKNOWN_SEMESTER: &str = "unknown";

/// Prefix of syllabus catalog file names
pub const SYLLABUS_FILE_PREFIX: &str = "syllabus_";

/// Canonical semester identifier, e.g. `sem_4`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemesterKey(String);

impl SemesterKey {
    /// `sem_<n>` for a matched semester folder
    pub fn numbered(number: u32) -> Self {
        Self(format!("sem_{number}"))
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_SEMESTER.to_string())
    }

    /// Normalize an arbitrary folder name: whitespace runs become `_`, lowercased
    ///
    /// A leading `syllabus_` becomes `syllabus-` so the exam-paper file name
    /// can never be mistaken for a syllabus catalog.
    pub fn from_folder(name: &str) -> Self {
        let normalized = name.split_whitespace().collect::<Vec<_>>().join("_").to_lowercase();
        if normalized.is_empty() {
            return Self::unknown();
        }
        match normalized.strip_prefix(SYLLABUS_FILE_PREFIX) {
            Some(rest) => Self(format!("syllabus-{rest}")),
            None => Self(normalized),
        }
    }

    /// Accept a key recorded by an earlier run
    ///
    /// Only strings that [`SemesterKey::from_folder`] could have produced are
    /// accepted, and never one that would leave the output directory.
    pub fn from_recorded(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw == "." || raw == ".." || raw.contains(['/', '\\']) {
            return None;
        }
        let key = Self::from_folder(raw);
        (key.0 == raw).then_some(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Output file name for this semester in the given mode
    pub fn catalog_file_name(&self, mode: CatalogMode) -> String {
        match mode {
            CatalogMode::ExamPapers => format!("{}.json", self.0),
            CatalogMode::Syllabus => format!("{SYLLABUS_FILE_PREFIX}{}.json", self.0),
        }
    }

    /// Recognize a catalog file written by an earlier run in `mode`
    ///
    /// Only canonical keys (`sem_<n>`, `unknown`) are recognized; other JSON
    /// files in the output directory are left alone.
    pub fn from_catalog_file_name(file_name: &str, mode: CatalogMode) -> Option<Self> {
        let stem = file_name.strip_suffix(".json")?;
        let key = match mode {
            CatalogMode::ExamPapers => {
                if stem.starts_with(SYLLABUS_FILE_PREFIX) {
                    return None;
                }
                stem
            }
            CatalogMode::Syllabus => stem.strip_prefix(SYLLABUS_FILE_PREFIX)?,
        };

        if key == UNKNOWN_SEMESTER {
            return Some(Self::unknown());
        }
        let digits = key.strip_prefix("sem_")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self::numbered)
    }
}

impl fmt::Display for SemesterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One document in the flat exam-paper catalog
///
/// Text fields read `null` as empty, so one hand-nulled field does not make
/// the whole prior catalog unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperEntry {
    #[serde(deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    pub year: Option<i32>,
    #[serde(deserialize_with = "null_as_empty")]
    pub file: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
}

/// One document inside a syllabus unit group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub file: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Materials sharing a (category, unit) within one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitGroup {
    pub unit: u32,
    pub category: Option<String>,
    pub title: String,
    pub materials: Vec<Material>,
}

/// All unit groups of one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCatalog {
    pub subject: String,
    pub units: Vec<UnitGroup>,
}

/// Field overrides read from a `<document>.json` sidecar
///
/// Unknown keys are ignored. `year` may be an integer or a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SidecarOverride {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub subject: Option<String>,
}

impl SidecarOverride {
    /// Override value for a text field, `None` when absent or blank
    pub fn text(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        Self::text(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        Self::text(&self.description)
    }

    pub fn subject(&self) -> Option<&str> {
        Self::text(&self.subject)
    }

    /// Year override, `None` when absent or zero
    pub fn year(&self) -> Option<i32> {
        self.year.filter(|y| *y != 0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearValue {
    Number(i64),
    Text(String),
}

fn deserialize_year<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match Option::<YearValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YearValue::Number(n)) => i32::try_from(n).map(Some).map_err(D::Error::custom),
        Some(YearValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some).map_err(D::Error::custom)
            }
        }
    }
}
