//! Catalog aggregation
//!
//! Turns classified documents into the two output shapes:
//! - exam papers: flat per-semester list, newest year first
//! - syllabus: per-semester subjects, each with ordered unit groups

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use coursecat_common::models::{
    Material, PaperEntry, SemesterKey, SidecarOverride, SubjectCatalog, UnitGroup,
};

use super::path_classifier::Classification;

/// Title of unit 0 groups without a category
pub const GENERAL_UNIT_TITLE: &str = "Syllabus / Resources";

/// One walked document with sidecar overrides applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub semester: SemesterKey,
    pub file: String,
    pub subject: String,
    pub title: String,
    pub description: String,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub unit: Option<u32>,
    pub under_papers: bool,
}

impl DocumentRecord {
    /// Combine path guesses with an optional sidecar
    ///
    /// A present, non-empty sidecar field replaces the guess; anything else
    /// keeps the guess.
    pub fn new(
        file: impl Into<String>,
        classification: Classification,
        sidecar: Option<&SidecarOverride>,
    ) -> Self {
        let Classification {
            semester,
            subject,
            category,
            unit,
            under_papers,
            title,
            year,
        } = classification;

        let pick = |guess: String, field: fn(&SidecarOverride) -> Option<&str>| {
            sidecar
                .and_then(field)
                .map(str::to_string)
                .unwrap_or(guess)
        };

        Self {
            semester,
            file: file.into(),
            subject: pick(subject, SidecarOverride::subject),
            title: pick(title, SidecarOverride::title),
            description: pick(String::new(), SidecarOverride::description),
            year: sidecar.and_then(SidecarOverride::year).or(year),
            category,
            unit,
            under_papers,
        }
    }

    fn to_paper(&self) -> PaperEntry {
        PaperEntry {
            subject: self.subject.clone(),
            title: self.title.clone(),
            year: self.year,
            file: self.file.clone(),
            description: self.description.clone(),
        }
    }

    fn to_material(&self) -> Material {
        Material {
            title: self.title.clone(),
            file: self.file.clone(),
            description: self.description.clone(),
        }
    }
}

/// Group documents under `Papers` folders into per-semester paper lists
pub fn build_paper_catalogs(records: &[DocumentRecord]) -> BTreeMap<SemesterKey, Vec<PaperEntry>> {
    let mut catalogs: BTreeMap<SemesterKey, Vec<PaperEntry>> = BTreeMap::new();

    for record in records.iter().filter(|r| r.under_papers) {
        catalogs
            .entry(record.semester.clone())
            .or_default()
            .push(record.to_paper());
    }

    for entries in catalogs.values_mut() {
        sort_papers(entries);
    }

    catalogs
}

/// Newest year first (missing year counts as 0), then title, then file
pub fn sort_papers(entries: &mut [PaperEntry]) {
    entries.sort_by(|a, b| {
        b.year
            .unwrap_or(0)
            .cmp(&a.year.unwrap_or(0))
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.file.cmp(&b.file))
    });
}

type UnitKey = (Option<String>, u32);

/// Group non-paper documents into per-semester subject/unit trees
pub fn build_syllabus_catalogs(
    records: &[DocumentRecord],
) -> BTreeMap<SemesterKey, Vec<SubjectCatalog>> {
    let mut grouped: BTreeMap<SemesterKey, BTreeMap<String, HashMap<UnitKey, Vec<Material>>>> =
        BTreeMap::new();

    for record in records.iter().filter(|r| !r.under_papers) {
        let key = (record.category.clone(), record.unit.unwrap_or(0));
        grouped
            .entry(record.semester.clone())
            .or_default()
            .entry(record.subject.clone())
            .or_default()
            .entry(key)
            .or_default()
            .push(record.to_material());
    }

    grouped
        .into_iter()
        .map(|(semester, subjects)| {
            let subjects = subjects
                .into_iter()
                .map(|(subject, groups)| SubjectCatalog {
                    subject,
                    units: build_unit_groups(groups),
                })
                .collect();
            (semester, subjects)
        })
        .collect()
}

fn build_unit_groups(groups: HashMap<UnitKey, Vec<Material>>) -> Vec<UnitGroup> {
    let mut units: Vec<UnitGroup> = groups
        .into_iter()
        .map(|((category, unit), mut materials)| {
            materials.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.file.cmp(&b.file)));
            UnitGroup {
                title: unit_title(unit, category.as_deref()),
                unit,
                category,
                materials,
            }
        })
        .collect();

    units.sort_by(compare_unit_groups);
    units
}

/// Display title for a unit group
pub fn unit_title(unit: u32, category: Option<&str>) -> String {
    match (unit, category) {
        (0, Some(category)) => category.to_string(),
        (0, None) => GENERAL_UNIT_TITLE.to_string(),
        (n, Some(category)) => format!("{category}: Unit {n}"),
        (n, None) => format!("Unit {n}"),
    }
}

/// Uncategorized groups first by unit; categorized groups after, by category then unit
pub fn compare_unit_groups(a: &UnitGroup, b: &UnitGroup) -> Ordering {
    match (&a.category, &b.category) {
        (None, None) => a.unit.cmp(&b.unit),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(ca), Some(cb)) => ca.cmp(cb).then_with(|| a.unit.cmp(&b.unit)),
    }
}
