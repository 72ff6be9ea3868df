//! Path classification
//!
//! Infers semester, subject, category, unit, title and year for one document
//! purely from its catalog path. No I/O.
//!
//! Segment precedence, left to right over the folder segments:
//! 1. semester: first folder matching the semester pattern; otherwise the
//!    second folder, normalized; otherwise `unknown`
//! 2. subject: the folder right after the semester folder
//! 3. unit: first folder after the subject matching the unit pattern, at any
//!    depth; folders between subject and unit form the category
//! 4. papers: the folder right after the subject is literally `Papers`

use coursecat_common::models::SemesterKey;
use once_cell::sync::Lazy;
use regex::Regex;

/// Subject used when the path has no folder after the semester
pub const UNKNOWN_SUBJECT: &str = "Unknown";

/// Folder name marking exam papers (case-insensitive)
pub const PAPERS_FOLDER: &str = "Papers";

/// Separator between folder names merged into one category label
const CATEGORY_JOINER: &str = " / ";

static SEMESTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^sem(?:ester)?[\s_.\-]*([0-9]+)(?:$|[\s_.\-])")
        .expect("semester pattern is valid")
});

static UNIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^u(?:nit)?[\s_.\-]*([0-9]+)(?:$|[\s_.\-])").expect("unit pattern is valid")
});

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])((?:19|20)[0-9]{2})(?:$|[^0-9])").expect("year pattern is valid")
});

/// Everything the path says about one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub semester: SemesterKey,
    pub subject: String,
    /// Folders between subject and unit (or filename), `None` when there are none
    pub category: Option<String>,
    /// Unit folder number; `None` when no unit folder exists
    pub unit: Option<u32>,
    /// The folder right after the subject is `Papers`
    pub under_papers: bool,
    pub title: String,
    pub year: Option<i32>,
}

/// Semester number if `segment` is a semester folder (`Sem_4`, `sem4`, `SEM-4`)
pub fn match_semester(segment: &str) -> Option<u32> {
    SEMESTER_PATTERN
        .captures(segment.trim())
        .and_then(|caps| caps[1].parse().ok())
}

/// Unit number if `segment` is a unit folder (`Unit_1`, `U2`, `unit 3 Waves`)
pub fn match_unit(segment: &str) -> Option<u32> {
    UNIT_PATTERN
        .captures(segment.trim())
        .and_then(|caps| caps[1].parse().ok())
}

pub fn is_papers_folder(segment: &str) -> bool {
    segment.trim().eq_ignore_ascii_case(PAPERS_FOLDER)
}

/// Folder name as display text: underscores become spaces
fn display_name(segment: &str) -> String {
    segment.replace('_', " ").trim().to_string()
}

/// Classify a `/`-separated catalog path such as `pdfs/Sem4/Physics/Unit_1/a.pdf`
pub fn classify(file: &str, extension: &str) -> Classification {
    let mut segments: Vec<&str> = file.split('/').filter(|s| !s.is_empty()).collect();
    let file_name = segments.pop().unwrap_or(file);
    let dirs = segments;

    // Semester anchor: matched folder, else the second folder
    let (semester, anchor) = match dirs
        .iter()
        .enumerate()
        .find_map(|(i, seg)| match_semester(seg).map(|n| (i, n)))
    {
        Some((i, n)) => (SemesterKey::numbered(n), Some(i)),
        None => match dirs.get(1) {
            Some(seg) => (SemesterKey::from_folder(seg), Some(1)),
            None => (SemesterKey::unknown(), None),
        },
    };

    let subject_index = anchor.map(|i| i + 1).filter(|i| *i < dirs.len());
    let subject = subject_index
        .map(|i| display_name(dirs[i]))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string());

    let (unit, category, under_papers) = match subject_index {
        Some(si) => {
            let after_subject = &dirs[si + 1..];
            let under_papers = after_subject.first().is_some_and(|seg| is_papers_folder(seg));
            let unit_hit = after_subject
                .iter()
                .enumerate()
                .find_map(|(i, seg)| match_unit(seg).map(|n| (i, n)));

            let (unit, between) = match unit_hit {
                Some((i, n)) => (Some(n), &after_subject[..i]),
                None => (None, after_subject),
            };
            (unit, join_category(between), under_papers)
        }
        None => (None, None, false),
    };

    Classification {
        semester,
        subject,
        category,
        unit,
        under_papers,
        title: guess_title(file_name, extension),
        year: guess_year(file_name),
    }
}

fn join_category(segments: &[&str]) -> Option<String> {
    let parts: Vec<String> = segments
        .iter()
        .map(|seg| display_name(seg))
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(CATEGORY_JOINER))
    }
}

/// Human title from a filename
///
/// Drops the extension and standalone year tokens, turns `_`, `-` and periods
/// not between two digits into spaces, and collapses whitespace. Falls back
/// to the raw filename when nothing is left.
pub fn guess_title(file_name: &str, extension: &str) -> String {
    let suffix = format!(".{extension}");
    let stem = file_name
        .len()
        .checked_sub(suffix.len())
        .and_then(|split| {
            let tail = file_name.get(split..)?;
            tail.eq_ignore_ascii_case(&suffix).then(|| &file_name[..split])
        })
        .unwrap_or(file_name);

    let chars: Vec<char> = stem.chars().collect();
    let spaced: String = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| match c {
            '_' | '-' => ' ',
            '.' => {
                let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
                let next_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
                if prev_digit && next_digit {
                    '.'
                } else {
                    ' '
                }
            }
            other => other,
        })
        .collect();

    let title = spaced
        .split_whitespace()
        .filter(|token| !is_year_token(token))
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        file_name.to_string()
    } else {
        title
    }
}

fn is_year_token(token: &str) -> bool {
    token.len() == 4
        && token.bytes().all(|b| b.is_ascii_digit())
        && token.parse::<i32>().is_ok_and(|y| (1900..=2099).contains(&y))
}

/// First 4-digit year in 1900-2099 not embedded in a longer number
pub fn guess_year(file_name: &str) -> Option<i32> {
    YEAR_PATTERN
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_pattern_variants() {
        assert_eq!(match_semester("Sem_4"), Some(4));
        assert_eq!(match_semester("sem4"), Some(4));
        assert_eq!(match_semester("SEM-4"), Some(4));
        assert_eq!(match_semester("Sem 04"), Some(4));
        assert_eq!(match_semester("Semester 2"), Some(2));
        assert_eq!(match_semester("sem_3_extra"), Some(3));
        assert_eq!(match_semester("Seminar"), None);
        assert_eq!(match_semester("sem4b"), None);
        assert_eq!(match_semester("Physics"), None);
    }

    #[test]
    fn test_unit_pattern_variants() {
        assert_eq!(match_unit("Unit_1"), Some(1));
        assert_eq!(match_unit("unit-12"), Some(12));
        assert_eq!(match_unit("U3"), Some(3));
        assert_eq!(match_unit("Unit 0"), Some(0));
        assert_eq!(match_unit("Unit_2_Thermodynamics"), Some(2));
        assert_eq!(match_unit("Universe"), None);
        assert_eq!(match_unit("Units"), None);
        assert_eq!(match_unit("Lab"), None);
    }

    #[test]
    fn test_papers_folder() {
        assert!(is_papers_folder("Papers"));
        assert!(is_papers_folder("papers"));
        assert!(!is_papers_folder("Past_Papers"));
    }

    #[test]
    fn test_semester_key_is_case_insensitive() {
        for folder in ["Sem_4", "sem4", "SEM-4"] {
            let path = format!("pdfs/{folder}/Physics/Unit_1/a.pdf");
            assert_eq!(classify(&path, "pdf").semester.as_str(), "sem_4");
        }
    }

    #[test]
    fn test_classify_unit_without_category() {
        let c = classify("pdfs/Sem4/Physics/Unit_1/Mechanics_Notes.pdf", "pdf");
        assert_eq!(c.semester.as_str(), "sem_4");
        assert_eq!(c.subject, "Physics");
        assert_eq!(c.unit, Some(1));
        assert_eq!(c.category, None);
        assert!(!c.under_papers);
        assert_eq!(c.title, "Mechanics Notes");
        assert_eq!(c.year, None);
    }

    #[test]
    fn test_classify_category_before_unit() {
        let c = classify("pdfs/Sem3/Applied_Maths/Lab_Work/Part_A/Unit_2/sheet.pdf", "pdf");
        assert_eq!(c.subject, "Applied Maths");
        assert_eq!(c.unit, Some(2));
        assert_eq!(c.category.as_deref(), Some("Lab Work / Part A"));
    }

    #[test]
    fn test_first_unit_folder_wins() {
        let c = classify("pdfs/Sem1/Chem/Unit_3/U4/x.pdf", "pdf");
        assert_eq!(c.unit, Some(3));
        assert_eq!(c.category, None);
    }

    #[test]
    fn test_classify_without_unit() {
        let c = classify("pdfs/Sem1/Chem/Reference_Books/Extra/x.pdf", "pdf");
        assert_eq!(c.unit, None);
        assert_eq!(c.category.as_deref(), Some("Reference Books / Extra"));

        let direct = classify("pdfs/Sem1/Chem/syllabus.pdf", "pdf");
        assert_eq!(direct.unit, None);
        assert_eq!(direct.category, None);
    }

    #[test]
    fn test_classify_papers() {
        let c = classify("pdfs/Sem2/Chemistry/Papers/midterm_2023.pdf", "pdf");
        assert_eq!(c.semester.as_str(), "sem_2");
        assert_eq!(c.subject, "Chemistry");
        assert!(c.under_papers);
        assert_eq!(c.category.as_deref(), Some("Papers"));
        assert_eq!(c.title, "midterm");
        assert_eq!(c.year, Some(2023));
    }

    #[test]
    fn test_semester_fallback_uses_second_folder() {
        let c = classify("pdfs/Summer Term/Biology/Papers/quiz.pdf", "pdf");
        assert_eq!(c.semester.as_str(), "summer_term");
        assert_eq!(c.subject, "Biology");
        assert!(c.under_papers);
    }

    #[test]
    fn test_semester_unknown_when_too_shallow() {
        let c = classify("pdfs/loose.pdf", "pdf");
        assert_eq!(c.semester.as_str(), "unknown");
        assert_eq!(c.subject, UNKNOWN_SUBJECT);
        assert_eq!(c.unit, None);
        assert!(!c.under_papers);
    }

    #[test]
    fn test_subject_defaults_when_missing() {
        let c = classify("pdfs/Sem5/overview.pdf", "pdf");
        assert_eq!(c.semester.as_str(), "sem_5");
        assert_eq!(c.subject, UNKNOWN_SUBJECT);
    }

    #[test]
    fn test_guess_title() {
        assert_eq!(guess_title("Mechanics_Notes.pdf", "pdf"), "Mechanics Notes");
        assert_eq!(guess_title("midterm-2023.PDF", "pdf"), "midterm");
        assert_eq!(guess_title("Ch.1.2_intro..final.pdf", "pdf"), "Ch 1.2 intro final");
        assert_eq!(guess_title("__a___b__.pdf", "pdf"), "a b");
        assert_eq!(guess_title("2021.pdf", "pdf"), "2021.pdf");
        assert_eq!(guess_title("Notes2023.pdf", "pdf"), "Notes2023");
        assert_eq!(guess_title("Batch_1850.pdf", "pdf"), "Batch 1850");
    }

    #[test]
    fn test_guess_year() {
        assert_eq!(guess_year("midterm_2023.pdf"), Some(2023));
        assert_eq!(guess_year("final1999.pdf"), Some(1999));
        assert_eq!(guess_year("a_2001_b_2010.pdf"), Some(2001));
        assert_eq!(guess_year("report_1850.pdf"), None);
        assert_eq!(guess_year("id_120234.pdf"), None);
        assert_eq!(guess_year("notes.pdf"), None);
    }
}
