//! Exam-paper catalog generation, end to end

mod helpers;

use coursecat_common::models::{PaperEntry, SemesterKey};
use coursecat_common::{CatalogMode, Error};
use coursecat_gen::generate;
use helpers::TestSite;

#[test]
fn test_only_papers_are_cataloged() {
    let site = TestSite::new();
    site.add_document("Sem2/Chemistry/Papers/midterm_2023.pdf");
    site.add_document("Sem2/Chemistry/Unit_1/notes.pdf");

    let report = generate(&site.config(CatalogMode::ExamPapers)).unwrap();

    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.files_excluded, 1);
    assert_eq!(report.semesters.len(), 1);
    assert_eq!(report.semester(&SemesterKey::numbered(2)).unwrap().count, 1);

    let expected = r#"[
  {
    "subject": "Chemistry",
    "title": "midterm",
    "year": 2023,
    "file": "pdfs/Sem2/Chemistry/Papers/midterm_2023.pdf",
    "description": ""
  }
]
"#;
    assert_eq!(site.read_output("sem_2.json"), expected);
    assert!(!site.output_file("syllabus_sem_2.json").exists());
}

#[test]
fn test_entries_sorted_newest_first() {
    let site = TestSite::new();
    site.add_document("Sem1/Maths/Papers/quiz.pdf");
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");
    site.add_document("Sem1/Maths/Papers/midterm_2022.pdf");
    site.add_document("Sem1/Physics/Papers/final_2021.pdf");

    generate(&site.config(CatalogMode::ExamPapers)).unwrap();

    let entries: Vec<PaperEntry> = serde_json::from_str(&site.read_output("sem_1.json")).unwrap();
    let order: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.title.as_str(), e.subject.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("midterm", "Maths"),
            ("final", "Maths"),
            ("final", "Physics"),
            ("quiz", "Maths"),
        ]
    );
    assert_eq!(entries[3].year, None);
}

#[test]
fn test_second_run_is_byte_identical() {
    let site = TestSite::new();
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");
    site.add_document("Sem3/Physics/Papers/Mid-Sem.Exam_2019.pdf");
    site.add_sidecar("Sem1/Maths/Papers/final_2021.pdf", r#"{"description": "Solved"}"#);

    let config = site.config(CatalogMode::ExamPapers);
    generate(&config).unwrap();
    let first_sem1 = site.read_output("sem_1.json");
    let first_sem3 = site.read_output("sem_3.json");

    generate(&config).unwrap();
    assert_eq!(site.read_output("sem_1.json"), first_sem1);
    assert_eq!(site.read_output("sem_3.json"), first_sem3);
}

#[test]
fn test_manual_edits_survive_rescan() {
    let site = TestSite::new();
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");

    let config = site.config(CatalogMode::ExamPapers);
    generate(&config).unwrap();

    let mut entries: Vec<PaperEntry> =
        serde_json::from_str(&site.read_output("sem_1.json")).unwrap();
    entries[0].title = "Final Examination".to_string();
    entries[0].description = "Includes marking scheme".to_string();
    site.write_output("sem_1.json", &serde_json::to_string_pretty(&entries).unwrap());

    generate(&config).unwrap();

    let regenerated: Vec<PaperEntry> =
        serde_json::from_str(&site.read_output("sem_1.json")).unwrap();
    assert_eq!(regenerated.len(), 1);
    assert_eq!(regenerated[0].title, "Final Examination");
    assert_eq!(regenerated[0].description, "Includes marking scheme");
    assert_eq!(regenerated[0].year, Some(2021));
}

#[test]
fn test_sidecar_title_wins_over_filename() {
    let site = TestSite::new();
    site.add_document("Sem2/Chemistry/Papers/midterm_2023.pdf");
    site.add_sidecar(
        "Sem2/Chemistry/Papers/midterm_2023.pdf",
        r#"{"title": "Organic Chemistry Midterm", "year": "2024", "subject": ""}"#,
    );

    generate(&site.config(CatalogMode::ExamPapers)).unwrap();

    let entries: Vec<PaperEntry> = serde_json::from_str(&site.read_output("sem_2.json")).unwrap();
    assert_eq!(entries[0].title, "Organic Chemistry Midterm");
    assert_eq!(entries[0].year, Some(2024));
    assert_eq!(entries[0].subject, "Chemistry");
}

#[test]
fn test_malformed_sidecar_falls_back_to_guess() {
    let site = TestSite::new();
    site.add_document("Sem2/Chemistry/Papers/midterm_2023.pdf");
    site.add_sidecar("Sem2/Chemistry/Papers/midterm_2023.pdf", "{ broken");

    generate(&site.config(CatalogMode::ExamPapers)).unwrap();

    let entries: Vec<PaperEntry> = serde_json::from_str(&site.read_output("sem_2.json")).unwrap();
    assert_eq!(entries[0].title, "midterm");
}

#[test]
fn test_unreadable_prior_catalog_is_regenerated() {
    let site = TestSite::new();
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");
    site.write_output("sem_1.json", "this is not json");

    generate(&site.config(CatalogMode::ExamPapers)).unwrap();

    let entries: Vec<PaperEntry> = serde_json::from_str(&site.read_output("sem_1.json")).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "final");
}

#[test]
fn test_vanished_semester_is_emptied() {
    let site = TestSite::new();
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");
    site.add_document("Sem2/Physics/Papers/final_2022.pdf");

    let config = site.config(CatalogMode::ExamPapers);
    generate(&config).unwrap();
    assert_eq!(site.read_json("sem_1.json").as_array().unwrap().len(), 1);

    site.remove_document("Sem1/Maths/Papers/final_2021.pdf");
    let report = generate(&config).unwrap();

    assert_eq!(site.read_output("sem_1.json"), "[]\n");
    assert_eq!(report.semester(&SemesterKey::numbered(1)).unwrap().count, 0);
    assert_eq!(report.semester(&SemesterKey::numbered(2)).unwrap().count, 1);
}

#[test]
fn test_vanished_folder_named_semester_is_emptied() {
    let site = TestSite::new();
    site.add_document("Summer Term/Biology/Papers/quiz_2020.pdf");
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");

    let config = site.config(CatalogMode::ExamPapers);
    generate(&config).unwrap();
    assert_eq!(site.read_json("summer_term.json").as_array().unwrap().len(), 1);

    site.remove_document("Summer Term/Biology/Papers/quiz_2020.pdf");
    let report = generate(&config).unwrap();

    assert_eq!(site.read_output("summer_term.json"), "[]\n");
    let summer = SemesterKey::from_folder("Summer Term");
    assert_eq!(report.semester(&summer).unwrap().count, 0);

    // Once emptied it is no longer tracked, and the file stays empty
    let report = generate(&config).unwrap();
    assert!(report.semester(&summer).is_none());
    assert_eq!(site.read_output("summer_term.json"), "[]\n");
}

#[test]
fn test_null_field_does_not_lose_other_edits() {
    let site = TestSite::new();
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");
    site.add_document("Sem1/Maths/Papers/mid_2020.pdf");

    let config = site.config(CatalogMode::ExamPapers);
    generate(&config).unwrap();

    let mut prior = site.read_json("sem_1.json");
    let entries = prior.as_array_mut().unwrap();
    for entry in entries.iter_mut() {
        if entry["file"].as_str().unwrap().ends_with("final_2021.pdf") {
            entry["title"] = "Hand Edited Final".into();
        } else {
            entry["description"] = serde_json::Value::Null;
        }
    }
    site.write_output("sem_1.json", &serde_json::to_string_pretty(&prior).unwrap());

    generate(&config).unwrap();

    let entries: Vec<PaperEntry> = serde_json::from_str(&site.read_output("sem_1.json")).unwrap();
    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Hand Edited Final", "mid"]);
    assert_eq!(entries[1].description, "");
}

#[test]
fn test_folder_named_like_syllabus_catalog_is_escaped() {
    let site = TestSite::new();
    site.add_document("Syllabus Sem 1/Maths/Papers/final_2021.pdf");
    site.write_output("syllabus_sem_1.json", "[\"keep\"]\n");

    generate(&site.config(CatalogMode::ExamPapers)).unwrap();

    assert_eq!(site.read_output("syllabus_sem_1.json"), "[\"keep\"]\n");
    assert_eq!(site.read_json("syllabus-sem_1.json").as_array().unwrap().len(), 1);
}

#[test]
fn test_syllabus_files_untouched_in_paper_mode() {
    let site = TestSite::new();
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");
    site.write_output("syllabus_sem_5.json", "[\"keep\"]\n");
    site.write_output("manifest.json", "{}\n");

    generate(&site.config(CatalogMode::ExamPapers)).unwrap();

    assert_eq!(site.read_output("syllabus_sem_5.json"), "[\"keep\"]\n");
    assert_eq!(site.read_output("manifest.json"), "{}\n");
}

#[test]
fn test_missing_root_is_fatal_and_writes_nothing() {
    let site = TestSite::new();
    let mut config = site.config(CatalogMode::ExamPapers);
    config.root_dir = site.path().join("does-not-exist");

    let result = generate(&config);

    assert!(matches!(result, Err(Error::RootNotFound(_))));
    assert!(!site.output().exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let site = TestSite::new();
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");

    let mut config = site.config(CatalogMode::ExamPapers);
    config.dry_run = true;
    let report = generate(&config).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.semesters.len(), 1);
    assert_eq!(report.semesters[0].count, 1);
    assert!(!site.output().exists());
}

#[test]
fn test_summary_lines_name_each_output() {
    let site = TestSite::new();
    site.add_document("Sem1/Maths/Papers/final_2021.pdf");

    let report = generate(&site.config(CatalogMode::ExamPapers)).unwrap();
    let lines = report.summary_lines();

    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("sem_1: 1 entries -> "));
    assert!(lines[0].ends_with("sem_1.json"));
}
