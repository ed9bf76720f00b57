//! End-to-end tests for document processing.

use std::fs;
use std::path::{Path, PathBuf};

use meddate_core::{FinderConfig, FinderError, MedDatesFinder, WindowKind};
use meddate_model::{Document, EventKind, MedicationDates};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "meddate-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

fn render(dates: &[MedicationDates]) -> String {
    dates
        .iter()
        .map(|record| {
            let start = record
                .start_date
                .map_or("-".to_string(), |m| format!("{}@{}", m.date, m.span));
            let stop = record
                .stop_date
                .map_or("-".to_string(), |m| format!("{}@{}", m.date, m.span));
            format!("{} {} {} start={start} stop={stop}", record.annotation, record.text, record.span)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Two paragraphs: a medication list and a plan section.
///
/// "Medications: Aspirin 81mg. Started 1/1/2000. Stopped 12/31/2000."
/// "Plan: metformin started 2011-04-05."
const DOCUMENT_JSON: &str = r#"{
    "id": "note-17",
    "text": "Medications: Aspirin 81mg. Started 1/1/2000. Stopped 12/31/2000.\nPlan: metformin started 2011-04-05.",
    "sections": [
        {"span": {"begin": 0, "end": 64}, "id": "meds", "preferred_text": "Medications"},
        {"span": {"begin": 65, "end": 100}, "id": "plan", "preferred_text": "Plan"}
    ],
    "paragraphs": [{"begin": 0, "end": 64}, {"begin": 65, "end": 100}],
    "sentences": [
        {"begin": 0, "end": 26}, {"begin": 27, "end": 44}, {"begin": 45, "end": 64},
        {"begin": 65, "end": 100}
    ],
    "annotations": [
        {"id": "aspirin", "begin": 13, "end": 20,
         "kind": {"type": "medication_mention", "cuis": ["C0004057"]}},
        {"id": "d-start", "begin": 35, "end": 43, "kind": {"type": "date_annotation"}},
        {"id": "t-stop", "begin": 53, "end": 63,
         "kind": {"type": "time_mention", "date": {"year": "2000", "month": "12", "day": "31"}}},
        {"id": "c-stop", "begin": 53, "end": 63, "kind": {"type": "chunk"}},
        {"id": "metformin", "begin": 71, "end": 80,
         "kind": {"type": "medication_event", "cuis": ["C0025598"]}},
        {"id": "d-met", "begin": 89, "end": 99, "kind": {"type": "date_annotation"}}
    ]
}"#;

fn document() -> Document {
    serde_json::from_str(DOCUMENT_JSON).expect("deserialize document")
}

#[test]
fn test_paragraph_windows_find_both_medications() {
    let document = document();
    assert_eq!(&document.text[13..20], "Aspirin");
    assert_eq!(&document.text[89..99], "2011-04-05");

    let dates = MedDatesFinder::new().process(&document);

    insta::assert_snapshot!(
        render(&dates),
        @"aspirin Aspirin 13..20 start=2000-01-01@35..43 stop=2000-12-31@53..63 | metformin metformin 71..80 start=2011-04-05@89..99 stop=-"
    );
    assert_eq!(dates[0].kind, EventKind::MedicationMention);
    assert_eq!(dates[1].kind, EventKind::MedicationEvent);
}

#[test]
fn test_sentence_windows_separate_event_from_dates() {
    let dates = MedDatesFinder::new()
        .with_window(WindowKind::Sentence)
        .process(&document());

    let names: Vec<_> = dates.iter().map(|d| d.annotation.as_str()).collect();
    assert_eq!(names, vec!["metformin"]);
}

#[test]
fn test_processing_is_repeatable() {
    let document = document();
    let finder = MedDatesFinder::new();
    assert_eq!(finder.process(&document), finder.process(&document));
}

#[test]
fn test_config_lists_filter_sections_and_concepts() {
    let dir = unique_temp_dir("config");
    write(
        &dir.join("sections.bsv"),
        "# sections of interest\nPlan|plan section\n",
    );
    write(&dir.join("cuis.bsv"), "C0025598|metformin\n// C0004057|aspirin\n");
    write(
        &dir.join("finder.toml"),
        "window = \"paragraph\"\nsection_list = \"sections.bsv\"\ncui_list = \"cuis.bsv\"\n",
    );

    let config = FinderConfig::load(&dir.join("finder.toml")).unwrap();
    let finder = MedDatesFinder::from_config(&config).unwrap();
    let dates = finder.process(&document());

    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0].annotation, "metformin");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_concept_filter_alone_keeps_all_sections() {
    let dir = unique_temp_dir("cuis");
    write(&dir.join("cuis.bsv"), "C0004057\n");
    write(&dir.join("finder.toml"), "cui_list = \"cuis.bsv\"\n");

    let config = FinderConfig::load(&dir.join("finder.toml")).unwrap();
    let dates = MedDatesFinder::from_config(&config)
        .unwrap()
        .process(&document());

    let names: Vec<_> = dates.iter().map(|d| d.annotation.as_str()).collect();
    assert_eq!(names, vec!["aspirin"]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_list_file_is_an_error() {
    let dir = unique_temp_dir("missing");
    write(&dir.join("finder.toml"), "section_list = \"absent.bsv\"\n");

    let config = FinderConfig::load(&dir.join("finder.toml")).unwrap();
    let error = MedDatesFinder::from_config(&config).err().unwrap();
    assert!(matches!(error, FinderError::Io { .. }));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_invalid_config_reports_path() {
    let dir = unique_temp_dir("invalid");
    write(&dir.join("finder.toml"), "window = 3\n");

    let error = FinderConfig::load(&dir.join("finder.toml")).unwrap_err();
    assert!(matches!(error, FinderError::Toml { .. }));
    assert!(error.to_string().contains("finder.toml"));

    fs::remove_dir_all(&dir).ok();
}
