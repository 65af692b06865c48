//! End-to-end pipeline tests over real fixture files.

mod common;

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};

use tempfile::tempdir;

use docbinder::{BinderError, LinkStatus, RunConfig, RunEvent};

/// Sheet + shared strings XML of the generated report, for content asserts.
fn report_text(config: &RunConfig) -> String {
    let file = std::fs::File::open(config.report_path()).expect("open report");
    let mut archive = zip::ZipArchive::new(file).expect("report is a zip");
    let mut combined = String::new();
    for name in ["xl/worksheets/sheet1.xml", "xl/sharedStrings.xml"] {
        if let Ok(mut part) = archive.by_name(name) {
            part.read_to_string(&mut combined).expect("read part");
        }
    }
    combined
}

fn no_cancel() -> AtomicBool {
    AtomicBool::new(false)
}

#[test]
fn duplicate_and_missing_links_scenario() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&source).unwrap();

    common::write_pdf(&source.join("report1.pdf"), 2);
    let docx = dir.path().join("letters.docx");
    common::write_docx(
        &docx,
        &[
            ("first reference", "report1.pdf"),
            ("second reference", "report2.pdf"),
            ("repeat reference", "report1.pdf"),
        ],
    );

    let config = RunConfig::new(&docx, &source, &dest).with_cover_page(false);
    let mut record_statuses = Vec::new();
    let summary = docbinder::run(&config, &no_cancel(), |event| {
        if let RunEvent::Record { status, .. } = event {
            record_statuses.push(status);
        }
    })
    .unwrap();

    // Three rows, one distinct number, one copy in the destination.
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.distinct, 2);
    assert_eq!(summary.found, 1);
    assert_eq!(summary.missing, 1);
    assert!(summary.failed.is_empty());

    assert_eq!(
        record_statuses,
        vec![LinkStatus::Found, LinkStatus::Missing, LinkStatus::Found]
    );

    let copied = common::pdf_names_in(&dest);
    assert_eq!(copied.len(), 1, "destination has exactly one PDF: {copied:?}");

    let text = report_text(&config);
    assert!(text.contains("Missing"));
    assert!(text.contains("first reference"));
    assert!(text.contains("repeat reference"));
}

#[test]
fn cover_page_adds_one_page_to_each_copied_pdf() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&source).unwrap();

    common::write_pdf(&source.join("scan.pdf"), 3);
    let docx = dir.path().join("letters.docx");
    common::write_docx(&docx, &[("the scan", "scan.pdf")]);

    let config = RunConfig::new(&docx, &source, &dest);
    let summary = docbinder::run(&config, &no_cancel(), |_| {}).unwrap();
    assert_eq!(summary.found, 1);

    let copied = common::pdf_names_in(&dest);
    assert_eq!(copied.len(), 1);
    assert_eq!(common::pdf_page_count(&dest.join(&copied[0])), 4);
}

#[test]
fn empty_document_produces_header_only_report() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&source).unwrap();

    let docx = dir.path().join("empty.docx");
    common::write_docx(&docx, &[]);

    let config = RunConfig::new(&docx, &source, &dest).with_cover_page(false);
    let summary = docbinder::run(&config, &no_cancel(), |_| {}).unwrap();

    assert_eq!(summary.rows, 0);
    assert!(config.report_path().exists());
    let text = report_text(&config);
    assert!(text.contains("Reference"));
    assert!(text.contains("Original Text"));
    assert!(common::pdf_names_in(&dest).is_empty());
}

#[test]
fn renamed_files_use_prefix_and_first_seen_numbering() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&source).unwrap();

    common::write_pdf(&source.join("b.pdf"), 1);
    common::write_pdf(&source.join("a.pdf"), 1);
    let docx = dir.path().join("letters.docx");
    // b.pdf is referenced first, so it takes number 1.
    common::write_docx(&docx, &[("bee", "b.pdf"), ("ay", "a.pdf")]);

    let config = RunConfig::new(&docx, &source, &dest)
        .with_cover_page(false)
        .with_prefix("Exhibit");
    docbinder::run(&config, &no_cancel(), |_| {}).unwrap();

    let copied = common::pdf_names_in(&dest);
    assert_eq!(copied, vec!["Exhibit 001.pdf", "Exhibit 002.pdf"]);

    let text = report_text(&config);
    assert!(text.contains("Exhibit 001.pdf"));
    assert!(text.contains("Exhibit 002.pdf"));
}

#[test]
fn missing_entries_never_consume_numbers() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&source).unwrap();

    common::write_pdf(&source.join("present.pdf"), 1);
    let docx = dir.path().join("letters.docx");
    common::write_docx(
        &docx,
        &[("gone", "absent.pdf"), ("here", "present.pdf")],
    );

    let config = RunConfig::new(&docx, &source, &dest).with_cover_page(false);
    docbinder::run(&config, &no_cancel(), |_| {}).unwrap();

    // The found file gets number 1 even though a missing link came first.
    let copied = common::pdf_names_in(&dest);
    assert_eq!(copied.len(), 1);
    assert!(copied[0].contains("001"), "got {copied:?}");
}

#[test]
fn rerun_into_same_destination_is_idempotent() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&source).unwrap();

    common::write_pdf(&source.join("x.pdf"), 1);
    common::write_pdf(&source.join("y.pdf"), 1);
    let docx = dir.path().join("letters.docx");
    common::write_docx(&docx, &[("ex", "x.pdf"), ("why", "y.pdf")]);

    let config = RunConfig::new(&docx, &source, &dest).with_cover_page(false);
    docbinder::run(&config, &no_cancel(), |_| {}).unwrap();
    let first = common::pdf_names_in(&dest);
    docbinder::run(&config, &no_cancel(), |_| {}).unwrap();
    let second = common::pdf_names_in(&dest);

    assert_eq!(first, second);
}

#[test]
fn source_document_is_copied_into_destination() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&source).unwrap();

    let docx = dir.path().join("letters.docx");
    common::write_docx(&docx, &[]);

    let config = RunConfig::new(&docx, &source, &dest).with_cover_page(false);
    docbinder::run(&config, &no_cancel(), |_| {}).unwrap();

    assert!(dest.join("letters.docx").exists());
}

#[test]
fn corrupt_pdf_is_reported_failed_without_aborting() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&source).unwrap();

    std::fs::write(source.join("broken.pdf"), b"not a pdf at all").unwrap();
    common::write_pdf(&source.join("fine.pdf"), 1);
    let docx = dir.path().join("letters.docx");
    common::write_docx(&docx, &[("bad", "broken.pdf"), ("good", "fine.pdf")]);

    let config = RunConfig::new(&docx, &source, &dest);
    let summary = docbinder::run(&config, &no_cancel(), |_| {}).unwrap();

    assert_eq!(summary.found, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].target, "broken.pdf");

    let text = report_text(&config);
    assert!(text.contains("Failed"));
}

#[test]
fn cancelled_run_aborts_before_assembly() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&source).unwrap();

    common::write_pdf(&source.join("x.pdf"), 1);
    let docx = dir.path().join("letters.docx");
    common::write_docx(&docx, &[("ex", "x.pdf")]);

    let cancel = AtomicBool::new(false);
    cancel.store(true, Ordering::SeqCst);

    let config = RunConfig::new(&docx, &source, &dest).with_cover_page(false);
    let result = docbinder::run(&config, &cancel, |_| {});
    assert!(matches!(result, Err(BinderError::Aborted)));
    assert!(!config.report_path().exists());
}

#[test]
fn unreadable_document_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("pdfs");
    std::fs::create_dir_all(&source).unwrap();

    let not_docx = dir.path().join("not-a-doc.docx");
    std::fs::write(&not_docx, b"plain text, no zip").unwrap();

    let config = RunConfig::new(&not_docx, &source, dir.path().join("out"));
    let result = docbinder::run(&config, &no_cancel(), |_| {});
    assert!(matches!(result, Err(BinderError::DocumentParse { .. })));
}

#[test]
fn missing_source_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let docx = dir.path().join("letters.docx");
    common::write_docx(&docx, &[]);

    let config = RunConfig::new(
        &docx,
        dir.path().join("never-created"),
        dir.path().join("out"),
    );
    let result = docbinder::run(&config, &no_cancel(), |_| {});
    assert!(matches!(result, Err(BinderError::DirectoryNotFound { .. })));
}
