//! Pipeline orchestration
//!
//! One linear pass: extract → resolve → assemble → report. Single threaded;
//! the caller receives a progress event per link occurrence and can request
//! cancellation through a shared flag, which is honored between assembly
//! entries (never mid-file).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::assemble::Assembler;
use crate::config::RunConfig;
use crate::docx::Docx;
use crate::error::{BinderError, BinderResult};
use crate::models::{LinkRecord, LinkStatus};
use crate::report;
use crate::resolve::{self, SourceIndex};

/// Progress events emitted while a run advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Links extracted from the document
    Extracted { total: usize },
    /// Distinct targets resolved against the source folder
    Resolved { found: usize, missing: usize },
    /// One link occurrence processed (fired once per occurrence)
    Record {
        index: usize,
        total: usize,
        target: String,
        status: LinkStatus,
    },
    /// Index spreadsheet written
    ReportWritten { path: PathBuf },
}

/// One per-entry PDF failure, for the end-of-run summary.
#[derive(Debug, Clone)]
pub struct FailureNote {
    pub target: String,
    pub message: String,
}

/// Counts and paths describing a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Report rows written (= link occurrences, duplicates included)
    pub rows: usize,
    /// Distinct targets referenced
    pub distinct: usize,
    /// Distinct targets copied into the destination folder
    pub found: usize,
    /// Distinct targets absent from the source folder
    pub missing: usize,
    /// Per-entry PDF failures
    pub failed: Vec<FailureNote>,
    pub report_path: PathBuf,
}

/// Run the whole pipeline for `config`.
///
/// `cancel` is polled between assembly entries; a cancelled run returns
/// [`BinderError::Aborted`] without writing the report. `on_event` receives
/// progress, including one [`RunEvent::Record`] per link occurrence.
pub fn run(
    config: &RunConfig,
    cancel: &AtomicBool,
    mut on_event: impl FnMut(RunEvent),
) -> BinderResult<RunSummary> {
    let docx = Docx::open(&config.document)?;
    let records: Vec<LinkRecord> = docx.pdf_links().collect();
    on_event(RunEvent::Extracted {
        total: records.len(),
    });

    let index = SourceIndex::scan(&config.source_dir, config.recursive)?;
    let resolved = resolve::resolve_records(&records, &index);
    let found = resolved
        .iter()
        .filter(|r| r.resolution.is_found())
        .count();
    on_event(RunEvent::Resolved {
        found,
        missing: resolved.len() - found,
    });

    let resolved_by_key: HashMap<&str, &crate::models::ResolvedFile> =
        resolved.iter().map(|r| (r.key.as_str(), r)).collect();

    let mut assembler = Assembler::new(config)?;
    let total = records.len();
    for record in &records {
        let key = record.target_key();
        if assembler.get(&key).is_none() {
            if cancel.load(Ordering::SeqCst) {
                return Err(BinderError::Aborted);
            }
            if let Some(resolved_file) = resolved_by_key.get(key.as_str()).copied() {
                assembler.process(resolved_file);
            }
        }
        let status = assembler
            .get(&key)
            .map(|e| e.status)
            .unwrap_or(LinkStatus::Missing);
        on_event(RunEvent::Record {
            index: record.sequence,
            total,
            target: record.target.clone(),
            status,
        });
    }

    // The source document travels with the binder.
    copy_document(config)?;

    let assignments = assembler.into_assignments();
    let report_path = config.report_path();
    report::write(&records, &assignments, &report_path)?;
    on_event(RunEvent::ReportWritten {
        path: report_path.clone(),
    });

    let failed = assignments
        .entries()
        .iter()
        .filter(|e| e.status == LinkStatus::Failed)
        .map(|e| FailureNote {
            target: e.target.clone(),
            message: e.failure.clone().unwrap_or_default(),
        })
        .collect();

    Ok(RunSummary {
        rows: records.len(),
        distinct: resolved.len(),
        found: assignments.count_with_status(LinkStatus::Found),
        missing: assignments.count_with_status(LinkStatus::Missing),
        failed,
        report_path,
    })
}

fn copy_document(config: &RunConfig) -> BinderResult<()> {
    let Some(name) = config.document.file_name() else {
        return Ok(());
    };
    std::fs::copy(&config.document, config.dest_dir.join(name))?;
    Ok(())
}
