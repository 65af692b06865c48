//! docbinder - Word-to-binder assembly tool
//!
//! Docbinder reads a .docx document, extracts its hyperlinks to PDF files,
//! finds those PDFs in a source folder, copies them into a destination
//! folder under sequential numbered names (optionally prepending a
//! generated cover page), and writes an index spreadsheet with one
//! clickable row per link occurrence.

pub mod assemble;
pub mod config;
pub mod docx;
pub mod error;
pub mod fs;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod resolve;

// Re-exports for convenience
pub use assemble::{Assembler, Assignments, OutputEntry};
pub use config::{RunConfig, DEFAULT_PREFIX, DEFAULT_REPORT_NAME};
pub use docx::Docx;
pub use error::{BinderError, BinderResult, PdfError};
pub use models::{LinkRecord, LinkStatus, Resolution, ResolvedFile};
pub use pipeline::{run, FailureNote, RunEvent, RunSummary};
pub use resolve::SourceIndex;
