//! Error types for docbinder
//!
//! Library errors use `thiserror`; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docbinder operations
pub type BinderResult<T> = Result<T, BinderError>;

/// Main error type for docbinder operations
///
/// Fatal variants abort the run. Per-entry PDF failures are NOT represented
/// here; the assembler collects those as `Failed` statuses so that every
/// extracted link still ends up in the report.
#[derive(Error, Debug)]
pub enum BinderError {
    /// Input document could not be read as a .docx container
    #[error("cannot parse document {file}: {message}")]
    DocumentParse { file: PathBuf, message: String },

    /// A required part of the .docx package is missing
    #[error("document {file} has no '{part}' part")]
    MissingPart { file: PathBuf, part: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source or destination directory does not exist / is not a directory
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Directory could not be traversed
    #[error("cannot read directory {path}: {message}")]
    DirectoryUnreadable { path: PathBuf, message: String },

    /// Spreadsheet could not be written
    #[error("cannot write report: {0}")]
    Report(String),

    /// Run was cancelled by the user
    #[error("run aborted by user")]
    Aborted,
}

impl From<rust_xlsxwriter::XlsxError> for BinderError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        BinderError::Report(e.to_string())
    }
}

impl BinderError {
    /// Build a `DocumentParse` error from any displayable cause.
    pub fn document_parse(file: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Self::DocumentParse {
            file: file.into(),
            message: cause.to_string(),
        }
    }
}

/// Failure of a single PDF while assembling the binder.
///
/// Non-fatal: recorded against the entry and surfaced in the report.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("cannot parse PDF: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("PDF is encrypted and cannot be merged")]
    Encrypted,

    #[error("PDF has no pages")]
    NoPages,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
