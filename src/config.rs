//! Run configuration
//!
//! All options are collected up front into one immutable struct and handed
//! to the pipeline entry point; nothing in the pipeline reads globals.

use std::path::PathBuf;

/// Default prefix for renamed files and cover pages ("Document Number").
pub const DEFAULT_PREFIX: &str = "المستند رقم";

/// Default filename of the generated index spreadsheet.
pub const DEFAULT_REPORT_NAME: &str = "binder-index.xlsx";

/// Immutable configuration for one binder run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Input .docx document
    pub document: PathBuf,

    /// Folder searched for the referenced PDFs
    pub source_dir: PathBuf,

    /// Folder receiving the copied PDFs and the report (created if absent)
    pub dest_dir: PathBuf,

    /// Search subdirectories of `source_dir`
    pub recursive: bool,

    /// Rename copied files to "{prefix} {NNN}.pdf"
    pub rename_with_prefix: bool,

    /// Prepend a generated cover page to each copied PDF
    pub add_cover_page: bool,

    /// Text used in renamed files and on cover pages
    pub prefix_text: String,

    /// Filename of the spreadsheet written into `dest_dir`
    pub report_name: String,
}

impl RunConfig {
    /// Configuration with the original defaults: renaming and cover pages
    /// on, non-recursive search, Arabic "Document Number" prefix.
    pub fn new(
        document: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            document: document.into(),
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            recursive: false,
            rename_with_prefix: true,
            add_cover_page: true,
            prefix_text: DEFAULT_PREFIX.to_string(),
            report_name: DEFAULT_REPORT_NAME.to_string(),
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_rename(mut self, rename: bool) -> Self {
        self.rename_with_prefix = rename;
        self
    }

    pub fn with_cover_page(mut self, cover: bool) -> Self {
        self.add_cover_page = cover;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_text = prefix.into();
        self
    }

    pub fn with_report_name(mut self, name: impl Into<String>) -> Self {
        self.report_name = name.into();
        self
    }

    /// Full path of the report inside the destination folder.
    pub fn report_path(&self) -> PathBuf {
        self.dest_dir.join(&self.report_name)
    }
}
