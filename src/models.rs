//! Core data models for docbinder
//!
//! Defines the entities flowing through the pipeline:
//! - `LinkRecord`: one hyperlink occurrence extracted from the document
//! - `Resolution` / `ResolvedFile`: where (or whether) the referenced PDF was found
//! - `LinkStatus`: per-occurrence outcome shown in the report

use serde::Serialize;
use std::path::PathBuf;

/// One hyperlink occurrence pointing at a PDF, in document order.
///
/// Duplicates are preserved: a document that references `a.pdf` three times
/// yields three records, each with its own `sequence` and visible text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    /// Visible text of the hyperlink (placeholder when the link has no text)
    pub text: String,

    /// Filename component of the link target, e.g. `invoice-2024.pdf`
    pub target: String,

    /// Zero-based occurrence index in the source document
    pub sequence: usize,
}

impl LinkRecord {
    /// Case-insensitive key identifying the distinct target this record
    /// refers to. Two records with targets differing only in case share one
    /// destination file and one assigned number.
    pub fn target_key(&self) -> String {
        self.target.to_lowercase()
    }
}

/// Where the resolver located a referenced file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Absolute path of the first (lexicographically smallest) match
    Found(PathBuf),
    /// No file with that name in the source directory
    Missing,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn source_path(&self) -> Option<&PathBuf> {
        match self {
            Resolution::Found(path) => Some(path),
            Resolution::Missing => None,
        }
    }
}

/// A distinct target together with its resolution, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Filename as first referenced in the document
    pub target: String,
    /// Case-insensitive identity key (see [`LinkRecord::target_key`])
    pub key: String,
    pub resolution: Resolution,
}

/// Outcome of one link occurrence, as reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// Referenced PDF was found and placed in the destination folder
    Found,
    /// Referenced PDF was not present in the source folder
    Missing,
    /// Referenced PDF was found but could not be processed
    Failed,
}

impl LinkStatus {
    /// Label used in the report's status column.
    pub fn label(&self) -> &'static str {
        match self {
            LinkStatus::Found => "Found",
            LinkStatus::Missing => "Missing",
            LinkStatus::Failed => "Failed",
        }
    }
}
