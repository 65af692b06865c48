//! Binder assembly
//!
//! Takes resolved files in first-seen order, assigns sequential numbers,
//! and produces the destination folder contents: copied (or cover-page
//! merged) PDFs under their normalized names. Missing entries consume no
//! number; per-file PDF failures are recorded and never abort the run.

pub mod cover;
pub mod font;
pub mod merge;
pub mod shape;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use lopdf::Document;

use crate::config::RunConfig;
use crate::error::{BinderResult, PdfError};
use crate::models::{LinkStatus, Resolution, ResolvedFile};

/// Outcome for one distinct target.
#[derive(Debug, Clone)]
pub struct OutputEntry {
    /// Filename as first referenced in the document
    pub target: String,
    /// Case-insensitive identity key
    pub key: String,
    /// Assigned sequential number; `None` for Missing entries
    pub number: Option<usize>,
    /// Destination file, present only when the copy succeeded
    pub destination: Option<PathBuf>,
    pub status: LinkStatus,
    /// Failure message for `Failed` entries
    pub failure: Option<String>,
}

/// Completed assignment table, keyed by normalized target filename.
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    entries: Vec<OutputEntry>,
    by_key: HashMap<String, usize>,
}

impl Assignments {
    pub fn get(&self, key: &str) -> Option<&OutputEntry> {
        self.by_key.get(key).map(|i| &self.entries[*i])
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn count_with_status(&self, status: LinkStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}

/// Incremental binder assembler.
///
/// `process` handles one distinct target at a time so the caller can
/// interleave progress reporting and cancellation checks between entries.
pub struct Assembler<'a> {
    config: &'a RunConfig,
    cover: Option<cover::CoverBuilder>,
    assignments: Assignments,
    used_names: HashSet<String>,
    next_number: usize,
}

impl<'a> Assembler<'a> {
    /// Create the assembler and the destination folder. Font discovery for
    /// the cover pages happens here, once per run.
    pub fn new(config: &'a RunConfig) -> BinderResult<Self> {
        crate::fs::ensure_dir(&config.dest_dir)?;
        let cover = config
            .add_cover_page
            .then(|| cover::CoverBuilder::new(&config.prefix_text));
        Ok(Self {
            config,
            cover,
            assignments: Assignments::default(),
            used_names: HashSet::new(),
            next_number: 1,
        })
    }

    /// Whether this target has already been assembled.
    pub fn get(&self, key: &str) -> Option<&OutputEntry> {
        self.assignments.get(key)
    }

    /// Assemble one distinct target. Calling it again for an already
    /// processed key is a no-op.
    pub fn process(&mut self, resolved: &ResolvedFile) {
        if self.assignments.by_key.contains_key(&resolved.key) {
            return;
        }

        let entry = match &resolved.resolution {
            Resolution::Missing => OutputEntry {
                target: resolved.target.clone(),
                key: resolved.key.clone(),
                number: None,
                destination: None,
                status: LinkStatus::Missing,
                failure: None,
            },
            Resolution::Found(source) => {
                let number = self.next_number;
                self.next_number += 1;

                let name = self.destination_name(&resolved.target, number);
                let destination = self.config.dest_dir.join(name);
                match self.produce(source, &destination, number) {
                    Ok(()) => OutputEntry {
                        target: resolved.target.clone(),
                        key: resolved.key.clone(),
                        number: Some(number),
                        destination: Some(destination),
                        status: LinkStatus::Found,
                        failure: None,
                    },
                    Err(e) => OutputEntry {
                        target: resolved.target.clone(),
                        key: resolved.key.clone(),
                        number: Some(number),
                        destination: None,
                        status: LinkStatus::Failed,
                        failure: Some(e.to_string()),
                    },
                }
            }
        };

        self.assignments.by_key.insert(
            resolved.key.clone(),
            self.assignments.entries.len(),
        );
        self.assignments.entries.push(entry);
    }

    pub fn into_assignments(self) -> Assignments {
        self.assignments
    }

    /// Destination filename for a found target.
    ///
    /// With renaming on, every file becomes "{prefix} {NNN}.pdf". With it
    /// off, the original name is kept; a name already produced this run
    /// gets the number appended instead.
    fn destination_name(&mut self, target: &str, number: usize) -> String {
        let name = if self.config.rename_with_prefix {
            format!("{} {:03}.pdf", self.config.prefix_text, number)
        } else if self.used_names.contains(&target.to_lowercase()) {
            let (stem, ext) = split_extension(target);
            format!("{stem} {number}{ext}")
        } else {
            target.to_string()
        };
        self.used_names.insert(name.to_lowercase());
        name
    }

    /// Copy (or cover-merge) one source PDF into the destination folder.
    fn produce(&self, source: &Path, destination: &Path, number: usize) -> Result<(), PdfError> {
        let Some(cover_builder) = &self.cover else {
            std::fs::copy(source, destination)?;
            return Ok(());
        };

        let body = Document::load(source)?;
        if merge::is_encrypted(&body) {
            return Err(PdfError::Encrypted);
        }

        let cover_page = cover_builder.build(number)?;
        let mut merged = merge::merge(vec![cover_page, body])?;

        let mut buffer = Vec::new();
        merged.save_to(&mut buffer)?;
        crate::fs::atomic_write(destination, &buffer).map_err(|e| match e {
            crate::error::BinderError::Io(io) => PdfError::Io(io),
            other => PdfError::Io(std::io::Error::other(other.to_string())),
        })?;
        Ok(())
    }
}

fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => filename.split_at(idx),
        _ => (filename, ""),
    }
}
