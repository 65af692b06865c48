//! File resolution against the source folder
//!
//! Matching is by filename only, case-insensitive. When several files in
//! different subdirectories share a name, the lexicographically smallest
//! path wins, so resolution is deterministic across filesystems.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{BinderError, BinderResult};
use crate::models::{LinkRecord, Resolution, ResolvedFile};

/// Case-insensitive filename index over the source directory.
///
/// Built once per run; lookups afterwards touch no disk.
#[derive(Debug, Clone)]
pub struct SourceIndex {
    by_name: HashMap<String, Vec<PathBuf>>,
}

impl SourceIndex {
    /// Scan `dir` (and subdirectories when `recursive`) into an index.
    ///
    /// Fails only when the directory itself is absent or unreadable;
    /// unreadable entries deeper in the tree are skipped.
    pub fn scan(dir: &Path, recursive: bool) -> BinderResult<Self> {
        if !dir.is_dir() {
            return Err(BinderError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        // The source directory itself must be readable; deeper failures are
        // tolerated and the affected entries skipped.
        std::fs::read_dir(dir).map_err(|e| BinderError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut walker = WalkBuilder::new(dir);
        walker
            .standard_filters(false)
            .follow_links(false)
            .max_depth(if recursive { None } else { Some(1) });

        let mut by_name: HashMap<String, Vec<PathBuf>> = HashMap::new();

        for entry in walker.build() {
            let Ok(entry) = entry else { continue };
            if !entry.file_type().map_or(false, |t| t.is_file()) {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            by_name
                .entry(name.to_lowercase())
                .or_default()
                .push(entry.path().to_path_buf());
        }

        for paths in by_name.values_mut() {
            paths.sort();
        }

        Ok(Self { by_name })
    }

    /// Look up a filename; returns the winning (smallest) path.
    pub fn find(&self, filename: &str) -> Option<&Path> {
        self.by_name
            .get(&filename.to_lowercase())
            .and_then(|paths| paths.first())
            .map(PathBuf::as_path)
    }

    /// Number of distinct filenames indexed.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Resolve each distinct target (first-seen order) against the index.
///
/// A target that is not in the index resolves to `Missing`; that is a
/// normal outcome, not an error.
pub fn resolve_records(records: &[LinkRecord], index: &SourceIndex) -> Vec<ResolvedFile> {
    let mut seen = Vec::new();
    let mut resolved = Vec::new();

    for record in records {
        let key = record.target_key();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key.clone());

        let resolution = match index.find(&record.target) {
            Some(path) => {
                let absolute = path
                    .canonicalize()
                    .unwrap_or_else(|_| path.to_path_buf());
                Resolution::Found(absolute)
            }
            None => Resolution::Missing,
        };
        resolved.push(ResolvedFile {
            target: record.target.clone(),
            key,
            resolution,
        });
    }

    resolved
}
