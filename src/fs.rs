//! Filesystem helpers
//!
//! Writes go through tempfile + rename so a crashed run never leaves a
//! half-written PDF or spreadsheet in the destination folder.

use std::io::Write;
use std::path::Path;

use crate::error::BinderResult;

/// Write `content` to `path` atomically, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> BinderResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory (and parents) if it does not exist yet.
pub fn ensure_dir(path: &Path) -> BinderResult<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}
