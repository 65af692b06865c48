//! Word document link extraction
//!
//! A .docx file is a ZIP container. Hyperlinks live in two places: the body
//! (`word/document.xml`) carries `<w:hyperlink r:id="...">` elements wrapping
//! the visible runs, and the relationships part
//! (`word/_rels/document.xml.rels`) maps each relationship id to its target
//! URL. Extraction joins the two and keeps only targets that name a PDF.

mod document;
mod rels;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::error::{BinderError, BinderResult};
use crate::models::LinkRecord;

pub use document::Hyperlink;

const DOCUMENT_PART: &str = "word/document.xml";
const RELS_PART: &str = "word/_rels/document.xml.rels";

/// An opened .docx with its hyperlink occurrences resolved against the
/// relationship map, in document order.
#[derive(Debug, Clone)]
pub struct Docx {
    path: PathBuf,
    occurrences: Vec<Occurrence>,
}

/// One resolved hyperlink occurrence (any target, not just PDFs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Visible text of the hyperlink
    pub text: String,
    /// Percent-decoded target, path separators normalized to `/`
    pub target: String,
}

impl Docx {
    /// Open and parse a .docx file.
    ///
    /// Fails with `DocumentParse` when the file is not a readable OOXML
    /// container, and with `MissingPart` when the body part is absent.
    /// A missing relationships part is not an error; such a document simply
    /// has no external links.
    pub fn open(path: &Path) -> BinderResult<Self> {
        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| BinderError::document_parse(path, e))?;

        let body_xml = read_part(&mut archive, path, DOCUMENT_PART)?
            .ok_or_else(|| BinderError::MissingPart {
                file: path.to_path_buf(),
                part: DOCUMENT_PART.to_string(),
            })?;
        let rels_xml = read_part(&mut archive, path, RELS_PART)?;

        let relationships = match rels_xml {
            Some(xml) => {
                rels::parse(&xml).map_err(|e| BinderError::document_parse(path, e))?
            }
            None => Default::default(),
        };
        let hyperlinks =
            document::parse(&body_xml).map_err(|e| BinderError::document_parse(path, e))?;

        // Resolve each occurrence against the relationship map. Links whose
        // id is unknown or whose target is empty are dropped here.
        let occurrences = hyperlinks
            .into_iter()
            .filter_map(|link| {
                let target = relationships.get(&link.rel_id)?;
                let target = normalize_target(target);
                if target.is_empty() {
                    return None;
                }
                Some(Occurrence {
                    text: link.text,
                    target,
                })
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            occurrences,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All resolved hyperlink occurrences, regardless of target type.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Lazily yield one [`LinkRecord`] per PDF link occurrence, in document
    /// order. Restartable: each call returns a fresh iterator over the same
    /// parsed document. Duplicate targets are preserved.
    pub fn pdf_links(&self) -> impl Iterator<Item = LinkRecord> + '_ {
        self.occurrences
            .iter()
            .filter_map(|occ| {
                let filename = occ.target.rsplit('/').next().unwrap_or(&occ.target);
                if !filename.to_lowercase().ends_with(".pdf") {
                    return None;
                }
                Some((occ.text.clone(), filename.to_string()))
            })
            .enumerate()
            .map(|(sequence, (text, target))| LinkRecord {
                text,
                target,
                sequence,
            })
    }
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &Path,
    name: &str,
) -> BinderResult<Option<String>> {
    match archive.by_name(name) {
        Ok(mut part) => {
            let mut xml = String::new();
            part.read_to_string(&mut xml)
                .map_err(|e| BinderError::document_parse(path, e))?;
            Ok(Some(xml))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(BinderError::document_parse(path, e)),
    }
}

/// Percent-decode a relationship target and normalize its separators so the
/// filename component can be split off with `/`.
fn normalize_target(raw: &str) -> String {
    let decoded = percent_decode_str(raw.trim()).decode_utf8_lossy();
    decoded.replace('\\', "/")
}
