//! Cover page synthesis
//!
//! Builds a single-page A4 PDF carrying the prefix text and the assigned
//! number, centered. When an installed font covers the shaped text it is
//! embedded as an Identity-H CID font and the text drawn as a glyph string;
//! otherwise the page falls back to the built-in Helvetica with the bare
//! number, matching what the original tool displayed without Arabic fonts.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::font::{self, CoverFont};
use super::shape;
use crate::error::PdfError;

// A4 portrait in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

const TITLE_SIZE: f32 = 24.0;
const FALLBACK_SIZE: f32 = 36.0;

// Advance of Helvetica-Bold digits, in em.
const HELVETICA_DIGIT_EM: f32 = 0.556;

/// Cover page factory for one run.
///
/// Font discovery walks the installed-font directories, so it happens once
/// here rather than per page. The probe text covers the prefix plus every
/// digit, since only the number changes between pages.
pub struct CoverBuilder {
    prefix: String,
    font: Option<CoverFont>,
}

impl CoverBuilder {
    pub fn new(prefix: &str) -> Self {
        let probe = shape::shape_for_display(&format!("{prefix} 0123456789"));
        Self {
            prefix: prefix.to_string(),
            font: font::find_covering_font(&probe),
        }
    }

    /// Build the cover page for entry `number`.
    pub fn build(&self, number: usize) -> Result<Document, PdfError> {
        let label = format!("{} {:03}", self.prefix, number);
        let shaped = shape::shape_for_display(&label);

        if let Some(cover_font) = &self.font {
            if let Some(doc) = build_embedded(cover_font, &shaped)? {
                return Ok(doc);
            }
        }
        build_fallback(&format!("{number:03}"))
    }
}

/// Cover page with an embedded CID font and the full shaped label.
fn build_embedded(cover_font: &CoverFont, shaped: &str) -> Result<Option<Document>, PdfError> {
    let Ok(face) = ttf_parser::Face::parse(&cover_font.data, 0) else {
        return Ok(None);
    };
    let Some(run) = font::map_glyphs(&face, shaped) else {
        return Ok(None);
    };
    let m = font::metrics(&face);

    let mut doc = Document::with_version("1.5");

    let font_file_id = doc.add_object(Stream::new(
        dictionary! { "Length1" => cover_font.data.len() as i64 },
        cover_font.data.clone(),
    ));
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => cover_font.name.as_str(),
        "Flags" => 4,
        "FontBBox" => vec![
            m.bbox[0].into(),
            m.bbox[1].into(),
            m.bbox[2].into(),
            m.bbox[3].into(),
        ],
        "ItalicAngle" => 0,
        "Ascent" => m.ascent,
        "Descent" => m.descent,
        "CapHeight" => m.cap_height,
        "StemV" => 80,
        "FontFile2" => font_file_id,
    });

    // Per-glyph widths: [gid [w] gid [w] ...].
    let mut widths: Vec<Object> = Vec::with_capacity(run.gids.len() * 2);
    for (gid, width) in run.gids.iter().zip(&run.widths) {
        widths.push(Object::Integer(i64::from(*gid)));
        widths.push(Object::Array(vec![Object::Integer(*width)]));
    }

    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => cover_font.name.as_str(),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => 1000,
        "W" => widths,
        "CIDToGIDMap" => "Identity",
    });
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => cover_font.name.as_str(),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![cid_font_id.into()],
    });

    let text_width = run.width_factor() * TITLE_SIZE;
    let text = Object::String(run.to_bytes(), StringFormat::Hexadecimal);
    let doc = finish_page(doc, font_id, TITLE_SIZE, text_width, text)?;
    Ok(Some(doc))
}

/// Cover page using the built-in Helvetica-Bold and the bare number.
fn build_fallback(label: &str) -> Result<Document, PdfError> {
    let mut doc = Document::with_version("1.5");
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let text_width = label.chars().count() as f32 * HELVETICA_DIGIT_EM * FALLBACK_SIZE;
    let text = Object::string_literal(label);
    finish_page(doc, font_id, FALLBACK_SIZE, text_width, text)
}

/// Attach the content stream, page tree, and catalog around the given font.
fn finish_page(
    mut doc: Document,
    font_id: ObjectId,
    size: f32,
    text_width: f32,
    text: Object,
) -> Result<Document, PdfError> {
    let pages_id = doc.new_object_id();

    let x = ((PAGE_WIDTH - text_width) / 2.0).max(36.0);
    let y = PAGE_HEIGHT / 2.0;
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![text]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            PAGE_WIDTH.into(),
            PAGE_HEIGHT.into(),
        ],
        "Contents" => content_id,
        "Resources" => resources_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}
