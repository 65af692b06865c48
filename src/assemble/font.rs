//! Cover-page font discovery
//!
//! Probes the platform's installed-font directories for a TrueType/OpenType
//! face that covers the cover text. Probe order mirrors where the common
//! Arabic-capable faces live on each OS; within a directory, files are
//! visited in sorted order so the pick is deterministic.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ttf_parser::{name_id, Face};

/// A font file usable for the cover page.
#[derive(Debug, Clone)]
pub struct CoverFont {
    /// Raw TTF/OTF bytes, embedded verbatim into the cover PDF
    pub data: Vec<u8>,
    /// PostScript-style name used for the PDF font dictionaries
    pub name: String,
}

/// Glyph ids and advances for a shaped string, advances in the PDF's
/// 1000-units-per-em glyph space.
#[derive(Debug, Clone)]
pub struct GlyphRun {
    pub gids: Vec<u16>,
    pub widths: Vec<i64>,
}

impl GlyphRun {
    /// Total advance for one unit of font size.
    pub fn width_factor(&self) -> f32 {
        self.widths.iter().sum::<i64>() as f32 / 1000.0
    }

    /// Two-byte big-endian glyph string for Identity-H text showing.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.gids
            .iter()
            .flat_map(|gid| gid.to_be_bytes())
            .collect()
    }
}

/// Font-wide vertical metrics, scaled to 1000 units per em.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    pub ascent: i64,
    pub descent: i64,
    pub cap_height: i64,
    pub bbox: [i64; 4],
}

/// Directories probed for installed fonts, in order.
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(system_root) = std::env::var_os("SystemRoot") {
        candidates.push(PathBuf::from(system_root).join("Fonts"));
    }
    for fixed in [
        "/Library/Fonts",
        "/System/Library/Fonts",
        "/usr/share/fonts",
        "/usr/local/share/fonts",
    ] {
        candidates.push(PathBuf::from(fixed));
    }
    if let Some(font_dir) = dirs::font_dir() {
        candidates.push(font_dir);
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".fonts"));
        candidates.push(home.join(".local/share/fonts"));
    }

    candidates.retain(|dir| dir.is_dir());
    candidates.dedup();
    candidates
}

/// Find the first installed face whose cmap covers every non-whitespace
/// character of `text`. Returns `None` when no such face exists; callers
/// fall back to a built-in font.
pub fn find_covering_font(text: &str) -> Option<CoverFont> {
    for dir in candidate_dirs() {
        for path in font_files(&dir) {
            let Ok(data) = std::fs::read(&path) else {
                continue;
            };
            let Ok(face) = Face::parse(&data, 0) else {
                continue;
            };
            if covers(&face, text) {
                let name = postscript_name(&face)
                    .unwrap_or_else(|| name_from_path(&path));
                return Some(CoverFont { data, name });
            }
        }
    }
    None
}

/// Map every character of `text` to a glyph with its advance width.
/// `None` when the face does not cover the text or carries no metrics.
pub fn map_glyphs(face: &Face, text: &str) -> Option<GlyphRun> {
    let upem = i64::from(face.units_per_em());
    if upem == 0 {
        return None;
    }

    let mut gids = Vec::new();
    let mut widths = Vec::new();
    for c in text.chars() {
        let gid = face.glyph_index(c)?;
        let advance = i64::from(face.glyph_hor_advance(gid).unwrap_or(0));
        gids.push(gid.0);
        widths.push(advance * 1000 / upem);
    }
    Some(GlyphRun { gids, widths })
}

/// Vertical metrics for the font descriptor.
pub fn metrics(face: &Face) -> FontMetrics {
    let upem = i64::from(face.units_per_em()).max(1);
    let scale = |v: i64| v * 1000 / upem;

    let ascent = scale(i64::from(face.ascender()));
    let descent = scale(i64::from(face.descender()));
    let cap_height = face
        .capital_height()
        .map(|v| scale(i64::from(v)))
        .unwrap_or(ascent);
    let bbox = face.global_bounding_box();

    FontMetrics {
        ascent,
        descent,
        cap_height,
        bbox: [
            scale(i64::from(bbox.x_min)),
            scale(i64::from(bbox.y_min)),
            scale(i64::from(bbox.x_max)),
            scale(i64::from(bbox.y_max)),
        ],
    }
}

fn font_files(dir: &Path) -> Vec<PathBuf> {
    let mut walker = WalkBuilder::new(dir);
    walker.standard_filters(false).follow_links(false).max_depth(Some(4));

    let mut files = Vec::new();
    for entry in walker.build().flatten() {
        if !entry.file_type().map_or(false, |t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if matches!(ext.as_deref(), Some("ttf") | Some("otf")) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}

fn covers(face: &Face, text: &str) -> bool {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .all(|c| face.glyph_index(c).is_some())
}

fn postscript_name(face: &Face) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == name_id::POST_SCRIPT_NAME)
        .and_then(|name| name.to_string())
        .map(|name| sanitize_name(&name))
        .filter(|name| !name.is_empty())
}

fn name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("EmbeddedFont");
    let sanitized = sanitize_name(stem);
    if sanitized.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        sanitized
    }
}

/// PDF name objects may not contain whitespace or delimiters.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '+')
        .collect()
}
