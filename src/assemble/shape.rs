//! Right-to-left text shaping
//!
//! PDF text operators place glyphs left to right in the order given, so
//! Arabic text must be converted to presentation forms (joined letter
//! shapes) and then reordered into visual order before it is drawn.

use ar_reshaper::ArabicReshaper;
use unicode_bidi::BidiInfo;

/// Shape `text` for left-to-right glyph placement: reshape Arabic letters
/// into their contextual presentation forms, then apply the bidi algorithm
/// to produce visual order. Pure function; text without RTL content passes
/// through unchanged.
pub fn shape_for_display(text: &str) -> String {
    let reshaped = ArabicReshaper::default().reshape(text);

    let bidi = BidiInfo::new(&reshaped, None);
    let mut visual = String::with_capacity(reshaped.len());
    for paragraph in &bidi.paragraphs {
        let line = paragraph.range.clone();
        visual.push_str(&bidi.reorder_line(paragraph, line));
    }
    visual
}
