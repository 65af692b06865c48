//! Body walk over `word/document.xml`
//!
//! One `<w:hyperlink>` element is one link occurrence, however many runs it
//! spans; its visible text is the concatenation of the `<w:t>` runs inside
//! it. Internal anchors (no `r:id`) are not occurrences.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Placeholder shown for hyperlinks whose runs carry no text.
const UNNAMED_LINK: &str = "Unnamed Link";

/// A raw hyperlink occurrence: visible text plus its relationship id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub text: String,
    pub rel_id: String,
}

/// Walk the body and collect hyperlink occurrences in document order.
pub fn parse(xml: &str) -> Result<Vec<Hyperlink>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut links = Vec::new();

    // Current <w:hyperlink> scope, if any: (rel id, accumulated text).
    let mut current: Option<(Option<String>, String)> = None;
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().local_name().as_ref() {
                b"hyperlink" => {
                    let mut rel_id = None;
                    for attr in e.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        if attr.key.local_name().as_ref() == b"id" {
                            rel_id = Some(attr.unescape_value()?.into_owned());
                        }
                    }
                    current = Some((rel_id, String::new()));
                }
                b"t" if current.is_some() => in_text_run = true,
                _ => {}
            },
            Event::Text(t) => {
                if in_text_run {
                    if let Some((_, text)) = current.as_mut() {
                        text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::End(e) => match e.name().local_name().as_ref() {
                b"t" => in_text_run = false,
                b"hyperlink" => {
                    if let Some((Some(rel_id), text)) = current.take() {
                        let text = if text.is_empty() {
                            UNNAMED_LINK.to_string()
                        } else {
                            text
                        };
                        links.push(Hyperlink { text, rel_id });
                    }
                    in_text_run = false;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(links)
}
