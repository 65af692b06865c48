//! Relationship part parsing
//!
//! `word/_rels/document.xml.rels` is a flat list of `<Relationship>`
//! elements. Only `Id` and `Target` matter here; hyperlink relationships are
//! told apart later by what their target points at.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

/// Parse a relationships part into an id → target map.
pub fn parse(xml: &str) -> Result<HashMap<String, String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut map = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e)
                if e.name().local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    map.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(map)
}
