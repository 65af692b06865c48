//! PDF document merging
//!
//! Rebuilds a single page tree out of several parsed documents, renumbering
//! objects so ids never collide. Page order follows the order the documents
//! are given in, so prepending a cover is `merge(vec![cover, body])`.

use std::collections::BTreeMap;

use lopdf::{Document, Object, ObjectId};

use crate::error::PdfError;

/// Merge `documents` into one, pages in argument order.
pub fn merge(documents: Vec<Document>) -> Result<Document, PdfError> {
    let mut max_id = 1;
    let mut all_pages: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut all_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for (_page_no, page_id) in doc.get_pages() {
            let page = doc.get_object(page_id)?.to_owned();
            all_pages.insert(page_id, page);
        }
        all_objects.extend(doc.objects);
    }

    if all_pages.is_empty() {
        return Err(PdfError::NoPages);
    }

    let mut merged = Document::with_version("1.5");
    let mut catalog: Option<(ObjectId, lopdf::Dictionary)> = None;
    let mut pages_node: Option<(ObjectId, lopdf::Dictionary)> = None;

    for (object_id, object) in &all_objects {
        match object.type_name().unwrap_or("") {
            "Catalog" => {
                if let Ok(dict) = object.as_dict() {
                    // Keep the first catalog id; later ones only contribute
                    // entries that are still missing.
                    match catalog.as_mut() {
                        Some((_, existing)) => {
                            let mut merged_dict = dict.clone();
                            merged_dict.extend(existing);
                            *existing = merged_dict;
                        }
                        None => catalog = Some((*object_id, dict.clone())),
                    }
                }
            }
            "Pages" => {
                if let Ok(dict) = object.as_dict() {
                    match pages_node.as_mut() {
                        Some((_, existing)) => {
                            let mut merged_dict = dict.clone();
                            merged_dict.extend(existing);
                            *existing = merged_dict;
                        }
                        None => pages_node = Some((*object_id, dict.clone())),
                    }
                }
            }
            // Re-inserted below with fixed parents.
            "Page" => {}
            // Outlines reference pages across documents; dropped rather
            // than patched, as the original tool did.
            "Outlines" | "Outline" => {}
            _ => {
                merged.objects.insert(*object_id, object.clone());
            }
        }
    }

    let (pages_id, mut pages_dict) = pages_node.ok_or(PdfError::NoPages)?;
    let (catalog_id, mut catalog_dict) = catalog.ok_or(PdfError::NoPages)?;

    for (page_id, page) in &all_pages {
        if let Ok(dict) = page.as_dict() {
            let mut dict = dict.clone();
            dict.set("Parent", pages_id);
            merged.objects.insert(*page_id, Object::Dictionary(dict));
        }
    }

    pages_dict.set("Count", all_pages.len() as u32);
    pages_dict.set(
        "Kids",
        all_pages
            .keys()
            .map(|id| Object::Reference(*id))
            .collect::<Vec<_>>(),
    );
    merged.objects.insert(pages_id, Object::Dictionary(pages_dict));

    catalog_dict.set("Pages", pages_id);
    catalog_dict.remove(b"Outlines");
    merged
        .objects
        .insert(catalog_id, Object::Dictionary(catalog_dict));

    merged.trailer.set("Root", catalog_id);
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();

    Ok(merged)
}

/// Number of pages in a parsed document.
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Whether the document declares encryption. Encrypted sources cannot be
/// rebuilt page by page.
pub fn is_encrypted(doc: &Document) -> bool {
    doc.trailer.get(b"Encrypt").is_ok()
}
