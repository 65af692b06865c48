//! Common test fixtures for docbinder integration tests.
//!
//! Provides builders for the two input formats the pipeline consumes:
//! minimal .docx documents with hyperlinks, and multi-page PDFs.

use std::io::Write;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Write a minimal .docx whose body contains one hyperlink per
/// `(text, target)` pair, in order. Each occurrence gets its own
/// relationship id, as Word produces for repeated insertions.
pub fn write_docx(path: &Path, links: &[(&str, &str)]) {
    let mut body = String::new();
    let mut rels = String::new();
    for (i, (text, target)) in links.iter().enumerate() {
        let rid = format!("rId{}", i + 10);
        body.push_str(&format!(
            "<w:p><w:hyperlink r:id=\"{rid}\"><w:r><w:t>{text}</w:t></w:r></w:hyperlink></w:p>"
        ));
        rels.push_str(&format!(
            "<Relationship Id=\"{rid}\" \
             Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink\" \
             Target=\"{target}\" TargetMode=\"External\"/>"
        ));
    }

    let document_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
            xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<w:body>{body}</w:body></w:document>"#
    );
    let rels_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
    );
    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

    let file = std::fs::File::create(path).expect("create docx");
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    writer
        .start_file("[Content_Types].xml", options)
        .expect("start part");
    writer.write_all(content_types.as_bytes()).expect("write part");
    writer
        .start_file("word/document.xml", options)
        .expect("start part");
    writer.write_all(document_xml.as_bytes()).expect("write part");
    writer
        .start_file("word/_rels/document.xml.rels", options)
        .expect("start part");
    writer.write_all(rels_xml.as_bytes()).expect("write part");
    writer.finish().expect("finish docx");
}

/// Write a PDF with `pages` pages of placeholder text.
pub fn write_pdf(path: &Path, pages: usize) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_no in 0..pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("page {}", page_no + 1))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as u32;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save pdf");
}

/// Number of pages in a PDF on disk.
pub fn pdf_page_count(path: &Path) -> usize {
    Document::load(path).expect("load pdf").get_pages().len()
}

/// Names of the PDF files inside a directory (non-recursive), sorted.
pub fn pdf_names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .filter_map(|entry| {
            let name = entry.expect("dir entry").file_name();
            let name = name.to_str()?.to_string();
            name.to_lowercase().ends_with(".pdf").then_some(name)
        })
        .collect();
    names.sort();
    names
}
