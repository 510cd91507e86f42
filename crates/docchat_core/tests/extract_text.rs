use std::io::Write;

use docchat_core::extract::extract_text;
use pretty_assertions::assert_eq;

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut body = String::new();
    for p in paragraphs {
        body.push_str(&format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"));
    }
    docx_bytes_raw(&body)
}

fn docx_bytes_raw(body_xml: &str) -> Vec<u8> {
    let body = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body_xml}</w:body></w:document>"#,
    );

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zip.start_file("word/document.xml", options).expect("start_file");
        zip.write_all(body.as_bytes()).expect("write body");
        zip.finish().expect("finish zip");
    }
    cursor.into_inner()
}

#[test]
fn txt_decodes_utf8_verbatim() {
    let text = extract_text("notes.txt", "héllo\nwörld".as_bytes()).expect("extract");
    assert_eq!(text, "héllo\nwörld");
}

#[test]
fn txt_rejects_invalid_utf8() {
    let err = extract_text("notes.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
    assert_eq!(err.code, "EXTRACT_FAILED");
}

#[test]
fn unsupported_extension_is_named_in_the_error() {
    let err = extract_text("report.csv", b"a,b,c").unwrap_err();
    assert_eq!(err.code, "EXTRACT_UNSUPPORTED_FORMAT");
    assert!(err.message.contains(".csv"), "message was: {}", err.message);
}

#[test]
fn extension_matching_is_case_insensitive() {
    let text = extract_text("NOTES.TXT", b"upper").expect("extract");
    assert_eq!(text, "upper");
}

#[test]
fn missing_extension_is_unsupported() {
    let err = extract_text("README", b"no extension").unwrap_err();
    assert_eq!(err.code, "EXTRACT_UNSUPPORTED_FORMAT");
}

#[test]
fn docx_paragraphs_join_with_newlines_in_order() {
    let bytes = docx_bytes(&["First paragraph.", "Second paragraph.", "Third."]);
    let text = extract_text("letter.docx", &bytes).expect("extract");
    assert_eq!(text, "First paragraph.\nSecond paragraph.\nThird.");
}

#[test]
fn docx_entities_are_unescaped() {
    let bytes = docx_bytes(&["Fish &amp; chips"]);
    let text = extract_text("menu.docx", &bytes).expect("extract");
    assert_eq!(text, "Fish & chips");
}

#[test]
fn docx_self_closing_empty_paragraph_yields_a_blank_line() {
    let bytes = docx_bytes_raw(
        "<w:p><w:r><w:t>Heading</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Body</w:t></w:r></w:p>",
    );
    let text = extract_text("spaced.docx", &bytes).expect("extract");
    assert_eq!(text, "Heading\n\nBody");
}

#[test]
fn docx_garbage_bytes_fail_with_extract_error() {
    let err = extract_text("broken.docx", b"not a zip archive").unwrap_err();
    assert_eq!(err.code, "EXTRACT_FAILED");
}

#[test]
fn pdf_garbage_bytes_fail_with_extract_error() {
    let err = extract_text("broken.pdf", b"%PDF-nope").unwrap_err();
    assert_eq!(err.code, "EXTRACT_FAILED");
}

/// One page per entry; an empty entry becomes a page with no text content.
fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

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
    for page_text in pages {
        let operations = if page_text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*page_text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("save pdf");
    out
}

#[test]
fn pdf_pages_join_with_newlines_and_blank_pages_contribute_nothing() {
    let bytes = pdf_bytes(&["First page", "", "Third page"]);
    let text = extract_text("report.pdf", &bytes).expect("extract");
    assert_eq!(text, "First page\nThird page");
}
