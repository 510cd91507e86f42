use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::AppError;

/// Paragraph texts joined with newlines, in document order. A DOCX file is a
/// zip archive; the body lives in `word/document.xml` with one `w:p` element
/// per paragraph and the visible text inside `w:t` runs.
pub(crate) fn extract(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        AppError::new("EXTRACT_FAILED", "Failed to open DOCX archive")
            .with_details(e.to_string())
    })?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| {
            AppError::new("EXTRACT_FAILED", "DOCX archive is missing word/document.xml")
                .with_details(e.to_string())
        })?
        .read_to_string(&mut xml)
        .map_err(|e| {
            AppError::new("EXTRACT_FAILED", "Failed to read DOCX document body")
                .with_details(e.to_string())
        })?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                b"w:t" => in_text_run = false,
                _ => {}
            },
            // A self-closing <w:p/> is still a paragraph: one blank line.
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(String::new());
            }
            Ok(Event::Text(t)) if in_text_run => {
                let piece = t.unescape().map_err(|e| {
                    AppError::new("EXTRACT_FAILED", "Failed to decode DOCX text run")
                        .with_details(e.to_string())
                })?;
                current.push_str(&piece);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(AppError::new(
                    "EXTRACT_FAILED",
                    "Failed to parse DOCX document XML",
                )
                .with_details(e.to_string()));
            }
        }
    }

    Ok(paragraphs.join("\n"))
}
