use lopdf::Document;

use crate::error::AppError;

/// Per-page text joined with newlines, in page order. Pages that yield no
/// extractable text (scans, pure graphics, extraction faults) contribute
/// nothing rather than erroring.
pub(crate) fn extract(bytes: &[u8]) -> Result<String, AppError> {
    let doc = Document::load_mem(bytes).map_err(|e| {
        AppError::new("EXTRACT_FAILED", "Failed to parse PDF document")
            .with_details(e.to_string())
    })?;

    let mut pages: Vec<String> = Vec::new();
    for (page_no, _) in doc.get_pages() {
        if let Ok(text) = doc.extract_text(&[page_no]) {
            if !text.trim().is_empty() {
                pages.push(text.trim_end().to_string());
            }
        }
    }
    Ok(pages.join("\n"))
}
