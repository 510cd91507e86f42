use std::path::Path;

use crate::error::AppError;

mod docx;
mod pdf;

/// Produce the full plain-text content of an uploaded document.
///
/// Dispatches on the (lowercased) file extension. Anything outside the
/// recognized set fails with `EXTRACT_UNSUPPORTED_FORMAT` naming the
/// extension; faults inside a recognized format fail with `EXTRACT_FAILED`.
pub fn extract_text(name: &str, bytes: &[u8]) -> Result<String, AppError> {
    match file_extension(name).as_deref() {
        Some("pdf") => pdf::extract(bytes),
        Some("docx") => docx::extract(bytes),
        Some("txt") => extract_plain_text(bytes),
        Some(other) => Err(AppError::new(
            "EXTRACT_UNSUPPORTED_FORMAT",
            format!("Unsupported file type: .{other}"),
        )
        .with_details(format!("name={name}"))),
        None => Err(AppError::new(
            "EXTRACT_UNSUPPORTED_FORMAT",
            "File has no extension",
        )
        .with_details(format!("name={name}"))),
    }
}

fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn extract_plain_text(bytes: &[u8]) -> Result<String, AppError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        AppError::new("EXTRACT_FAILED", "Plain text file is not valid UTF-8")
            .with_details(e.to_string())
    })
}
