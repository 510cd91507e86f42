pub mod chunk;
pub mod error;
pub mod extract;
pub mod session;

#[cfg(test)]
mod tests {
    use super::error::AppError;

    #[test]
    fn app_error_is_structured() {
        let err = AppError::new("EXTRACT_FAILED", "extraction failed")
            .with_details("name=broken.pdf");
        assert_eq!(err.code, "EXTRACT_FAILED");
        assert_eq!(err.message, "extraction failed");
        assert_eq!(err.details.as_deref(), Some("name=broken.pdf"));
        assert!(!err.retryable);
    }

    #[test]
    fn app_error_display_includes_code() {
        let err = AppError::new("STORE_UPSERT_FAILED", "upsert failed");
        assert_eq!(err.to_string(), "[STORE_UPSERT_FAILED] upsert failed");
    }
}
