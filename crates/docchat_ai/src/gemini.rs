use docchat_core::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Shared connection settings for the Gemini REST API. The hosted endpoint
/// is https-only; plain http is accepted only for 127.0.0.1 so tests can
/// point at a local stub.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let local_stub = base_url.starts_with("http://127.0.0.1:")
            || base_url == "http://127.0.0.1";
        if !base_url.starts_with("https://") && !local_stub {
            return Err(AppError::new(
                "CONFIG_INVALID",
                "Gemini base URL must use https (or 127.0.0.1 for a local stub)",
            )
            .with_details(format!("base_url={base_url}")));
        }
        if api_key.trim().is_empty() {
            return Err(AppError::new("CONFIG_INVALID", "Gemini API key is required"));
        }

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
