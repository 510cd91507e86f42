use docchat_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::gemini::GeminiClient;

#[derive(Debug, Clone)]
pub struct GeminiEmbedder {
    client: GeminiClient,
}

impl GeminiEmbedder {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct EmbedContentRequest<'a> {
    content: RequestContent<'a>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

impl Embedder for GeminiEmbedder {
    fn embed(&self, model: &str, input: &str) -> Result<Vec<f32>, AppError> {
        // Keep requests bounded. Chunking enforces reasonable sizes, but guard anyway.
        let mut text = input;
        if text.len() > 12_000 {
            let mut end = 12_000;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text = &text[..end];
        }

        let url = format!(
            "{}/v1beta/models/{}:embedContent",
            self.client.base_url(),
            model
        );
        let req = EmbedContentRequest {
            content: RequestContent {
                parts: vec![RequestPart { text }],
            },
        };
        let resp = ureq::post(&url)
            .set("x-goog-api-key", self.client.api_key())
            .timeout(std::time::Duration::from_secs(10))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("PROVIDER_EMBED_FAILED", "Failed to encode embedding request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: EmbedContentResponse = r.into_json().map_err(|e| {
                    AppError::new("PROVIDER_EMBED_FAILED", "Failed to decode embedding response")
                        .with_details(e.to_string())
                })?;
                if v.embedding.values.is_empty() {
                    return Err(AppError::new(
                        "PROVIDER_EMBED_FAILED",
                        "Embedding response was empty",
                    ));
                }
                Ok(v.embedding.values)
            }
            Ok(r) => Err(
                AppError::new("PROVIDER_EMBED_FAILED", "Embedding request failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(ureq::Error::Status(code, _)) => Err(AppError::new(
                "PROVIDER_EMBED_FAILED",
                "Embedding request failed",
            )
            .with_details(format!("status={code}"))),
            Err(e) => Err(AppError::new(
                "PROVIDER_EMBED_FAILED",
                "Failed to call embedding endpoint",
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }
}
