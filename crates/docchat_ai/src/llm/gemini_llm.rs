use docchat_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Llm;
use crate::gemini::GeminiClient;

#[derive(Debug, Clone)]
pub struct GeminiLlm {
    client: GeminiClient,
}

impl GeminiLlm {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
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
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl Llm for GeminiLlm {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.client.base_url(),
            model
        );
        let req = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let resp = ureq::post(&url)
            .set("x-goog-api-key", self.client.api_key())
            .timeout(std::time::Duration::from_secs(30))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new(
                    "PROVIDER_GENERATE_FAILED",
                    "Failed to encode generation request",
                )
                .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: GenerateContentResponse = r.into_json().map_err(|e| {
                    AppError::new(
                        "PROVIDER_GENERATE_FAILED",
                        "Failed to decode generation response",
                    )
                    .with_details(e.to_string())
                })?;
                let text = v
                    .candidates
                    .first()
                    .map(|c| {
                        c.content
                            .parts
                            .iter()
                            .map(|p| p.text.as_str())
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .unwrap_or_default();
                if text.trim().is_empty() {
                    return Err(AppError::new(
                        "PROVIDER_GENERATE_FAILED",
                        "Model returned an empty response",
                    ));
                }
                Ok(text)
            }
            Ok(r) => Err(AppError::new(
                "PROVIDER_GENERATE_FAILED",
                "Generation request failed",
            )
            .with_details(format!("status={}", r.status()))),
            Err(ureq::Error::Status(code, _)) => Err(AppError::new(
                "PROVIDER_GENERATE_FAILED",
                "Generation request failed",
            )
            .with_details(format!("status={code}"))),
            Err(e) => Err(AppError::new(
                "PROVIDER_GENERATE_FAILED",
                "Failed to call generation endpoint",
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }
}
