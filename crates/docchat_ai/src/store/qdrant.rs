use std::time::Duration;

use docchat_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::{DistanceMetric, Point, PointPayload, ScoredPoint, VectorStore};

const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Qdrant over its REST API. Hosted deployments authenticate with the
/// `api-key` header; a local instance needs none.
#[derive(Debug, Clone)]
pub struct QdrantStore {
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(Debug, Clone, Serialize)]
struct VectorParams {
    size: u32,
    distance: DistanceMetric,
}

#[derive(Debug, Clone, Serialize)]
struct UpsertRequest<'a> {
    points: &'a [Point],
}

#[derive(Debug, Clone, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: u32,
    with_payload: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchHit {
    id: serde_json::Value,
    score: f32,
    payload: Option<PointPayload>,
}

impl QdrantStore {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(
                AppError::new("CONFIG_INVALID", "Qdrant base URL must be http(s)")
                    .with_details(format!("base_url={base_url}")),
            );
        }
        Ok(Self {
            base_url,
            api_key: api_key.map(|k| k.to_string()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: &str, url: &str, timeout: Duration) -> ureq::Request {
        let mut req = ureq::request(method, url).timeout(timeout);
        if let Some(key) = self.api_key.as_deref() {
            req = req.set("api-key", key);
        }
        req
    }

    pub fn health_check(&self) -> Result<(), AppError> {
        let url = format!("{}/readyz", self.base_url);
        match self.request("GET", &url, Duration::from_millis(800)).call() {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(
                AppError::new("STORE_UNREACHABLE", "Qdrant readiness check failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(ureq::Error::Status(code, _)) => Err(AppError::new(
                "STORE_UNREACHABLE",
                "Qdrant readiness check failed",
            )
            .with_details(format!("status={code}"))),
            Err(e) => Err(AppError::new("STORE_UNREACHABLE", "Failed to reach Qdrant")
                .with_details(e.to_string())
                .with_retryable(true)),
        }
    }

    fn collection_exists(&self, name: &str) -> Result<bool, AppError> {
        let url = format!("{}/collections/{}", self.base_url, name);
        match self.request("GET", &url, CALL_TIMEOUT).call() {
            Ok(r) if r.status() == 200 => Ok(true),
            Ok(r) => Err(AppError::new(
                "STORE_COLLECTION_FAILED",
                "Failed to look up collection",
            )
            .with_details(format!("status={}", r.status()))),
            Err(ureq::Error::Status(404, _)) => Ok(false),
            Err(ureq::Error::Status(code, _)) => Err(AppError::new(
                "STORE_COLLECTION_FAILED",
                "Failed to look up collection",
            )
            .with_details(format!("status={code}"))),
            Err(e) => Err(AppError::new(
                "STORE_COLLECTION_FAILED",
                "Failed to call collection endpoint",
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }
}

impl VectorStore for QdrantStore {
    fn ensure_collection(
        &self,
        name: &str,
        dims: u32,
        metric: DistanceMetric,
    ) -> Result<(), AppError> {
        if self.collection_exists(name)? {
            return Ok(());
        }

        let url = format!("{}/collections/{}", self.base_url, name);
        let body = CreateCollectionRequest {
            vectors: VectorParams {
                size: dims,
                distance: metric,
            },
        };
        let resp = self
            .request("PUT", &url, CALL_TIMEOUT)
            .send_json(serde_json::to_value(body).map_err(|e| {
                AppError::new(
                    "STORE_COLLECTION_FAILED",
                    "Failed to encode collection request",
                )
                .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(AppError::new(
                "STORE_COLLECTION_FAILED",
                "Failed to create collection",
            )
            .with_details(format!("status={}", r.status()))),
            Err(ureq::Error::Status(code, _)) => Err(AppError::new(
                "STORE_COLLECTION_FAILED",
                "Failed to create collection",
            )
            .with_details(format!("status={code}"))),
            Err(e) => Err(AppError::new(
                "STORE_COLLECTION_FAILED",
                "Failed to call collection endpoint",
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }

    fn upsert(&self, collection: &str, points: Vec<Point>) -> Result<(), AppError> {
        if points.is_empty() {
            return Ok(());
        }

        let url = format!("{}/collections/{}/points?wait=true", self.base_url, collection);
        let body = UpsertRequest { points: &points };
        let resp = self
            .request("PUT", &url, CALL_TIMEOUT)
            .send_json(serde_json::to_value(body).map_err(|e| {
                AppError::new("STORE_UPSERT_FAILED", "Failed to encode upsert request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(
                AppError::new("STORE_UPSERT_FAILED", "Upsert request failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(ureq::Error::Status(code, _)) => Err(AppError::new(
                "STORE_UPSERT_FAILED",
                "Upsert request failed",
            )
            .with_details(format!("status={code}"))),
            Err(e) => Err(
                AppError::new("STORE_UPSERT_FAILED", "Failed to call upsert endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }

    fn search(
        &self,
        collection: &str,
        vector: &[f32],
        top_k: u32,
    ) -> Result<Vec<ScoredPoint>, AppError> {
        let url = format!("{}/collections/{}/points/search", self.base_url, collection);
        let body = SearchRequest {
            vector,
            limit: top_k,
            with_payload: true,
        };
        let resp = self
            .request("POST", &url, CALL_TIMEOUT)
            .send_json(serde_json::to_value(body).map_err(|e| {
                AppError::new("STORE_SEARCH_FAILED", "Failed to encode search request")
                    .with_details(e.to_string())
            })?);

        let parsed: SearchResponse = match resp {
            Ok(r) if r.status() == 200 => r.into_json().map_err(|e| {
                AppError::new("STORE_SEARCH_FAILED", "Failed to decode search response")
                    .with_details(e.to_string())
            })?,
            Ok(r) => {
                return Err(
                    AppError::new("STORE_SEARCH_FAILED", "Search request failed")
                        .with_details(format!("status={}", r.status())),
                );
            }
            Err(ureq::Error::Status(code, _)) => {
                return Err(
                    AppError::new("STORE_SEARCH_FAILED", "Search request failed")
                        .with_details(format!("status={code}")),
                );
            }
            Err(e) => {
                return Err(AppError::new(
                    "STORE_SEARCH_FAILED",
                    "Failed to call search endpoint",
                )
                .with_details(e.to_string())
                .with_retryable(true));
            }
        };

        let mut out = Vec::with_capacity(parsed.result.len());
        for hit in parsed.result {
            let payload = hit.payload.ok_or_else(|| {
                AppError::new("STORE_SEARCH_FAILED", "Search hit is missing its payload")
                    .with_details(format!("id={}", id_to_string(&hit.id)))
            })?;
            out.push(ScoredPoint {
                id: id_to_string(&hit.id),
                score: hit.score,
                payload,
            });
        }
        Ok(out)
    }
}

// Qdrant point ids are either UUID strings or integers on the wire.
fn id_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
