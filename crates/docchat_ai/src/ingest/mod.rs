use std::path::Path;

use docchat_core::chunk;
use docchat_core::error::AppError;
use docchat_core::extract::extract_text;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::RagConfig;
use crate::embeddings::Embedder;
use crate::store::{DistanceMetric, Point, PointPayload, VectorStore};

/// One uploaded document: a name and its raw bytes. Consumed once by
/// ingestion and not retained afterwards.
#[derive(Debug, Clone)]
pub struct UploadDoc {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Per-document result of a batch: either how many chunks were stored, or
/// the error that stopped this document (never its siblings).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocOutcome {
    pub name: String,
    pub result: Result<u32, AppError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestReport {
    pub outcomes: Vec<DocOutcome>,
}

impl IngestReport {
    pub fn total_chunks(&self) -> u32 {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .sum()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn summary(&self) -> String {
        format!(
            "Stored {} chunks from {} documents.",
            self.total_chunks(),
            self.outcomes.len()
        )
    }
}

/// Create the shared collection if it does not exist yet. Cosine distance,
/// dimensionality from config; safe to call before every run.
pub fn ensure_ready(store: &dyn VectorStore, cfg: &RagConfig) -> Result<(), AppError> {
    store.ensure_collection(&cfg.collection, cfg.vector_dims, DistanceMetric::Cosine)
}

/// Extract, chunk, embed and store one document. Returns the number of
/// chunks written. A document whose extracted text is empty is a success
/// with zero chunks, not an error.
pub fn ingest_document(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
    cfg: &RagConfig,
    doc: &UploadDoc,
) -> Result<u32, AppError> {
    let text = extract_text(&doc.name, &doc.bytes)?;
    let chunks = chunk::split_text(&text, &cfg.chunking);
    if chunks.is_empty() {
        return Ok(0);
    }

    let mut points = Vec::with_capacity(chunks.len());
    for chunk_text in chunks {
        let vector = embedder.embed(&cfg.embed_model, &chunk_text)?;
        points.push(Point {
            id: Uuid::new_v4().to_string(),
            vector,
            payload: PointPayload {
                source: doc.name.clone(),
                text: chunk_text,
            },
        });
    }

    let count = points.len() as u32;
    store.upsert(&cfg.collection, points)?;
    log::info!("stored {count} chunks from {}", doc.name);
    Ok(count)
}

/// Ingest documents one at a time, in order. A failure on one document is
/// recorded in its outcome and never aborts the rest of the batch.
pub fn ingest_batch(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
    cfg: &RagConfig,
    docs: &[UploadDoc],
) -> IngestReport {
    let mut outcomes = Vec::with_capacity(docs.len());
    for doc in docs {
        let result = ingest_document(store, embedder, cfg, doc);
        if let Err(e) = result.as_ref() {
            log::warn!("ingest failed for {}: {e}", doc.name);
        }
        outcomes.push(DocOutcome {
            name: doc.name.clone(),
            result,
        });
    }
    IngestReport { outcomes }
}

/// Fixed-document variant: read a predetermined file from disk and ingest
/// it. Any failure surfaces as `DEFAULT_DOC_FAILED`; callers report it and
/// keep answering questions against whatever was stored before.
///
/// Runs once per session with no cross-session bookkeeping, so the fixed
/// document's records accumulate in the shared collection over time.
pub fn ingest_default_document(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
    cfg: &RagConfig,
    path: &Path,
) -> Result<u32, AppError> {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::new("DEFAULT_DOC_FAILED", "Failed to read default document")
            .with_details(format!("path={}; err={}", path.display(), e))
    })?;

    let doc = UploadDoc { name, bytes };
    ingest_document(store, embedder, cfg, &doc).map_err(|e| {
        AppError::new("DEFAULT_DOC_FAILED", "Failed to ingest default document")
            .with_details(format!("cause={e}"))
            .with_retryable(e.retryable)
    })
}
