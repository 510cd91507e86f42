use docchat_core::error::AppError;
use serde::{Deserialize, Serialize};

mod memory;
mod qdrant;
mod similarity;

pub use memory::MemoryStore;
pub use qdrant::QdrantStore;

/// Payload carried with every stored vector. This is the whole schema: the
/// document the chunk came from and the chunk text itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointPayload {
    pub source: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: PointPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredPoint {
    pub id: String,
    pub score: f32,
    pub payload: PointPayload,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DistanceMetric {
    Cosine,
    Dot,
    Euclid,
}

/// Narrow seam over the external vector database. The store owns the records
/// once upserted; callers keep no long-term reference to them.
pub trait VectorStore {
    /// Create the collection if absent; calling again with the same
    /// parameters must succeed without touching the existing configuration.
    fn ensure_collection(
        &self,
        name: &str,
        dims: u32,
        metric: DistanceMetric,
    ) -> Result<(), AppError>;

    /// Insert or replace records by id in a single batch call.
    fn upsert(&self, collection: &str, points: Vec<Point>) -> Result<(), AppError>;

    /// Top `top_k` records by descending similarity to `vector`.
    fn search(
        &self,
        collection: &str,
        vector: &[f32],
        top_k: u32,
    ) -> Result<Vec<ScoredPoint>, AppError>;
}
