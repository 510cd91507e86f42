use std::collections::BTreeMap;
use std::sync::Mutex;

use docchat_core::error::AppError;

use super::similarity;
use super::{DistanceMetric, Point, ScoredPoint, VectorStore};

#[derive(Debug)]
struct Collection {
    dims: u32,
    metric: DistanceMetric,
    points: BTreeMap<String, Point>,
}

/// In-process `VectorStore` with cosine scoring. Stands in for Qdrant in
/// tests and offline dry runs; holds nothing beyond the life of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self, collection: &str) -> usize {
        let guard = self
            .collections
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        guard.get(collection).map_or(0, |c| c.points.len())
    }
}

impl VectorStore for MemoryStore {
    fn ensure_collection(
        &self,
        name: &str,
        dims: u32,
        metric: DistanceMetric,
    ) -> Result<(), AppError> {
        let mut guard = self
            .collections
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        match guard.get(name) {
            Some(existing) => {
                if existing.dims != dims || existing.metric != metric {
                    return Err(AppError::new(
                        "STORE_COLLECTION_FAILED",
                        "Collection already exists with a different configuration",
                    )
                    .with_details(format!(
                        "name={name}; existing_dims={}; requested_dims={dims}",
                        existing.dims
                    )));
                }
                Ok(())
            }
            None => {
                guard.insert(
                    name.to_string(),
                    Collection {
                        dims,
                        metric,
                        points: BTreeMap::new(),
                    },
                );
                Ok(())
            }
        }
    }

    fn upsert(&self, collection: &str, points: Vec<Point>) -> Result<(), AppError> {
        let mut guard = self
            .collections
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let coll = guard.get_mut(collection).ok_or_else(|| {
            AppError::new("STORE_UPSERT_FAILED", "Collection does not exist")
                .with_details(format!("name={collection}"))
        })?;
        for p in points {
            if p.vector.len() as u32 != coll.dims {
                return Err(AppError::new(
                    "STORE_UPSERT_FAILED",
                    "Point vector dims do not match the collection",
                )
                .with_details(format!(
                    "id={}; expected={}; got={}",
                    p.id,
                    coll.dims,
                    p.vector.len()
                )));
            }
            coll.points.insert(p.id.clone(), p);
        }
        Ok(())
    }

    fn search(
        &self,
        collection: &str,
        vector: &[f32],
        top_k: u32,
    ) -> Result<Vec<ScoredPoint>, AppError> {
        let guard = self
            .collections
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let coll = guard.get(collection).ok_or_else(|| {
            AppError::new("STORE_SEARCH_FAILED", "Collection does not exist")
                .with_details(format!("name={collection}"))
        })?;
        if vector.len() as u32 != coll.dims {
            return Err(AppError::new(
                "STORE_SEARCH_FAILED",
                "Query vector dims do not match the collection",
            )
            .with_details(format!(
                "expected={}; got={}",
                coll.dims,
                vector.len()
            )));
        }

        let qnorm = similarity::l2_norm(vector);
        if qnorm == 0.0 {
            return Err(AppError::new(
                "STORE_SEARCH_FAILED",
                "Query vector norm is zero",
            ));
        }

        let mut hits: Vec<ScoredPoint> = Vec::new();
        for p in coll.points.values() {
            let pnorm = similarity::l2_norm(&p.vector);
            if pnorm == 0.0 {
                continue;
            }
            hits.push(ScoredPoint {
                id: p.id.clone(),
                score: similarity::cosine(vector, &p.vector, qnorm, pnorm),
                payload: p.payload.clone(),
            });
        }

        // Descending score; ties broken by id for deterministic output.
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(top_k as usize);
        Ok(hits)
    }
}
