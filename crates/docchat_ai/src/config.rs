use docchat_core::chunk::ChunkConfig;

/// Fixed shared collection; every session and every user reads and writes
/// the same records.
pub const DEFAULT_COLLECTION: &str = "rag_chat_app";

pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-004";
pub const DEFAULT_GEN_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_VECTOR_DIMS: u32 = 768;
pub const DEFAULT_TOP_K: u32 = 3;

/// Settings shared by the ingestion and query pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagConfig {
    pub collection: String,
    pub embed_model: String,
    pub gen_model: String,
    pub vector_dims: u32,
    pub top_k: u32,
    pub chunking: ChunkConfig,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            gen_model: DEFAULT_GEN_MODEL.to_string(),
            vector_dims: DEFAULT_VECTOR_DIMS,
            top_k: DEFAULT_TOP_K,
            chunking: ChunkConfig::default(),
        }
    }
}
