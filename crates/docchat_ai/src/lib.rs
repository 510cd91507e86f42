pub mod config;
pub mod embeddings;
pub mod gemini;
pub mod ingest;
pub mod llm;
pub mod query;
pub mod store;
