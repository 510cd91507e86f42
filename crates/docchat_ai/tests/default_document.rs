use docchat_ai::config::RagConfig;
use docchat_ai::embeddings::Embedder;
use docchat_ai::ingest::{ensure_ready, ingest_default_document};
use docchat_ai::store::{MemoryStore, VectorStore};
use docchat_core::error::AppError;
use tempfile::tempdir;

struct LetterFreqEmbedder;

impl Embedder for LetterFreqEmbedder {
    fn embed(&self, _model: &str, input: &str) -> Result<Vec<f32>, AppError> {
        let mut v = vec![0.0f32; 26];
        for ch in input.chars() {
            if ch.is_ascii_alphabetic() {
                v[(ch.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
            }
        }
        Ok(v)
    }
}

fn test_config() -> RagConfig {
    RagConfig {
        vector_dims: 26,
        ..RagConfig::default()
    }
}

#[test]
fn present_default_document_is_ingested_under_its_file_name() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("resume.txt");
    std::fs::write(&path, "ten years of systems programming experience").expect("write");

    let store = MemoryStore::new();
    let cfg = test_config();
    ensure_ready(&store, &cfg).expect("ensure collection");

    let count =
        ingest_default_document(&store, &LetterFreqEmbedder, &cfg, &path).expect("ingest");
    assert_eq!(count, 1);
    assert_eq!(store.point_count(&cfg.collection), 1);

    let hits = store
        .search(
            &cfg.collection,
            &LetterFreqEmbedder.embed("", "systems programming").expect("embed"),
            1,
        )
        .expect("search");
    assert_eq!(hits[0].payload.source, "resume.txt");
}

#[test]
fn missing_default_document_fails_with_default_doc_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nowhere.pdf");

    let store = MemoryStore::new();
    let cfg = test_config();
    ensure_ready(&store, &cfg).expect("ensure collection");

    let err = ingest_default_document(&store, &LetterFreqEmbedder, &cfg, &path).unwrap_err();
    assert_eq!(err.code, "DEFAULT_DOC_FAILED");
    assert_eq!(store.point_count(&cfg.collection), 0);
}

#[test]
fn unreadable_default_document_reports_but_store_is_unchanged() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("resume.xyz");
    std::fs::write(&path, "bytes in an unrecognized format").expect("write");

    let store = MemoryStore::new();
    let cfg = test_config();
    ensure_ready(&store, &cfg).expect("ensure collection");

    let err = ingest_default_document(&store, &LetterFreqEmbedder, &cfg, &path).unwrap_err();
    assert_eq!(err.code, "DEFAULT_DOC_FAILED");
    assert!(err
        .details
        .as_deref()
        .unwrap_or_default()
        .contains("EXTRACT_UNSUPPORTED_FORMAT"));
}
