use docchat_core::error::AppError;
use docchat_core::session::ChatLog;

use crate::config::RagConfig;
use crate::embeddings::Embedder;
use crate::llm::Llm;
use crate::store::VectorStore;

mod prompts;

/// Answer a question against the shared collection: embed the question,
/// retrieve the top-k chunks, build a grounding prompt and delegate to the
/// model. On success the turn is appended to `log`; on failure the log is
/// untouched and a single `QUERY_FAILED` carries the cause.
pub fn answer(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
    llm: &dyn Llm,
    cfg: &RagConfig,
    log: &mut ChatLog,
    question: &str,
) -> Result<String, AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::new("QUERY_FAILED", "Question must not be empty"));
    }

    let reply = run_query(store, embedder, llm, cfg, question).map_err(|e| {
        let details = match e.details.as_deref() {
            Some(d) => format!("cause={e}; {d}"),
            None => format!("cause={e}"),
        };
        AppError::new("QUERY_FAILED", "Failed to answer question")
            .with_details(details)
            .with_retryable(e.retryable)
    })?;

    log.append(question, reply.clone());
    Ok(reply)
}

fn run_query(
    store: &dyn VectorStore,
    embedder: &dyn Embedder,
    llm: &dyn Llm,
    cfg: &RagConfig,
    question: &str,
) -> Result<String, AppError> {
    let query_vector = embedder.embed(&cfg.embed_model, question)?;
    let hits = store.search(&cfg.collection, &query_vector, cfg.top_k)?;

    // Retrieved order as the store returned it; repeated chunks from the
    // same document are kept.
    let context = hits
        .iter()
        .map(|h| h.payload.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = prompts::grounded_answer_prompt(question, &context);
    let raw = llm.generate(&cfg.gen_model, &prompt)?;
    Ok(raw.trim().to_string())
}
