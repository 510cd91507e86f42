/// Grounding prompt: the question and retrieved context are embedded
/// verbatim, and the model is told to answer from the context alone.
pub(crate) fn grounded_answer_prompt(question: &str, context: &str) -> String {
    format!(
        r#"You are an intelligent document assistant. Use the provided context to answer the user's question.

Question:
{question}

Context:
{context}

Answer based only on the context provided."#
    )
}
