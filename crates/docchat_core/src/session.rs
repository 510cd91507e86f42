use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const EXPORT_FILE_NAME: &str = "chat_history.txt";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}

/// Append-only record of the (question, answer) pairs of one session.
/// Lives in memory only; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    turns: Vec<ChatTurn>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ChatTurn {
            question: question.into(),
            answer: answer.into(),
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// `Q<i>: <question>\nA<i>: <answer>\n\n` per turn, 1-based, append order.
    pub fn render_as_text(&self) -> String {
        let mut out = String::new();
        for (i, turn) in self.turns.iter().enumerate() {
            out.push_str(&format!(
                "Q{n}: {q}\nA{n}: {a}\n\n",
                n = i + 1,
                q = turn.question,
                a = turn.answer
            ));
        }
        out
    }

    /// Write the transcript as UTF-8 into `dir/chat_history.txt`.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, AppError> {
        let path = dir.join(EXPORT_FILE_NAME);
        fs::write(&path, self.render_as_text().as_bytes()).map_err(|e| {
            AppError::new("SESSION_EXPORT_FAILED", "Failed to write chat history")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        Ok(path)
    }
}
