use std::collections::VecDeque;

/// Chunk sizing, measured in characters (never bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    pub max_chars: usize,
    pub overlap_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: 1000,
            overlap_chars: 200,
        }
    }
}

/// Separators tried in order; the empty separator falls back to splitting
/// between characters, so no chunk can ever exceed `max_chars`.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Split `text` into chunks of at most `max_chars` characters, preferring
/// paragraph breaks over line breaks over spaces as cut points. Consecutive
/// chunks carry up to `overlap_chars` of trailing text into the next chunk.
pub fn split_text(text: &str, cfg: &ChunkConfig) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    split_recursive(text, &SEPARATORS, cfg)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn split_recursive(text: &str, separators: &[&str], cfg: &ChunkConfig) -> Vec<String> {
    // Pick the first separator actually present; "" always matches.
    let mut separator: &str = separators.last().copied().unwrap_or("");
    let mut remaining: &[&str] = &[];
    for (i, sep) in separators.iter().enumerate() {
        if sep.is_empty() || text.contains(sep) {
            separator = sep;
            remaining = &separators[i + 1..];
            break;
        }
    }

    let pieces: Vec<String> = if separator.is_empty() {
        text.chars().map(|c| c.to_string()).collect()
    } else {
        text.split(separator).map(|s| s.to_string()).collect()
    };

    let mut chunks: Vec<String> = Vec::new();
    let mut fitting: Vec<String> = Vec::new();
    for piece in pieces {
        if char_len(&piece) < cfg.max_chars {
            fitting.push(piece);
        } else {
            if !fitting.is_empty() {
                chunks.extend(merge_pieces(&fitting, separator, cfg));
                fitting.clear();
            }
            if remaining.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(split_recursive(&piece, remaining, cfg));
            }
        }
    }
    if !fitting.is_empty() {
        chunks.extend(merge_pieces(&fitting, separator, cfg));
    }
    chunks
}

/// Greedily pack pieces into chunks up to `max_chars`, then slide: once a
/// chunk is emitted, drop pieces from its front until what is left fits the
/// configured overlap, and let the next chunk grow from that tail.
fn merge_pieces(pieces: &[String], separator: &str, cfg: &ChunkConfig) -> Vec<String> {
    let sep_len = char_len(separator);
    let mut chunks: Vec<String> = Vec::new();
    let mut window: VecDeque<String> = VecDeque::new();
    let mut total = 0usize;

    for piece in pieces {
        let piece_len = char_len(piece);
        let join_len = if window.is_empty() { 0 } else { sep_len };
        if total + piece_len + join_len > cfg.max_chars && !window.is_empty() {
            if let Some(chunk) = join_window(&window, separator) {
                chunks.push(chunk);
            }
            while total > cfg.overlap_chars
                || (total + piece_len + if window.is_empty() { 0 } else { sep_len }
                    > cfg.max_chars
                    && total > 0)
            {
                let Some(front) = window.pop_front() else {
                    break;
                };
                total -= char_len(&front) + if window.is_empty() { 0 } else { sep_len };
            }
        }
        window.push_back(piece.clone());
        total += piece_len + if window.len() > 1 { sep_len } else { 0 };
    }

    if let Some(chunk) = join_window(&window, separator) {
        chunks.push(chunk);
    }
    chunks
}

fn join_window(window: &VecDeque<String>, separator: &str) -> Option<String> {
    let joined = window
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
