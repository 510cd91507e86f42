use docchat_core::chunk::{split_text, ChunkConfig};
use pretty_assertions::assert_eq;

/// Longest k such that the first k chars of `next` equal the last k chars of
/// `prev`.
fn overlap_len(prev: &str, next: &str) -> usize {
    let prev_chars: Vec<char> = prev.chars().collect();
    let next_chars: Vec<char> = next.chars().collect();
    let mut best = 0;
    for k in 1..=prev_chars.len().min(next_chars.len()) {
        if prev_chars[prev_chars.len() - k..] == next_chars[..k] {
            best = k;
        }
    }
    best
}

#[test]
fn every_chunk_stays_under_the_limit() {
    let cfg = ChunkConfig::default();
    let text = "lorem ipsum dolor sit amet ".repeat(300);
    let chunks = split_text(&text, &cfg);
    assert!(chunks.len() > 1);
    for c in &chunks {
        assert!(c.chars().count() <= cfg.max_chars, "chunk too long: {}", c.len());
    }
}

#[test]
fn consecutive_chunks_share_an_overlap_region() {
    let cfg = ChunkConfig::default();
    // Unique words so the shared region can be measured unambiguously.
    let text = (0..600)
        .map(|i| format!("w{i:03}"))
        .collect::<Vec<_>>()
        .join(" ");
    let chunks = split_text(&text, &cfg);
    assert!(chunks.len() > 2);
    for pair in chunks.windows(2) {
        let shared = overlap_len(&pair[0], &pair[1]);
        assert!(shared >= 100, "expected overlap, got {shared} shared chars");
        assert!(shared <= cfg.overlap_chars);
    }
}

#[test]
fn paragraph_boundaries_are_preferred_over_midtext_cuts() {
    let cfg = ChunkConfig::default();
    let p1 = "alpha ".repeat(100).trim().to_string(); // 599 chars
    let p2 = "bravo ".repeat(100).trim().to_string();
    let text = format!("{p1}\n\n{p2}");
    let chunks = split_text(&text, &cfg);
    // Neither paragraph fits next to the other under 1000 chars, and a whole
    // paragraph is too large to carry as overlap, so each becomes one chunk.
    assert_eq!(chunks, vec![p1, p2]);
}

#[test]
fn small_paragraphs_are_packed_together() {
    let cfg = ChunkConfig::default();
    let text = "one\n\ntwo\n\nthree";
    let chunks = split_text(text, &cfg);
    assert_eq!(chunks, vec!["one\n\ntwo\n\nthree".to_string()]);
}

#[test]
fn empty_and_blank_inputs_yield_no_chunks() {
    let cfg = ChunkConfig::default();
    assert!(split_text("", &cfg).is_empty());
    assert!(split_text(" \n \n\n\t ", &cfg).is_empty());
}
