//! Sentence segmentation.
//!
//! A sentence ends at `.`, `!` or `?` when that mark is immediately followed by whitespace, or at
//! the end of the text. The heuristic is deliberately simple: abbreviations (`M. Dupont`),
//! decimals followed by a space, and ellipses all produce a boundary when whitespace follows.
//!
//! Whitespace here is Unicode `White_Space` plus the information separators U+001C..=U+001F,
//! which `char::is_whitespace` leaves out.

use regex::Regex;
use std::sync::LazyLock;

/// Terminal punctuation followed by the whitespace run that separates it from the next sentence.
static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?][\s\x1C-\x1F]+").expect("sentence boundary pattern is valid")
});

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Split raw text into an ordered list of sentences.
///
/// The text is trimmed first, the whitespace between sentences is dropped, and the terminal
/// punctuation stays attached to its sentence. Empty or whitespace-only text yields no
/// sentences; text without terminal punctuation yields a single sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = text.trim_matches(is_separator);
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Punctuation marks are single-byte, so the sentence ends one byte past the match start.
        push_sentence(&mut sentences, &text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    push_sentence(&mut sentences, &text[start..]);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, fragment: &str) {
    if !fragment.is_empty() {
        sentences.push(fragment.to_string());
    }
}
