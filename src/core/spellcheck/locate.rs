//! Occurrence Locator
//!
//! Finds case-insensitive whole-word occurrences of a reported word inside
//! a chunk and translates them into character offsets of the full text.

use regex::RegexBuilder;

use super::types::Position;

/// Locate every occurrence of `word` in `chunk_text`.
///
/// `word` is matched literally and must be bounded by word boundaries on
/// both sides, so `cat` does not match inside `cats`. Returned spans are
/// shifted by `chunk_offset`, the character offset of the chunk in the
/// original text. A word that never appears yields an empty vector.
pub fn locate(chunk_text: &str, word: &str, chunk_offset: usize) -> Vec<Position> {
    if word.is_empty() {
        return Vec::new();
    }

    let pattern = format!(r"\b{}\b", regex::escape(word));
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            log::warn!("Cannot build matcher for reported word: {}", e);
            return Vec::new();
        }
    };

    // Matches arrive in ascending byte order, so char offsets are counted
    // incrementally instead of rescanning from the start for every match.
    let mut positions = Vec::new();
    let mut scanned_bytes = 0;
    let mut scanned_chars = 0;

    for m in re.find_iter(chunk_text) {
        scanned_chars += chunk_text[scanned_bytes..m.start()].chars().count();
        let start = scanned_chars;
        let end = start + m.as_str().chars().count();
        scanned_bytes = m.end();
        scanned_chars = end;

        positions.push((chunk_offset + start, chunk_offset + end));
    }

    positions
}
