//! Property-based tests for occurrence location
//!
//! Tests invariants:
//! - Every span lies within the chunk and has `start < end`
//! - The covered text equals the word, ignoring ASCII case
//! - Spans are strictly ascending
//! - Shifting the chunk offset shifts every span by the same amount

use proptest::prelude::*;

use crate::core::spellcheck::locate;

fn chunk_strategy() -> impl Strategy<Value = (String, String)> {
    (
        "[a-z]{2,6}",
        prop::collection::vec("[a-zA-Z]{1,6}", 0..20),
        prop::collection::vec(any::<bool>(), 0..20),
    )
        .prop_map(|(word, fillers, inserts)| {
            let mut parts = Vec::new();
            for (i, filler) in fillers.into_iter().enumerate() {
                parts.push(filler);
                if inserts.get(i).copied().unwrap_or(false) {
                    parts.push(if i % 2 == 0 { word.to_uppercase() } else { word.clone() });
                }
            }
            (parts.join(" "), word)
        })
}

proptest! {
    #[test]
    fn spans_cover_the_word((chunk, word) in chunk_strategy()) {
        let chars: Vec<char> = chunk.chars().collect();
        let positions = locate(&chunk, &word, 0);
        let mut previous_end = 0;
        for (start, end) in positions {
            prop_assert!(start < end);
            prop_assert!(end <= chars.len());
            prop_assert!(start >= previous_end);
            let covered: String = chars[start..end].iter().collect();
            prop_assert!(covered.eq_ignore_ascii_case(&word));
            previous_end = end;
        }
    }

    #[test]
    fn offset_shifts_spans((chunk, word) in chunk_strategy(), offset in 0usize..10_000) {
        let base = locate(&chunk, &word, 0);
        let shifted = locate(&chunk, &word, offset);
        let expected: Vec<(usize, usize)> =
            base.iter().map(|(s, e)| (s + offset, e + offset)).collect();
        prop_assert_eq!(shifted, expected);
    }

    #[test]
    fn standalone_occurrences_are_all_found((chunk, word) in chunk_strategy()) {
        let standalone = chunk
            .split(' ')
            .filter(|token| token.eq_ignore_ascii_case(&word))
            .count();
        prop_assert_eq!(locate(&chunk, &word, 0).len(), standalone);
    }
}
