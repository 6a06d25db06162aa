//! Correction Aggregator
//!
//! Folds per-chunk annotations into one correction per word. Words are
//! keyed case-insensitively, entries keep the order in which their key was
//! first seen, positions from every chunk are concatenated and suggestions
//! are unioned without duplicates.

use indexmap::IndexMap;

use super::types::{Annotation, Correction, Position};

/// Insertion-ordered collection of corrections keyed by lowercase word.
#[derive(Debug, Clone, Default)]
pub struct CorrectionSet {
    entries: IndexMap<String, Correction>,
}

impl CorrectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one annotation and the positions located for it in its chunk.
    pub fn merge(&mut self, annotation: Annotation, positions: Vec<Position>) {
        let correction = Correction::new(annotation.word);
        let entry = self
            .entries
            .entry(correction.key())
            .or_insert(correction);

        entry.positions.extend(positions);
        entry.add_suggestions(annotation.suggestions);
    }

    /// Look up a correction by any casing of its word.
    pub fn get(&self, word: &str) -> Option<&Correction> {
        self.entries.get(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Corrections in first-seen order.
    pub fn into_vec(self) -> Vec<Correction> {
        self.entries.into_values().collect()
    }
}
