//! Spellcheck Data Types
//!
//! Correction records returned to clients and the normalized form of a
//! single model annotation.

use serde::{Deserialize, Serialize};

/// Half-open `[start, end)` character span into the original request text.
///
/// Serializes as a two-element JSON array.
pub type Position = (usize, usize);

/// A word flagged by the model together with its suggestions and every
/// located occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Original casing of the first sighting
    pub word: String,
    /// Replacement candidates, deduplicated, in first-seen order
    pub suggestions: Vec<String>,
    /// Occurrences in the full input text, in chunk order
    pub positions: Vec<Position>,
}

impl Correction {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            suggestions: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Merge key: corrections for `Teh` and `teh` are the same entry.
    pub fn key(&self) -> String {
        self.word.to_lowercase()
    }

    /// Append suggestions not already present, keeping first-seen order.
    pub fn add_suggestions<I>(&mut self, suggestions: I)
    where
        I: IntoIterator<Item = String>,
    {
        for suggestion in suggestions {
            if !self.suggestions.contains(&suggestion) {
                self.suggestions.push(suggestion);
            }
        }
    }
}

/// One model-reported word after normalization at the ingestion boundary.
///
/// The raw reply may carry `suggestion` as a string or an array; by the time
/// an `Annotation` exists it is always a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub word: String,
    pub suggestions: Vec<String>,
}

impl Annotation {
    pub fn new(word: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            word: word.into(),
            suggestions,
        }
    }
}
