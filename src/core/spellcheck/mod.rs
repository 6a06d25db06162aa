//! Spellcheck Module
//!
//! Turns a model's loosely structured annotations into position-anchored
//! corrections.
//!
//! # Module Structure
//!
//! - `chunker`: whitespace-aligned splitting with exact offsets
//! - `extract`: JSON array salvage and annotation normalization
//! - `locate`: whole-word occurrence search
//! - `aggregate`: case-insensitive merge across chunks
//! - `prompts`: prompt templates
//! - `pipeline`: `SpellcheckService`, the request-level orchestration

pub mod aggregate;
pub mod chunker;
pub mod extract;
pub mod locate;
pub mod pipeline;
pub mod prompts;
pub mod types;

pub use aggregate::CorrectionSet;
pub use chunker::{chunk_text, Chunk};
pub use extract::{extract_json_array, parse_annotations};
pub use locate::locate;
pub use pipeline::SpellcheckService;
pub use types::{Annotation, Correction, Position};
