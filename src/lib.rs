/// LLM Spellcheck - position-anchored spelling and grammar corrections
///
/// Library behind the `llm-spellcheck` service: chunking, model prompting,
/// reply salvage, occurrence location, correction merging and result caching.

pub mod config;
pub mod core;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub use crate::config::AppConfig;
pub use crate::core::cache::ResultCache;
pub use crate::core::llm::{LLMError, OllamaClient, TextGenerator};
pub use crate::core::server::{router, SpellcheckServer};
pub use crate::core::spellcheck::{Correction, SpellcheckService};
