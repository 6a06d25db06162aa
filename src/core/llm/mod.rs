//! LLM Client Module
//!
//! Access to the external model service that does the actual linguistic
//! work.
//!
//! # Module Structure
//!
//! - `error`: upstream failure taxonomy
//! - `provider`: the `TextGenerator` trait the pipeline depends on
//! - `ollama`: Ollama HTTP implementation with streamed generation

pub mod error;
pub mod ollama;
pub mod provider;

pub use error::{LLMError, Result};
pub use ollama::{FragmentAssembler, OllamaClient};
pub use provider::TextGenerator;

#[cfg(test)]
pub use provider::MockTextGenerator;
