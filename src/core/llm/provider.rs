//! Model Service Seam
//!
//! The pipeline talks to the language model only through [`TextGenerator`],
//! so tests can swap the HTTP client for a mock.

use async_trait::async_trait;

use super::error::Result;

/// A service that turns prompts into text and can report its models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Generate the complete reply for `prompt` using `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;

    /// Names of the models the service can run.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Whether the service answers at all. Never fails.
    async fn health_check(&self) -> bool;
}
