//! Ollama Client
//!
//! Talks to a local Ollama server:
//! - `POST /api/generate` streams newline-delimited JSON fragments
//!   (`{"response": "...", "done": false}`) that are concatenated into one reply
//! - `GET /api/tags` lists installed models and doubles as a health probe

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{LLMError, Result};
use super::provider::TextGenerator;
use crate::config::OllamaConfig;

/// Timeout for the health probe.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for listing models.
pub const LIST_MODELS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// One streamed line of a `/api/generate` reply.
#[derive(Debug, Deserialize)]
struct GenerateFragment {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Reassembles a streamed reply from arbitrary network chunks.
///
/// Bytes are buffered until a newline completes a fragment, so a JSON line
/// split across two network reads still decodes. Lines that fail to decode
/// are skipped.
#[derive(Debug, Default)]
pub struct FragmentAssembler {
    pending: Vec<u8>,
    text: String,
    fragments: usize,
    dropped: usize,
    done: bool,
}

impl FragmentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next network chunk.
    pub fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        while let Some(newline) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=newline).collect();
            self.consume_line(&line);
        }
    }

    /// Flush any unterminated final line and return the assembled text.
    pub fn finish(mut self) -> String {
        let rest = std::mem::take(&mut self.pending);
        self.consume_line(&rest);
        if self.dropped > 0 {
            log::debug!(
                "Dropped {} malformed fragment(s) out of {}",
                self.dropped,
                self.fragments + self.dropped
            );
        }
        self.text
    }

    /// Whether a fragment with `done: true` has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    fn consume_line(&mut self, line: &[u8]) {
        let line = line.trim_ascii();
        if line.is_empty() {
            return;
        }
        match serde_json::from_slice::<GenerateFragment>(line) {
            Ok(fragment) => {
                self.fragments += 1;
                self.text.push_str(&fragment.response);
                self.done |= fragment.done;
            }
            Err(e) => {
                self.dropped += 1;
                log::trace!("Skipping malformed stream fragment: {}", e);
            }
        }
    }
}

/// HTTP client for an Ollama server.
pub struct OllamaClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl OllamaClient {
    /// Create a client for `base_url` whose generations time out after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| LLMError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    pub fn from_config(config: &OllamaConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url("/api/generate"))
            .timeout(self.timeout)
            .json(&GenerateRequest { model, prompt })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError { status, message });
        }

        let mut assembler = FragmentAssembler::new();
        let mut stream = response.bytes_stream();
        while let Some(item) = stream.next().await {
            assembler.push(&item?);
        }

        if !assembler.is_done() {
            log::debug!("Generation stream for model {} ended without a done fragment", model);
        }
        Ok(assembler.finish())
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .timeout(LIST_MODELS_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError { status, message });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.url("/api/tags"))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                log::debug!("Health probe to {} failed: {}", self.base_url, e);
                false
            }
        }
    }
}
