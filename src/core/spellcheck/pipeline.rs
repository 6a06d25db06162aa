//! Spellcheck Pipeline
//!
//! Orchestrates one request end to end:
//! 1. Answer from the result cache when a fresh entry exists
//! 2. Split the text into chunks
//! 3. For each chunk, in order: prompt the model, salvage the JSON array,
//!    locate each reported word, merge into the running correction set
//! 4. Store the result in the cache
//!
//! Chunks are processed strictly one after another. The first upstream
//! failure aborts the request; corrections from earlier chunks are
//! discarded rather than returned partially.

use std::sync::Arc;

use super::aggregate::CorrectionSet;
use super::chunker::chunk_text;
use super::extract::parse_annotations;
use super::locate::locate;
use super::prompts::{rewrite_prompt, spellcheck_prompt};
use super::types::Correction;
use crate::core::cache::{fingerprint, CacheMode, CachedValue, ResultCache};
use crate::core::llm::{Result, TextGenerator};

/// Runs spellcheck and rewrite requests against a model service.
#[derive(Clone)]
pub struct SpellcheckService {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ResultCache>,
    default_model: String,
    default_max_chunk_chars: usize,
}

impl SpellcheckService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ResultCache>,
        default_model: impl Into<String>,
        default_max_chunk_chars: usize,
    ) -> Self {
        Self {
            generator,
            cache,
            default_model: default_model.into(),
            default_max_chunk_chars,
        }
    }

    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        &self.generator
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// The requested model, or the default when absent or blank.
    pub fn resolve_model<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(model) if !model.trim().is_empty() => model,
            _ => &self.default_model,
        }
    }

    /// Position-anchored corrections for every word the model flags in `text`.
    #[tracing::instrument(name = "spellcheck", skip_all, fields(chars = text.chars().count()))]
    pub async fn spellcheck(
        &self,
        text: &str,
        model: Option<&str>,
        max_chunk_chars: Option<usize>,
    ) -> Result<Vec<Correction>> {
        let model = self.resolve_model(model);
        let key = fingerprint(CacheMode::Spellcheck, model, text);

        if let Some(CachedValue::Corrections(cached)) = self.cache.get(&key).await {
            log::debug!("Spellcheck cache hit ({} corrections)", cached.len());
            return Ok(cached);
        }

        let max_chars = max_chunk_chars.unwrap_or(self.default_max_chunk_chars);
        let chunks = chunk_text(text, max_chars);
        log::info!(
            "Spellchecking {} chars in {} chunk(s) with model {}",
            text.chars().count(),
            chunks.len(),
            model
        );

        let mut corrections = CorrectionSet::new();
        for chunk in &chunks {
            if chunk.is_blank() {
                continue;
            }

            let reply = self
                .generator
                .generate(model, &spellcheck_prompt(chunk.text))
                .await
                .map_err(|e| {
                    log::warn!("Model call failed on chunk {}: {}", chunk.index, e);
                    e
                })?;

            let annotations = parse_annotations(&reply);
            log::debug!(
                "Chunk {} produced {} annotation(s)",
                chunk.index,
                annotations.len()
            );

            for annotation in annotations {
                let positions = locate(chunk.text, &annotation.word, chunk.start_offset);
                corrections.merge(annotation, positions);
            }
        }

        let result = corrections.into_vec();
        self.cache
            .put(key, CachedValue::Corrections(result.clone()))
            .await;
        Ok(result)
    }

    /// The whole of `text` rewritten by the model.
    #[tracing::instrument(name = "correct", skip_all, fields(chars = text.chars().count()))]
    pub async fn correct(&self, text: &str, model: Option<&str>) -> Result<String> {
        let model = self.resolve_model(model);
        let key = fingerprint(CacheMode::Rewrite, model, text);

        if let Some(CachedValue::Text(cached)) = self.cache.get(&key).await {
            log::debug!("Rewrite cache hit");
            return Ok(cached);
        }

        log::info!(
            "Rewriting {} chars with model {}",
            text.chars().count(),
            model
        );
        let corrected = self
            .generator
            .generate(model, &rewrite_prompt(text))
            .await?
            .trim()
            .to_string();

        self.cache
            .put(key, CachedValue::Text(corrected.clone()))
            .await;
        Ok(corrected)
    }
}
