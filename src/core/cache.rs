//! Result cache for model-backed requests.
//!
//! Identical requests inside the freshness window are answered without
//! another model round trip. Entries are keyed by a SHA-256 fingerprint of
//! request mode, model and text and expire lazily: an expired entry is removed when it is
//! read, never by a background sweep.
//!
//! # Thread Safety
//!
//! All state sits behind one `tokio::sync::Mutex`, so the expiry check, the
//! eviction and a concurrent insert under the same key cannot interleave.
//!
//! # Usage
//!
//! ```rust,ignore
//! let cache = ResultCache::new(CacheConfig::default());
//! let key = fingerprint(CacheMode::Rewrite, "llama3", "I has a apple");
//! cache.put(key.clone(), CachedValue::Text("I have an apple".into())).await;
//! assert!(cache.get(&key).await.is_some());
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::config::CacheConfig;
use crate::core::spellcheck::Correction;

/// Request mode a cached value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Per-word corrections
    Spellcheck,
    /// Full-text rewrite
    Rewrite,
}

impl CacheMode {
    /// Leading bytes of the hashed key. Neither tag is a prefix of the
    /// other, so no text can make the two modes share a key.
    fn tag(self) -> &'static [u8] {
        match self {
            CacheMode::Spellcheck => b"spell|",
            CacheMode::Rewrite => b"AUTO|",
        }
    }
}

/// Deterministic cache key for a `(mode, model, text)` triple.
pub fn fingerprint(mode: CacheMode, model: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(mode.tag());
    hasher.update(model.as_bytes());
    hasher.update(b"||");
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// A cached request result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    Corrections(Vec<Correction>),
    Text(String),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedValue,
    created_at: Instant,
}

/// Process-wide, time-bounded result store.
#[derive(Debug)]
pub struct ResultCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: Option<usize>,
}

impl ResultCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: config.ttl(),
            max_entries: config.max_entries,
        }
    }

    /// Cache with an explicit TTL and no capacity bound.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            max_entries: None,
        }
    }

    /// Fresh value for `key`, evicting it if it has expired.
    pub async fn get(&self, key: &str) -> Option<CachedValue> {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => entry.created_at.elapsed() > self.ttl,
        };

        if expired {
            entries.remove(key);
            log::debug!("Cache entry {} expired", short_key(key));
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub async fn put(&self, key: String, value: CachedValue) {
        let mut entries = self.entries.lock().await;

        if let Some(max) = self.max_entries {
            if !entries.contains_key(&key) && entries.len() >= max {
                let ttl = self.ttl;
                entries.retain(|_, entry| entry.created_at.elapsed() <= ttl);
                if entries.len() >= max {
                    let oldest = entries
                        .iter()
                        .min_by_key(|(_, entry)| entry.created_at)
                        .map(|(k, _)| k.clone());
                    if let Some(oldest) = oldest {
                        entries.remove(&oldest);
                    }
                }
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                created_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

fn short_key(key: &str) -> &str {
    key.get(..12).unwrap_or(key)
}
