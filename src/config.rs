use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Environment variable prefix; `__` separates nested keys.
pub const ENV_PREFIX: &str = "LLM_SPELLCHECK_";

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "LLM_SPELLCHECK_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ollama: OllamaConfig,
    pub cache: CacheConfig,
    pub spellcheck: SpellcheckConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Model service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Model used when a request does not name one.
    pub default_model: String,
    /// Timeout for a single generation in seconds.
    pub timeout_secs: u64,
}

/// Result cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds an entry stays fresh.
    pub ttl_seconds: u64,
    /// Optional upper bound on stored entries. Unbounded when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
}

/// Pipeline defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellcheckConfig {
    /// Chunk budget in characters when a request does not set one.
    pub max_chunk_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            default_model: "llama3".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 60,
            max_entries: None,
        }
    }
}

impl Default for SpellcheckConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 1600,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind, if `host` is an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl OllamaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl AppConfig {
    /// Load defaults, then the TOML file, then `LLM_SPELLCHECK_*` variables.
    /// Returns `Default` if the merged configuration cannot be extracted.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            log::info!("Loading config from {}", config_path.display());
        } else {
            log::debug!(
                "No config file at {}, using defaults and environment",
                config_path.display()
            );
        }

        match Self::figment(&config_path).extract() {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to load config from {}: {e}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// The layered configuration sources, lowest priority first.
    pub fn figment(config_path: &std::path::Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// `LLM_SPELLCHECK_CONFIG` if set, otherwise `~/.config/llm-spellcheck/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("llm-spellcheck").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("llm-spellcheck").join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}
