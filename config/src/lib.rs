//! `~/.playground/config.toml` loading.
//!
//! ```toml
//! [app]
//! model = "Llama 3.3 70B"
//! ascii_only = false
//!
//! [api]
//! base_url = "https://api.groq.com/openai/v1"
//! key = "gsk_..."
//! timeout_secs = 60
//!
//! [session]
//! temperature = 0.7
//! max_tokens = 1024
//!
//! [catalog]
//! ttl_secs = 3600
//! switch_pause_ms = 2000
//! ```
//!
//! Every section and key is optional. A missing file is not an error.
//! `GROQ_API_KEY` and `PLAYGROUND_BASE_URL` take precedence over the file.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use playground_types::ApiKey;
use serde::Deserialize;
use thiserror::Error;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const BASE_URL_ENV: &str = "PLAYGROUND_BASE_URL";

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 3600;
pub const DEFAULT_SWITCH_PAUSE_MS: u64 = 2000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaygroundConfig {
    pub app: Option<AppConfig>,
    pub api: Option<ApiSection>,
    pub session: Option<SessionConfig>,
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Display name of the model to select at startup.
    pub model: Option<String>,
    /// Use ASCII markers instead of emoji icons.
    #[serde(default)]
    pub ascii_only: bool,
}

#[derive(Default, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub key: Option<String>,
    pub timeout_secs: Option<u64>,
}

// Manual Debug impl to keep the key out of logs.
impl std::fmt::Debug for ApiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSection")
            .field("base_url", &self.base_url)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionConfig {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// How long a fetched catalog stays valid.
    pub ttl_secs: Option<u64>,
    /// Pause after a model is disabled, before the next prompt.
    pub switch_pause_ms: Option<u64>,
}

/// Fully resolved settings: file values, env overrides and defaults applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub model: Option<String>,
    pub ascii_only: bool,
    /// `None` means the provider default.
    pub base_url: Option<String>,
    pub api_key: Option<ApiKey>,
    pub timeout: Duration,
    pub temperature: f64,
    pub max_tokens: u32,
    pub catalog_ttl: Duration,
    pub switch_pause: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        PlaygroundConfig::default().resolve_with(|_| None)
    }
}

impl PlaygroundConfig {
    /// Load from the default location. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No home directory; using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found; using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read config at {:?}: {}", path, source);
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content).map_err(|source| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, source);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve against the process environment.
    #[must_use]
    pub fn resolve(&self) -> Settings {
        self.resolve_with(|name| env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup.
    #[must_use]
    pub fn resolve_with(&self, env_lookup: impl Fn(&str) -> Option<String>) -> Settings {
        let app = self.app.as_ref();
        let api = self.api.as_ref();
        let session = self.session.as_ref();
        let catalog = self.catalog.as_ref();

        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let api_key = non_blank(env_lookup(API_KEY_ENV))
            .or_else(|| non_blank(api.and_then(|a| a.key.clone())))
            .map(ApiKey::new);
        let base_url = non_blank(env_lookup(BASE_URL_ENV))
            .or_else(|| non_blank(api.and_then(|a| a.base_url.clone())));

        Settings {
            model: non_blank(app.and_then(|a| a.model.clone())),
            ascii_only: app.is_some_and(|a| a.ascii_only),
            base_url,
            api_key,
            timeout: Duration::from_secs(
                api.and_then(|a| a.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            temperature: session
                .and_then(|s| s.temperature)
                .unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: session
                .and_then(|s| s.max_tokens)
                .unwrap_or(DEFAULT_MAX_TOKENS),
            catalog_ttl: Duration::from_secs(
                catalog
                    .and_then(|c| c.ttl_secs)
                    .unwrap_or(DEFAULT_CATALOG_TTL_SECS),
            ),
            switch_pause: Duration::from_millis(
                catalog
                    .and_then(|c| c.switch_pause_ms)
                    .unwrap_or(DEFAULT_SWITCH_PAUSE_MS),
            ),
        }
    }
}

#[must_use]
pub fn playground_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".playground"))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    playground_dir().map(|dir| dir.join("config.toml"))
}
