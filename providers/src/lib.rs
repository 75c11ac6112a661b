//! HTTP client for OpenAI-compatible inference providers.
//!
//! # Architecture
//!
//! - [`Client`] - one configured connection to a provider (base URL, key, timeout)
//! - [`models`] - `GET {base}/models`, the live model listing
//! - [`chat`] - `POST {base}/chat/completions`, single-shot (non-streaming) completions
//!
//! # Error Handling
//!
//! Every call returns [`ProviderError`]. Non-2xx responses keep the (capped)
//! response body so callers can inspect provider error codes such as
//! `model_decommissioned` or `rate_limit_exceeded`.

pub mod chat;
pub mod models;

use std::time::Duration;

use playground_types::ApiKey;
use thiserror::Error;

pub use chat::{ChatMessage, ChatRequest, Content, ContentPart, ImageUrl, Role};

/// Groq's OpenAI-compatible endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_MAX_IDLE_PER_HOST: usize = 16;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Response contained no message content")]
    EmptyResponse,
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Provider endpoint, credentials and request timeout.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    #[must_use]
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

/// A configured provider connection.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ApiConfig,
}

impl Client {
    /// Build a client. Plain HTTP is only accepted for loopback hosts.
    pub fn new(config: ApiConfig) -> Result<Self, ProviderError> {
        let url = url::Url::parse(config.base_url())
            .map_err(|_| ProviderError::InvalidBaseUrl(config.base_url().to_string()))?;
        let https_only = !is_loopback(&url);
        if !https_only {
            tracing::warn!(base_url = %url, "Allowing plain HTTP for loopback provider");
        }

        let http = base_client_builder()
            .https_only(https_only)
            .timeout(config.timeout())
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.config.endpoint(path))
            .bearer_auth(self.config.api_key())
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.config.endpoint(path))
            .bearer_auth(self.config.api_key())
    }
}

fn is_loopback(url: &url::Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

fn base_client_builder() -> reqwest::ClientBuilder {
    use reqwest::header::{HeaderMap, HeaderValue};

    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(concat!("playground/", env!("CARGO_PKG_VERSION"))),
    );

    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
        .default_headers(default_headers)
}

/// Read an error body, keeping at most 32 KiB.
pub async fn read_capped_error_body(mut response: reqwest::Response) -> String {
    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                body.extend_from_slice(&chunk);
                if body.len() > MAX_ERROR_BODY_BYTES {
                    body.truncate(MAX_ERROR_BODY_BYTES);
                    let text = String::from_utf8_lossy(&body);
                    return format!("{text}...(truncated)");
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, read = body.len(), "Error body cut short");
                break;
            }
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

/// Turn a non-2xx response into [`ProviderError::Api`].
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = read_capped_error_body(response).await;
    Err(ProviderError::Api { status, body })
}
