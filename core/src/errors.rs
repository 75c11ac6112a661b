//! Provider failure classification.
//!
//! Chat failures are matched against the raw provider error text. Four kinds
//! mean the selected model is unusable for the rest of the session; anything
//! else is surfaced as-is.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Decommissioned,
    RateLimited,
    TermsRequired,
    ChatUnsupported,
    Other,
}

impl FailureKind {
    /// Match order matters: the first rule that fires wins.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if raw.contains("decommissioned") {
            FailureKind::Decommissioned
        } else if lower.contains("rate_limit") {
            FailureKind::RateLimited
        } else if raw.contains("model_terms_required") || lower.contains("terms acceptance") {
            FailureKind::TermsRequired
        } else if raw.contains("does not support chat completions") {
            FailureKind::ChatUnsupported
        } else {
            FailureKind::Other
        }
    }

    /// Whether this failure takes the model out of the session.
    #[must_use]
    pub const fn disables_model(self) -> bool {
        !matches!(self, FailureKind::Other)
    }

    /// One-line notice for a disabled model.
    #[must_use]
    pub fn notice(self, model: &str) -> String {
        match self {
            FailureKind::Decommissioned => format!("{model} has been decommissioned."),
            FailureKind::RateLimited => format!("{model} hit its token rate limit."),
            FailureKind::TermsRequired => format!("{model} requires accepting its terms."),
            FailureKind::ChatUnsupported => {
                format!("{model} does not support chat (TTS/audio only).")
            }
            FailureKind::Other => format!("{model} request failed."),
        }
    }

    /// Extra guidance shown under the notice, if any.
    #[must_use]
    pub const fn guidance(self) -> Option<&'static str> {
        match self {
            FailureKind::TermsRequired => {
                Some("Accept the model terms in the Groq Console to use it.")
            }
            _ => None,
        }
    }
}

/// Split `"API error 400: {body}"` into status and body.
#[must_use]
pub fn split_api_error(raw: &str) -> Option<(String, String)> {
    let rest = raw.strip_prefix("API error ")?;
    let (status, body) = rest.split_once(": ")?;
    Some((status.trim().to_string(), body.trim().to_string()))
}

/// Pull `error.message` (or a bare `message`) out of a JSON error body.
pub fn extract_error_message(raw: &str) -> Option<String> {
    let body = split_api_error(raw).map_or_else(|| raw.trim().to_string(), |(_, body)| body);
    let payload: Value = serde_json::from_str(&body).ok()?;
    payload
        .pointer("/error/message")
        .and_then(|value| value.as_str())
        .or_else(|| payload.pointer("/message").and_then(|value| value.as_str()))
        .or_else(|| payload.as_str())
        .map(ToString::to_string)
}

/// Short form of a provider error for the terminal.
#[must_use]
pub fn user_facing_message(raw: &str) -> String {
    let trimmed = raw.trim();
    match (split_api_error(trimmed), extract_error_message(trimmed)) {
        (Some((status, _)), Some(message)) => format!("API error {status}: {message}"),
        (None, Some(message)) => message,
        _ if trimmed.is_empty() => "unknown error".to_string(),
        _ => trimmed.to_string(),
    }
}
