//! Core domain types for Playground.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.
//!
//! - [`catalog`]: model entries, the ordered catalog and the merge rule
//! - [`naming`]: provider identifier to display name rules
//! - [`profile`]: descriptive profiles and icons per display name
//! - [`message`]: the user/assistant transcript
//! - [`script`]: Han ideograph detection in replies

pub mod catalog;
pub mod message;
pub mod naming;
pub mod profile;
mod proofs;
pub mod script;

pub use catalog::{
    Capabilities, Catalog, ModelEntry, PREFERRED_MODEL, STATIC_MODELS, SharedCatalog,
    build_catalog,
};
pub use message::{AssistantMessage, ImageAttachment, Message, Transcript, UserMessage};
pub use naming::{display_name_for, is_chat_model};
pub use profile::{Profile, Quality, Speed, ascii_icon_for, describe, icon_for};
pub use proofs::{EmptyStringError, NonEmptyString};
pub use script::{ScriptScan, scan as scan_script};

/// API key wrapper that never prints its secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
