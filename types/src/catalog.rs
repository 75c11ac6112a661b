//! The model catalog: display name to provider identifier plus metadata.

use std::sync::Arc;

use serde::Serialize;

use crate::naming::{display_name_for, is_chat_model};
use crate::profile::{Profile, describe, icon_for};

/// Display name preferred as the initial selection when present.
pub const PREFERRED_MODEL: &str = "Llama 3.3 70B";

/// Built-in catalog used whenever the live listing is unavailable.
pub const STATIC_MODELS: &[(&str, &str)] = &[
    ("Llama 3.3 70B", "llama-3.3-70b-versatile"),
    ("Llama 3.1 70B", "llama-3.1-70b-versatile"),
    ("Llama 3.1 8B", "llama-3.1-8b-instant"),
    ("Mixtral 8x7B", "mixtral-8x7b-32768"),
    ("Llama 3.2 90B Vision", "llama-3.2-90b-vision-preview"),
    ("Llama 3.2 11B Vision", "llama-3.2-11b-vision-preview"),
];

/// What a model accepts beyond plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub vision: bool,
}

impl Capabilities {
    /// Capabilities as advertised by the display name.
    #[must_use]
    pub fn from_display_name(display_name: &str) -> Self {
        Self {
            vision: display_name.contains("Vision"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelEntry {
    display_name: String,
    model_id: String,
    icon: &'static str,
    profile: Profile,
    capabilities: Capabilities,
}

impl ModelEntry {
    /// Build an entry, deriving icon, profile and capabilities from the display name.
    #[must_use]
    pub fn new(display_name: impl Into<String>, model_id: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            icon: icon_for(&display_name),
            profile: describe(&display_name),
            capabilities: Capabilities::from_display_name(&display_name),
            model_id: model_id.into(),
            display_name,
        }
    }

    /// Build an entry from a raw provider identifier.
    #[must_use]
    pub fn from_model_id(model_id: &str) -> Self {
        Self::new(display_name_for(model_id), model_id)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        self.icon
    }

    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.capabilities.vision
    }
}

/// Ordered, display-name-keyed set of models.
///
/// A catalog is an immutable snapshot; rebuilding produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Catalog {
    entries: Vec<ModelEntry>,
}

pub type SharedCatalog = Arc<Catalog>;

impl Catalog {
    /// The six built-in models, in their fixed order.
    #[must_use]
    pub fn static_defaults() -> Self {
        let mut catalog = Self::default();
        for (name, id) in STATIC_MODELS {
            catalog.upsert(ModelEntry::new(*name, *id));
        }
        catalog
    }

    /// Insert an entry; an existing entry with the same display name is
    /// replaced in place so the catalog order is stable.
    fn upsert(&mut self, entry: ModelEntry) {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.display_name == entry.display_name)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    #[must_use]
    pub fn get(&self, display_name: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.display_name == display_name)
    }

    #[must_use]
    pub fn contains(&self, display_name: &str) -> bool {
        self.get(display_name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ModelEntry::display_name)
    }

    #[must_use]
    pub fn first(&self) -> Option<&ModelEntry> {
        self.entries.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by provider identifier.
    #[must_use]
    pub fn by_model_id(&self, model_id: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.model_id == model_id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ModelEntry;
    type IntoIter = std::slice::Iter<'a, ModelEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Merge the static defaults with a live listing.
///
/// Non-chat identifiers are dropped. A live entry whose display name matches
/// a static one replaces it at the static position; other live entries are
/// appended in listing order. A failed listing leaves `static_defaults` as is.
#[must_use]
pub fn build_catalog<E>(static_defaults: &Catalog, fetch_result: Result<Vec<String>, E>) -> Catalog {
    let Ok(model_ids) = fetch_result else {
        return static_defaults.clone();
    };

    let mut catalog = static_defaults.clone();
    for model_id in model_ids.iter().filter(|id| is_chat_model(id)) {
        catalog.upsert(ModelEntry::from_model_id(model_id));
    }
    catalog
}
