//! Per-session model selection and sampling settings.
//!
//! Every model in the catalog is either active or disabled for the session.
//! Once an operation returns, `selected_model` names an active catalog entry,
//! or is `None` when no active entry is left.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use playground_config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, Settings};
use playground_types::{Catalog, ModelEntry, PREFERRED_MODEL, Transcript};
use thiserror::Error;

pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=2.0;
pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 256..=4096;
pub const MAX_TOKENS_STEP: u32 = 256;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("unknown model '{0}'")]
    UnknownModel(String),
    #[error("model '{0}' is disabled for this session")]
    ModelDisabled(String),
    #[error("temperature {0} is outside 0.0..=2.0")]
    TemperatureOutOfRange(f64),
    #[error("max tokens {0} is outside 256..=4096")]
    MaxTokensOutOfRange(u32),
}

/// What happened to the selection after a model left the active set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reselection {
    /// The selection did not need to move.
    Unchanged,
    Switched { to: String },
    /// No active model is left; the selection is now empty.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub messages: usize,
    pub model: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub disabled: usize,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    transcript: Transcript,
    selected_model: Option<String>,
    disabled_models: BTreeSet<String>,
    temperature: f64,
    max_tokens: u32,
}

impl SessionState {
    /// Fresh session. `preferred` wins when it names a catalog entry, then
    /// `Llama 3.3 70B`, then the first entry.
    #[must_use]
    pub fn new(catalog: &Catalog, preferred: Option<&str>) -> Self {
        let selected_model = preferred
            .filter(|name| catalog.contains(name))
            .or_else(|| catalog.contains(PREFERRED_MODEL).then_some(PREFERRED_MODEL))
            .or_else(|| catalog.first().map(ModelEntry::display_name))
            .map(ToString::to_string);

        Self {
            transcript: Transcript::new(),
            selected_model,
            disabled_models: BTreeSet::new(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Fresh session using the configured model and sampling defaults.
    ///
    /// Invalid configured values fall back to the built-in defaults.
    #[must_use]
    pub fn from_settings(catalog: &Catalog, settings: &Settings) -> Self {
        let mut session = Self::new(catalog, settings.model.as_deref());
        if let Err(err) = session.set_temperature(settings.temperature) {
            tracing::warn!(error = %err, "Ignoring configured temperature");
        }
        if let Err(err) = session.set_max_tokens(settings.max_tokens) {
            tracing::warn!(error = %err, "Ignoring configured max_tokens");
        }
        session
    }

    #[must_use]
    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    #[must_use]
    pub fn selected_entry<'c>(&self, catalog: &'c Catalog) -> Option<&'c ModelEntry> {
        self.selected_model.as_deref().and_then(|name| catalog.get(name))
    }

    #[must_use]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_models.contains(name)
    }

    pub fn disabled_models(&self) -> impl Iterator<Item = &str> {
        self.disabled_models.iter().map(String::as_str)
    }

    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    #[must_use]
    pub const fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn select_model(&mut self, catalog: &Catalog, name: &str) -> Result<(), SessionError> {
        if !catalog.contains(name) {
            return Err(SessionError::UnknownModel(name.to_string()));
        }
        if self.is_disabled(name) {
            return Err(SessionError::ModelDisabled(name.to_string()));
        }
        if self.selected_model.as_deref() != Some(name) {
            tracing::info!(model = name, "Model selected");
            self.selected_model = Some(name.to_string());
        }
        Ok(())
    }

    /// Take `name` out of the active set, moving the selection if needed.
    pub fn disable(&mut self, catalog: &Catalog, name: &str) -> Reselection {
        if self.disabled_models.insert(name.to_string()) {
            tracing::warn!(model = name, "Model disabled for this session");
        }
        if self.selected_model.as_deref() == Some(name) {
            self.auto_reselect(catalog)
        } else {
            Reselection::Unchanged
        }
    }

    /// Select the first active model in catalog order.
    pub fn auto_reselect(&mut self, catalog: &Catalog) -> Reselection {
        let next = self
            .available_models(catalog)
            .next()
            .map(|entry| entry.display_name().to_string());

        match next {
            Some(name) if self.selected_model.as_deref() == Some(name.as_str()) => {
                Reselection::Unchanged
            }
            Some(name) => {
                tracing::info!(model = %name, "Switched to next available model");
                self.selected_model = Some(name.clone());
                Reselection::Switched { to: name }
            }
            None => {
                tracing::warn!("No usable model left in the catalog");
                self.selected_model = None;
                Reselection::Exhausted
            }
        }
    }

    /// Re-establish a valid selection against a rebuilt catalog.
    pub fn reconcile(&mut self, catalog: &Catalog) -> Reselection {
        let valid = self
            .selected_model
            .as_deref()
            .is_some_and(|name| catalog.contains(name) && !self.is_disabled(name));
        if valid {
            Reselection::Unchanged
        } else {
            self.auto_reselect(catalog)
        }
    }

    /// Re-enable every model. An empty selection is refilled.
    pub fn reset_disabled(&mut self, catalog: &Catalog) -> Reselection {
        self.disabled_models.clear();
        self.reconcile(catalog)
    }

    pub fn reset_conversation(&mut self) {
        self.transcript.clear();
    }

    /// Set the sampling temperature, snapped to the nearest 0.1.
    pub fn set_temperature(&mut self, value: f64) -> Result<f64, SessionError> {
        if !TEMPERATURE_RANGE.contains(&value) {
            return Err(SessionError::TemperatureOutOfRange(value));
        }
        let snapped = (value * 10.0).round() / 10.0;
        self.temperature = snapped.clamp(*TEMPERATURE_RANGE.start(), *TEMPERATURE_RANGE.end());
        Ok(self.temperature)
    }

    /// Set the completion limit, snapped to the nearest multiple of 256.
    pub fn set_max_tokens(&mut self, value: u32) -> Result<u32, SessionError> {
        if !MAX_TOKENS_RANGE.contains(&value) {
            return Err(SessionError::MaxTokensOutOfRange(value));
        }
        let snapped = (value + MAX_TOKENS_STEP / 2) / MAX_TOKENS_STEP * MAX_TOKENS_STEP;
        self.max_tokens = snapped.clamp(*MAX_TOKENS_RANGE.start(), *MAX_TOKENS_RANGE.end());
        Ok(self.max_tokens)
    }

    /// Catalog entries that are not disabled, in catalog order.
    pub fn available_models<'c>(
        &self,
        catalog: &'c Catalog,
    ) -> impl Iterator<Item = &'c ModelEntry> {
        let disabled = &self.disabled_models;
        catalog
            .iter()
            .filter(move |entry| !disabled.contains(entry.display_name()))
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            messages: self.transcript.len(),
            model: self.selected_model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            disabled: self.disabled_models.len(),
        }
    }
}
