//! One user submission, from transcript append to classified outcome.
//!
//! The controller owns no state. Everything it reads or mutates arrives in a
//! [`SessionContext`]: the chat backend, the current catalog snapshot, and the
//! session being driven.

use std::future::Future;

use playground_providers::{ChatMessage, ChatRequest, Client, Content, ContentPart, ProviderError};
use playground_types::{
    AssistantMessage, Catalog, ImageAttachment, ModelEntry, NonEmptyString, UserMessage,
    scan_script,
};
use thiserror::Error;

use crate::attachment::png_data_url;
use crate::errors::{FailureKind, user_facing_message};
use crate::session::{Reselection, SessionState};

/// Appended to the prompt when an image cannot be forwarded.
pub const IMAGE_DROPPED_NOTE: &str =
    " (Note: an image was attached, but the current model cannot process images)";

/// Anything that can answer a chat completion request.
pub trait ChatBackend {
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

impl ChatBackend for Client {
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send {
        self.chat(request)
    }
}

pub struct SessionContext<'a, B> {
    pub backend: &'a B,
    pub catalog: &'a Catalog,
    pub session: &'a mut SessionState,
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub text: NonEmptyString,
    pub image: Option<ImageAttachment>,
}

impl Submission {
    #[must_use]
    pub fn text(text: NonEmptyString) -> Self {
        Self { text, image: None }
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }
}

/// Side information the caller should show next to the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The selected model has no vision support; the image was not sent.
    ImageDropped,
    /// The reply contained Han ideographs; they are listed here.
    ScriptFlagged { offending: Vec<char> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Answered {
        reply: AssistantMessage,
        notices: Vec<Notice>,
    },
    /// The model was taken out of the session; the failed turn was withdrawn.
    ModelDisabled {
        model: String,
        kind: FailureKind,
        error: String,
        reselection: Reselection,
        notices: Vec<Notice>,
    },
    Failed {
        model: String,
        error: String,
        notices: Vec<Notice>,
    },
}

impl SubmitOutcome {
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        match self {
            SubmitOutcome::Answered { notices, .. }
            | SubmitOutcome::ModelDisabled { notices, .. }
            | SubmitOutcome::Failed { notices, .. } => notices,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no usable model: every model is disabled")]
    NoUsableModel,
}

#[must_use]
pub fn system_directive(display_name: &str) -> String {
    format!(
        "You are {display_name} model.\n\n\
         CRITICAL RULES:\n\
         - ONLY use Korean (한국어) OR English\n\
         - NEVER use Chinese (汉字), Japanese (日本語), or other languages\n\
         - For Korean: Use ONLY Hangul (한글), NO Hanja (한자)\n\
         - Match the user's language (Korean question → Korean answer)"
    )
}

/// Build the single-turn request for `entry`.
///
/// Returns `Notice::ImageDropped` when an image was supplied but the model
/// cannot take it.
#[must_use]
pub fn build_request(
    entry: &ModelEntry,
    text: &str,
    image: Option<&ImageAttachment>,
    temperature: f64,
    max_tokens: u32,
) -> (ChatRequest, Option<Notice>) {
    let (content, notice) = match image {
        Some(image) if entry.supports_vision() => (
            Content::Parts(vec![
                ContentPart::text(text),
                ContentPart::image_data_url(png_data_url(image.png_bytes())),
            ]),
            None,
        ),
        Some(_) => (
            Content::Text(format!("{text}{IMAGE_DROPPED_NOTE}")),
            Some(Notice::ImageDropped),
        ),
        None => (Content::Text(text.to_string()), None),
    };

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(system_directive(entry.display_name())),
            ChatMessage::user(content),
        ],
        model: entry.model_id().to_string(),
        temperature: Some(temperature),
        max_tokens: Some(max_tokens),
    };
    (request, notice)
}

/// Run one submission against the selected model.
pub async fn submit<B: ChatBackend>(
    ctx: SessionContext<'_, B>,
    submission: Submission,
) -> Result<SubmitOutcome, SubmitError> {
    let SessionContext {
        backend,
        catalog,
        session,
    } = ctx;

    let entry = session
        .selected_entry(catalog)
        .ok_or(SubmitError::NoUsableModel)?;
    let model = entry.display_name().to_string();

    let (request, dropped) = build_request(
        entry,
        submission.text.as_str(),
        submission.image.as_ref(),
        session.temperature(),
        session.max_tokens(),
    );
    let mut notices: Vec<Notice> = dropped.into_iter().collect();

    session
        .transcript_mut()
        .push_user(UserMessage::new(submission.text, submission.image));

    match backend.complete(&request).await {
        Ok(reply) => {
            let scan = scan_script(&reply);
            if scan.flagged {
                tracing::warn!(model = %model, chars = ?scan.offending, "Reply contains Han ideographs");
                notices.push(Notice::ScriptFlagged {
                    offending: scan.offending.clone(),
                });
            }
            let reply = AssistantMessage::new(&model, reply.as_str(), scan.flagged);
            session.transcript_mut().push_assistant(reply.clone());
            Ok(SubmitOutcome::Answered { reply, notices })
        }
        Err(err) => {
            let raw = err.to_string();
            let kind = FailureKind::classify(&raw);
            let error = user_facing_message(&raw);

            if !kind.disables_model() {
                tracing::warn!(model = %model, error = %raw, "Chat request failed");
                return Ok(SubmitOutcome::Failed {
                    model,
                    error,
                    notices,
                });
            }

            tracing::warn!(model = %model, ?kind, error = %raw, "Disabling model after failure");
            session.transcript_mut().pop_trailing_user();
            let reselection = session.disable(catalog, &model);
            Ok(SubmitOutcome::ModelDisabled {
                model,
                kind,
                error,
                reselection,
                notices,
            })
        }
    }
}
