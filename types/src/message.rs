//! Conversation transcript model.
//!
//! A transcript alternates between user turns and assistant replies. It is
//! append-only, except that the trailing user turn may be withdrawn when its
//! request could not be answered.

use serde::Serialize;

use crate::proofs::NonEmptyString;

/// An image attached to a user turn, already normalized to PNG.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ImageAttachment {
    name: String,
    #[serde(skip)]
    png: Vec<u8>,
}

impl ImageAttachment {
    #[must_use]
    pub fn new(name: impl Into<String>, png: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            png,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }
}

// Image bytes are noise in logs.
impl std::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("name", &self.name)
            .field("bytes", &self.png.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMessage {
    content: NonEmptyString,
    image: Option<ImageAttachment>,
}

impl UserMessage {
    #[must_use]
    pub fn new(content: NonEmptyString, image: Option<ImageAttachment>) -> Self {
        Self { content, image }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantMessage {
    model_used: String,
    content: String,
    script_flag: bool,
}

impl AssistantMessage {
    /// `content` is the raw reply; display code re-runs the script filter.
    #[must_use]
    pub fn new(model_used: impl Into<String>, content: impl Into<String>, script_flag: bool) -> Self {
        Self {
            model_used: model_used.into(),
            content: content.into(),
            script_flag,
        }
    }

    /// Display name of the model that produced the reply.
    #[must_use]
    pub fn model_used(&self) -> &str {
        &self.model_used
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn script_flag(&self) -> bool {
        self.script_flag
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User(UserMessage),
    Assistant(AssistantMessage),
}

impl Message {
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Message::User(m) => m.content(),
            Message::Assistant(m) => m.content(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, message: UserMessage) {
        self.messages.push(Message::User(message));
    }

    pub fn push_assistant(&mut self, message: AssistantMessage) {
        self.messages.push(Message::Assistant(message));
    }

    /// Withdraw the last message if, and only if, it is a user turn.
    pub fn pop_trailing_user(&mut self) -> Option<UserMessage> {
        match self.messages.last() {
            Some(Message::User(_)) => match self.messages.pop() {
                Some(Message::User(user)) => Some(user),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}
