//! Chat data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// Kind of media an attachment points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentKind::Image => write!(f, "image"),
            AttachmentKind::Document => write!(f, "document"),
        }
    }
}

impl FromStr for AttachmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(AttachmentKind::Image),
            "document" => Ok(AttachmentKind::Document),
            other => Err(format!("invalid attachment kind: '{other}'")),
        }
    }
}

/// Reference to user-selected media
///
/// Only the reference is kept; the bytes behind `uri` are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Identifier assigned by the picker
    pub id: String,
    /// Display name (usually the file name)
    pub name: String,
    /// Image or document
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    /// Location of the media
    pub uri: String,
}

impl Attachment {
    /// Create an attachment with a fresh id
    pub fn new(name: impl Into<String>, kind: AttachmentKind, uri: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            uri: uri.into(),
        }
    }

    /// Override the generated id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// A chat message
///
/// Constructed only through [`Message::user_text`], [`Message::user_attachment`]
/// and [`Message::bot`], so every message carries text or an attachment and
/// its sender cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    text: String,
    sender: Sender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attachment: Option<Attachment>,
    timestamp: DateTime<Utc>,
}

impl Message {
    fn new(text: String, sender: Sender, attachment: Option<Attachment>) -> Self {
        debug_assert!(
            !text.trim().is_empty() || attachment.is_some(),
            "message needs text or an attachment"
        );
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            sender,
            attachment,
            timestamp: Utc::now(),
        }
    }

    /// A text message from the user; `text` must not be blank
    pub(crate) fn user_text(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::User, None)
    }

    /// An attachment-only message from the user
    pub fn user_attachment(attachment: Attachment) -> Self {
        Self::new(String::new(), Sender::User, Some(attachment))
    }

    /// A reply from the assistant; `text` must not be blank
    pub(crate) fn bot(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::Bot, None)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Stamp the time the message actually landed in a session
    pub(crate) fn landed_now(mut self) -> Self {
        self.timestamp = Utc::now();
        self
    }
}

/// One chat thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    id: String,
    title: String,
    /// Messages in chronological order
    messages: Vec<Message>,
    /// Session creation time
    created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create an empty session; the title is fixed from here on
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append a message. Message ids are UUIDs, so uniqueness within the
    /// session holds without a lookup.
    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}
