//! Change notifications for the presentational layer

use serde::{Deserialize, Serialize};

use super::types::Message;

/// Something the screen should re-render for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A send created a new session
    SessionCreated { session_id: String, title: String },
    /// A message landed, immediately or from the timeline
    MessageAppended { session_id: String, message: Message },
    /// The active pointer moved (None: composing a new chat)
    ActiveChanged { session_id: Option<String> },
    /// A session was removed
    SessionDeleted { session_id: String },
}

impl ChatEvent {
    /// Session the event concerns, if any
    pub fn session_id(&self) -> Option<&str> {
        match self {
            ChatEvent::SessionCreated { session_id, .. }
            | ChatEvent::MessageAppended { session_id, .. }
            | ChatEvent::SessionDeleted { session_id } => Some(session_id),
            ChatEvent::ActiveChanged { session_id } => session_id.as_deref(),
        }
    }
}
