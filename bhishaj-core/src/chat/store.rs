//! Session store for the chat screen
//!
//! Owns every chat session plus the active-session pointer. All mutation is
//! synchronous; staggered attachment and bot-reply appends are queued on a
//! virtual [`Timeline`] and applied when the clock is advanced.

use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use super::reply::{bot_reply, derive_title};
use super::seed::example_sessions;
use super::types::{Attachment, ChatSession, Message};
use crate::config::ChatConfig;
use crate::schedule::Timeline;

/// A deferred append, bound to the session that was active at send time
#[derive(Debug, Clone)]
struct PendingAppend {
    session_id: String,
    message: Message,
}

/// A message that landed in a session
#[derive(Debug, Clone, PartialEq)]
pub struct Landed {
    pub session_id: String,
    pub message: Message,
}

/// What a successful send did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Session every append of this send targets
    pub session_id: String,
    /// Whether the send created the session
    pub created_session: bool,
    /// Id of the text message appended immediately, if there was text
    pub text_message_id: Option<String>,
    /// Number of appends queued on the timeline (attachments + reply)
    pub scheduled: usize,
    /// Virtual time at which the bot reply lands
    pub reply_due: Duration,
}

/// In-memory collection of chat sessions
#[derive(Debug)]
pub struct SessionStore {
    config: ChatConfig,
    /// Sessions in creation order, as shown by the history list
    sessions: Vec<ChatSession>,
    /// None while composing a session that does not exist yet
    active_session_id: Option<String>,
    timeline: Timeline<PendingAppend>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new(config: ChatConfig) -> Self {
        Self {
            config,
            sessions: Vec::new(),
            active_session_id: None,
            timeline: Timeline::new(),
        }
    }

    /// Create a store pre-populated with example sessions, the first active
    pub fn with_examples(config: ChatConfig) -> Self {
        let mut store = Self::new(config);
        store.sessions = example_sessions();
        store.active_session_id = store.sessions.first().map(|s| s.id().to_string());
        store
    }

    /// Build from config, seeding if the config asks for it
    pub fn from_config(config: ChatConfig) -> Self {
        if config.seed_examples {
            Self::with_examples(config)
        } else {
            Self::new(config)
        }
    }

    /// Forget the active session; the next send creates a new one
    pub fn start_new_chat(&mut self) {
        debug!("Starting new chat");
        self.active_session_id = None;
    }

    /// Make `session_id` active. Unknown ids are ignored.
    pub fn switch_to(&mut self, session_id: &str) -> bool {
        if !self.contains(session_id) {
            debug!("Ignoring switch to unknown session {}", session_id);
            return false;
        }
        self.active_session_id = Some(session_id.to_string());
        true
    }

    /// Remove a session. Deleting the active one leaves no active session.
    pub fn delete_session(&mut self, session_id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id() != session_id);
        if self.sessions.len() == before {
            debug!("Ignoring delete of unknown session {}", session_id);
            return false;
        }

        if self.active_session_id.as_deref() == Some(session_id) {
            self.active_session_id = None;
        }
        info!("Deleted session {}", session_id);
        true
    }

    /// Send user input to the active session, creating one if needed
    ///
    /// Text lands immediately. Attachment `i` lands `i * stagger` later and
    /// the bot reply after all attachments plus the reply delay. Returns
    /// `None` without touching state when there is nothing to send.
    pub fn send_message(&mut self, text: &str, attachments: Vec<Attachment>) -> Option<SendReceipt> {
        let text = text.trim();
        if text.is_empty() && attachments.is_empty() {
            debug!("Ignoring empty send");
            return None;
        }

        let (session_id, created_session) = match self.active_session().map(|s| s.id().to_string()) {
            Some(id) => (id, false),
            None => (self.create_session(text, attachments.len()), true),
        };

        let text_message_id = if text.is_empty() {
            None
        } else {
            let message = Message::user_text(text);
            let id = message.id().to_string();
            self.append(&session_id, message);
            Some(id)
        };

        let stagger = self.config.attachment_stagger();
        let attachment_count = attachments.len();
        for (index, attachment) in attachments.into_iter().enumerate() {
            self.timeline.schedule_in(
                stagger * index as u32,
                PendingAppend {
                    session_id: session_id.clone(),
                    message: Message::user_attachment(attachment),
                },
            );
        }

        let reply_due = self.timeline.schedule_in(
            stagger * attachment_count as u32 + self.config.reply_delay(),
            PendingAppend {
                session_id: session_id.clone(),
                message: Message::bot(bot_reply(text, attachment_count)),
            },
        );

        debug!(
            "Queued {} attachment(s) and a reply for session {}",
            attachment_count, session_id
        );

        Some(SendReceipt {
            session_id,
            created_session,
            text_message_id,
            scheduled: attachment_count + 1,
            reply_due,
        })
    }

    /// Advance the virtual clock and apply due appends
    pub fn advance(&mut self, by: Duration) -> Vec<Landed> {
        let due = self.timeline.advance_by(by);
        self.apply(due)
    }

    /// Advance the virtual clock to an absolute time
    pub fn advance_to(&mut self, at: Duration) -> Vec<Landed> {
        let due = self.timeline.advance_to(at);
        self.apply(due)
    }

    /// Apply every pending append
    pub fn flush(&mut self) -> Vec<Landed> {
        let due = self.timeline.drain();
        self.apply(due)
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// Virtual time of the next pending append
    pub fn next_due(&self) -> Option<Duration> {
        self.timeline.next_due()
    }

    /// Number of appends not yet applied
    pub fn pending(&self) -> usize {
        self.timeline.len()
    }

    /// Number of appends not yet applied to one session
    pub fn pending_for(&self, session_id: &str) -> usize {
        self.timeline
            .pending()
            .filter(|p| p.session_id == session_id)
            .count()
    }

    /// Sessions in creation order
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn session(&self, session_id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id() == session_id)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.session(session_id).is_some()
    }

    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        self.active_session_id
            .as_deref()
            .and_then(|id| self.session(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    fn create_session(&mut self, text: &str, attachment_count: usize) -> String {
        let mut id = Uuid::new_v4().to_string();
        while self.contains(&id) {
            id = Uuid::new_v4().to_string();
        }
        let title = derive_title(text, attachment_count, self.config.title_max_chars);
        info!("Created session {} ({})", id, title);

        self.sessions.push(ChatSession::new(id.clone(), title));
        self.active_session_id = Some(id.clone());
        id
    }

    fn append(&mut self, session_id: &str, message: Message) -> bool {
        match self.sessions.iter_mut().find(|s| s.id() == session_id) {
            Some(session) => {
                session.push(message);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, due: Vec<PendingAppend>) -> Vec<Landed> {
        let mut landed = Vec::with_capacity(due.len());
        for pending in due {
            let PendingAppend {
                session_id,
                message,
            } = pending;
            // A deleted session stays deleted.
            if !self.contains(&session_id) {
                debug!(
                    "Dropping {} message for deleted session {}",
                    message.sender(),
                    session_id
                );
                continue;
            }
            let message = message.landed_now();
            self.append(&session_id, message.clone());
            landed.push(Landed {
                session_id,
                message,
            });
        }
        landed
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(ChatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::{AttachmentKind, Sender};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn image(id: &str) -> Attachment {
        Attachment::new(format!("{id}.jpg"), AttachmentKind::Image, format!("file://{id}"))
            .with_id(id)
    }

    #[test]
    fn test_deferred_message_is_stamped_when_it_lands() {
        let mut store = SessionStore::default();
        store.send_message("How to treat headache?", vec![image("a1")]).unwrap();
        let queued_at = chrono::Utc::now();
        std::thread::sleep(ms(5));

        let landed = store.flush();
        assert_eq!(landed.len(), 2);

        let session = store.active_session().unwrap();
        let text = &session.messages()[0];
        assert!(session.created_at() <= text.timestamp());
        assert!(text.timestamp() <= queued_at);
        for message in &session.messages()[1..] {
            assert!(message.timestamp() > queued_at);
        }
    }

    #[test]
    fn test_first_send_creates_session() {
        let mut store = SessionStore::default();
        let receipt = store.send_message("How to treat headache?", vec![]).unwrap();

        assert!(receipt.created_session);
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_session_id(), Some(receipt.session_id.as_str()));

        let session = store.active_session().unwrap();
        assert_eq!(session.title(), "How to treat headache?...");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text(), "How to treat headache?");
        assert_eq!(session.messages()[0].sender(), Sender::User);

        let landed = store.advance(ms(1000));
        assert_eq!(landed.len(), 1);
        let session = store.active_session().unwrap();
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].sender(), Sender::Bot);
    }

    #[test]
    fn test_reply_waits_for_delay() {
        let mut store = SessionStore::default();
        let receipt = store.send_message("hello", vec![]).unwrap();
        assert_eq!(receipt.reply_due, ms(1000));
        assert!(store.advance(ms(999)).is_empty());
        assert_eq!(store.advance(ms(1)).len(), 1);
    }

    #[test]
    fn test_empty_send_is_ignored() {
        let mut store = SessionStore::default();
        assert!(store.send_message("   ", vec![]).is_none());
        assert!(store.is_empty());
        assert_eq!(store.active_session_id(), None);
        assert_eq!(store.pending(), 0);

        let mut seeded = SessionStore::with_examples(ChatConfig::default());
        let before = seeded.active_session().unwrap().messages().len();
        assert!(seeded.send_message("", vec![]).is_none());
        assert_eq!(seeded.active_session().unwrap().messages().len(), before);
        assert_eq!(seeded.active_session_id(), Some("session-1"));
    }

    #[test]
    fn test_text_messages_accumulate_in_order() {
        let mut store = SessionStore::default();
        for text in ["one", "two", "three"] {
            store.send_message(text, vec![]);
        }
        let user_texts: Vec<&str> = store
            .active_session()
            .unwrap()
            .messages()
            .iter()
            .filter(|m| m.sender() == Sender::User)
            .map(|m| m.text())
            .collect();
        assert_eq!(user_texts, vec!["one", "two", "three"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_attachment_only_send() {
        let mut store = SessionStore::default();
        let receipt = store.send_message("", vec![image("a1")]).unwrap();

        let session = store.session(&receipt.session_id).unwrap();
        assert_eq!(session.title(), "1 attachments...");
        assert!(session.messages().is_empty());
        assert_eq!(receipt.text_message_id, None);
        assert_eq!(receipt.scheduled, 2);

        store.flush();
        let messages = store.session(&receipt.session_id).unwrap().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].attachment().map(|a| a.id.as_str()), Some("a1"));
        assert_eq!(messages[0].sender(), Sender::User);
        assert_eq!(messages[1].sender(), Sender::Bot);
    }

    #[test]
    fn test_attachments_stagger_before_reply() {
        let mut store = SessionStore::default();
        let receipt = store
            .send_message("look", vec![image("a"), image("b"), image("c")])
            .unwrap();
        assert_eq!(receipt.reply_due, ms(3 * 500 + 1000));

        let first = store.advance(Duration::ZERO);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].message.attachment().unwrap().id, "a");

        let second = store.advance(ms(500));
        assert_eq!(second[0].message.attachment().unwrap().id, "b");

        let rest = store.flush();
        let order: Vec<Sender> = rest.iter().map(|l| l.message.sender()).collect();
        assert_eq!(order, vec![Sender::User, Sender::Bot]);

        let messages = store.active_session().unwrap().messages();
        assert_eq!(messages[0].text(), "look");
        assert_eq!(messages.len(), 5);
    }

    #[test]
    fn test_deferred_appends_follow_originating_session() {
        let mut store = SessionStore::with_examples(ChatConfig::default());
        let receipt = store.send_message("follow up", vec![image("x")]).unwrap();
        assert_eq!(receipt.session_id, "session-1");
        assert!(!receipt.created_session);

        assert!(store.switch_to("session-2"));
        store.flush();

        assert_eq!(store.session("session-1").unwrap().messages().len(), 5);
        assert_eq!(store.session("session-2").unwrap().messages().len(), 2);
        assert_eq!(store.active_session_id(), Some("session-2"));
    }

    #[test]
    fn test_deleted_session_is_not_resurrected() {
        let mut store = SessionStore::default();
        let receipt = store.send_message("bye", vec![image("a")]).unwrap();
        assert_eq!(store.pending_for(&receipt.session_id), 2);

        assert!(store.delete_session(&receipt.session_id));
        assert!(store.flush().is_empty());
        assert!(store.is_empty());
        assert_eq!(store.active_session_id(), None);
    }

    #[test]
    fn test_switch_to_unknown_is_noop() {
        let mut store = SessionStore::with_examples(ChatConfig::default());
        assert!(!store.switch_to("nope"));
        assert_eq!(store.active_session_id(), Some("session-1"));
    }

    #[test]
    fn test_switch_to_current_is_idempotent() {
        let mut store = SessionStore::with_examples(ChatConfig::default());
        let before: Vec<usize> = store.sessions().iter().map(|s| s.messages().len()).collect();
        for _ in 0..3 {
            assert!(store.switch_to("session-1"));
        }
        let after: Vec<usize> = store.sessions().iter().map(|s| s.messages().len()).collect();
        assert_eq!(before, after);
        assert_eq!(store.active_session_id(), Some("session-1"));
    }

    #[test]
    fn test_delete_active_clears_pointer() {
        let mut store = SessionStore::with_examples(ChatConfig::default());
        assert!(store.delete_session("session-1"));
        assert_eq!(store.active_session_id(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_other_keeps_active() {
        let mut store = SessionStore::with_examples(ChatConfig::default());
        assert!(store.delete_session("session-2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.sessions()[0].id(), "session-1");
        assert_eq!(store.active_session_id(), Some("session-1"));
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = SessionStore::with_examples(ChatConfig::default());
        assert!(!store.delete_session("session-9"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_start_new_chat_then_send_creates_second_session() {
        let mut store = SessionStore::with_examples(ChatConfig::default());
        store.start_new_chat();
        assert_eq!(store.active_session_id(), None);
        assert_eq!(store.len(), 2);

        let receipt = store.send_message("new topic", vec![]).unwrap();
        assert!(receipt.created_session);
        assert_eq!(store.len(), 3);
        assert_eq!(store.sessions()[2].id(), receipt.session_id);
    }

    #[test]
    fn test_long_title_is_truncated() {
        let mut store = SessionStore::default();
        store.send_message("What should I eat to lower my cholesterol naturally?", vec![]);
        assert_eq!(
            store.active_session().unwrap().title(),
            "What should I eat to lower my ..."
        );
    }

    #[test]
    fn test_from_config_seeds_on_request() {
        let config = ChatConfig {
            seed_examples: true,
            ..ChatConfig::default()
        };
        assert_eq!(SessionStore::from_config(config).len(), 2);
        assert!(SessionStore::from_config(ChatConfig::default()).is_empty());
    }
}
