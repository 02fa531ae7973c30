//! Chat sessions for the assistant screen
//!
//! The store keeps every session in memory for the lifetime of the screen;
//! nothing is persisted. Bot replies are canned templates delivered after a
//! short delay on a virtual clock.

pub mod events;
pub mod render;
pub mod reply;
pub mod seed;
pub mod service;
pub mod store;
pub mod types;

pub use events::ChatEvent;
pub use render::{render_line, MessageView};
pub use service::{ChatService, ChatSnapshot};
pub use store::{Landed, SendReceipt, SessionStore};
pub use types::{Attachment, AttachmentKind, ChatSession, Message, Sender};
