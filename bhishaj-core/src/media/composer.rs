//! Draft input and the pending attachment tray

use super::picker::PickOutcome;
use crate::chat::types::Attachment;

/// What the user is about to send
#[derive(Debug, Clone, Default)]
pub struct Composer {
    text: String,
    attachments: Vec<Attachment>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Fold a pick result into the tray. Returns a notice to show the user
    /// when access was denied; cancellation is silent.
    pub fn accept(&mut self, outcome: PickOutcome) -> Option<String> {
        match outcome {
            PickOutcome::Picked(attachments) => {
                self.attachments.extend(attachments);
                None
            }
            PickOutcome::Cancelled => None,
            PickOutcome::Denied(reason) => Some(format!("Permission required: {}", reason)),
        }
    }

    /// Drop one pending attachment by id
    pub fn remove_attachment(&mut self, attachment_id: &str) -> bool {
        let before = self.attachments.len();
        self.attachments.retain(|a| a.id != attachment_id);
        self.attachments.len() != before
    }

    /// Whether a send would do anything
    pub fn is_sendable(&self) -> bool {
        !self.text.trim().is_empty() || !self.attachments.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.attachments.clear();
    }

    /// Hand over the draft and start a fresh one
    pub fn take(&mut self) -> (String, Vec<Attachment>) {
        (
            std::mem::take(&mut self.text),
            std::mem::take(&mut self.attachments),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::AttachmentKind;

    fn doc(id: &str) -> Attachment {
        Attachment::new("labs.pdf", AttachmentKind::Document, "file://labs.pdf").with_id(id)
    }

    #[test]
    fn test_accept_and_remove() {
        let mut composer = Composer::new();
        assert!(!composer.is_sendable());

        assert_eq!(composer.accept(PickOutcome::Picked(vec![doc("d1"), doc("d2")])), None);
        assert!(composer.is_sendable());
        assert!(composer.remove_attachment("d1"));
        assert!(!composer.remove_attachment("d1"));
        assert_eq!(composer.attachments().len(), 1);
        assert_eq!(composer.attachments()[0].id, "d2");
    }

    #[test]
    fn test_denied_yields_notice() {
        let mut composer = Composer::new();
        let notice = composer.accept(PickOutcome::Denied("camera".to_string()));
        assert_eq!(notice.as_deref(), Some("Permission required: camera"));
        assert_eq!(composer.accept(PickOutcome::Cancelled), None);
        assert!(composer.attachments().is_empty());
    }

    #[test]
    fn test_take_resets_draft() {
        let mut composer = Composer::new();
        composer.set_text("see attached");
        composer.accept(PickOutcome::Picked(vec![doc("d1")]));

        let (text, attachments) = composer.take();
        assert_eq!(text, "see attached");
        assert_eq!(attachments.len(), 1);
        assert!(composer.text().is_empty());
        assert!(!composer.is_sendable());
    }

    #[test]
    fn test_whitespace_is_not_sendable() {
        let mut composer = Composer::new();
        composer.set_text("   ");
        assert!(!composer.is_sendable());
        composer.clear();
        assert!(composer.text().is_empty());
    }
}
