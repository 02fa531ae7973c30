//! Message presentation, kept outside the store

use super::types::{AttachmentKind, Message, Sender};

/// How a message is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageView<'a> {
    TextOnly { text: &'a str },
    Image { text: &'a str, uri: &'a str },
    Document { text: &'a str, name: &'a str },
}

impl<'a> MessageView<'a> {
    pub fn of(message: &'a Message) -> Self {
        let text = message.text();
        match message.attachment() {
            None => MessageView::TextOnly { text },
            Some(a) => match a.kind {
                AttachmentKind::Image => MessageView::Image { text, uri: &a.uri },
                AttachmentKind::Document => MessageView::Document {
                    text,
                    name: &a.name,
                },
            },
        }
    }
}

/// One plain-text line for a message, e.g. `you: [image file://x.jpg]`
pub fn render_line(message: &Message) -> String {
    let who = match message.sender() {
        Sender::User => "you",
        Sender::Bot => "bhishaj",
    };

    let body = match MessageView::of(message) {
        MessageView::TextOnly { text } => text.to_string(),
        MessageView::Image { text, uri } => join(text, format!("[image {}]", uri)),
        MessageView::Document { text, name } => join(text, format!("[document {}]", name)),
    };

    format!("{}: {}", who, body)
}

fn join(text: &str, tag: String) -> String {
    if text.is_empty() {
        tag
    } else {
        format!("{} {}", text, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::Attachment;

    #[test]
    fn test_render_text() {
        assert_eq!(render_line(&Message::user_text("hi")), "you: hi");
        assert_eq!(render_line(&Message::bot("hello")), "bhishaj: hello");
    }

    #[test]
    fn test_render_image() {
        let message = Message::user_attachment(Attachment::new(
            "x.jpg",
            AttachmentKind::Image,
            "file://x.jpg",
        ));
        assert!(matches!(MessageView::of(&message), MessageView::Image { .. }));
        assert_eq!(render_line(&message), "you: [image file://x.jpg]");
    }

    #[test]
    fn test_render_document() {
        let message = Message::user_attachment(Attachment::new(
            "labs.pdf",
            AttachmentKind::Document,
            "file://labs.pdf",
        ));
        assert_eq!(
            MessageView::of(&message),
            MessageView::Document {
                text: "",
                name: "labs.pdf"
            }
        );
        assert_eq!(render_line(&message), "you: [document labs.pdf]");
    }
}
