//! Canned assistant text
//!
//! The assistant does not generate anything. Replies are fixed templates
//! that echo back what the user sent.

use crate::utils::ellipsize;

/// Title for a new session, taken from the first input
pub fn derive_title(text: &str, attachment_count: usize, max_chars: usize) -> String {
    let text = text.trim();
    if text.is_empty() {
        ellipsize(&format!("{} attachments", attachment_count), max_chars)
    } else {
        ellipsize(text, max_chars)
    }
}

/// Bot reply echoing the user's text and attachment count
pub fn bot_reply(text: &str, attachment_count: usize) -> String {
    let text = text.trim();
    match (text.is_empty(), attachment_count) {
        (false, 0) => format!(
            "Thanks for your question: \"{}\". I'm looking into it. \
             For anything urgent, please contact a healthcare professional.",
            text
        ),
        (false, n) => format!(
            "Thanks for your question: \"{}\". I've also received {} {}.",
            text,
            n,
            plural(n)
        ),
        (true, n) => format!(
            "I've received {} {}. I'll take a look and get back to you.",
            n,
            plural(n)
        ),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "attachment"
    } else {
        "attachments"
    }
}
