//! Example conversations for demonstration stores

use super::types::{ChatSession, Message};

/// Example sessions shown in the history panel of a fresh demo store
pub fn example_sessions() -> Vec<ChatSession> {
    let mut headache = ChatSession::new("session-1", "How to treat headache?...");
    headache.push(Message::user_text("How to treat headache?"));
    headache.push(Message::bot(
        "Rest in a quiet, dark room, drink water and consider an over-the-counter \
         pain reliever. See a doctor if the headache is severe or persistent.",
    ));

    let mut sleep = ChatSession::new("session-2", "Tips for better sleep...");
    sleep.push(Message::user_text("Tips for better sleep"));
    sleep.push(Message::bot(
        "Keep a regular schedule, limit screens before bed and avoid caffeine \
         late in the day.",
    ));

    vec![headache, sleep]
}
