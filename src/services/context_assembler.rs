//! Builds the message sequence sent to the model for one chat turn.
//!
//! The assistant's memory is deliberately shallow: only the last
//! [`RECENT_TURN_WINDOW`] stored turns and a bounded slice of the loaded
//! document go into the request, trading recall for bounded input size.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::prompts::CHAT_SYSTEM_PROMPT;
use crate::models::domain::conversation::{ChatMessage, Conversation};

/// How many stored turns are replayed to the model (roughly 1-2 exchanges).
pub const RECENT_TURN_WINDOW: usize = 3;

/// Hard character cutoff for the document context message. Not
/// sentence-aware; the point is bounding context-window consumption.
pub const DOCUMENT_CONTEXT_CHARS: usize = 1500;

static END_PHRASES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(goodbye|bye|exit|quit|end)\b").expect("static pattern"));

/// Case-insensitive whole-word match against the end-of-conversation
/// vocabulary.
pub fn is_end_phrase(question: &str) -> bool {
    END_PHRASES.is_match(question)
}

/// Assembles the ordered message list for one chat turn:
/// persona instruction, recent turns, optional document context, then the
/// new question.
pub fn assemble(conversation: &Conversation, question: &str) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(CHAT_SYSTEM_PROMPT)];

    messages.extend(conversation.recent(RECENT_TURN_WINDOW).iter().cloned());

    if let Some(document) = conversation.document() {
        let preview: String = document.text.chars().take(DOCUMENT_CONTEXT_CHARS).collect();
        messages.push(ChatMessage::system(format!(
            "Using content from document: {}\n\n{}",
            document.name, preview
        )));
    }

    messages.push(ChatMessage::user(question));
    messages
}
