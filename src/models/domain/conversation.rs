use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role/content unit. Doubles as the stored conversation turn and the
/// wire message sent to the model; the store only ever holds `User` and
/// `Assistant` roles.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadedDocument {
    pub name: String,
    pub text: String,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            loaded_at: Utc::now(),
        }
    }
}

/// Ordered chat history plus the end-of-conversation flag and the currently
/// loaded document. Turns are appended only in complete user/assistant pairs.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    turns: Vec<ChatMessage>,
    ended: bool,
    document: Option<LoadedDocument>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the user turn followed by the assistant turn. A silent no-op
    /// when either side is empty after trimming; a chat log has no use for
    /// half an exchange.
    pub fn append_exchange(&mut self, user_text: &str, assistant_text: &str) {
        if user_text.trim().is_empty() || assistant_text.trim().is_empty() {
            return;
        }
        self.turns.push(ChatMessage::user(user_text));
        self.turns.push(ChatMessage::assistant(assistant_text));
    }

    /// The last `n` turns in chronological order; all of them if fewer exist.
    pub fn recent(&self, n: usize) -> &[ChatMessage] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn mark_ended(&mut self) {
        self.ended = true;
    }

    pub fn is_active(&self) -> bool {
        !self.ended
    }

    pub fn set_document(&mut self, document: LoadedDocument) -> &LoadedDocument {
        self.document.insert(document)
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    /// Clears turns and the loaded document and reactivates the conversation.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.ended = false;
        self.document = None;
    }
}
