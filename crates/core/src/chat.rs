//! Assistant conversation held for the single shopper.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{ChatMessageId, ChatRole};

/// First message of every conversation.
pub const WELCOME_MESSAGE: &str =
    "Hi! I'm your Nexus AI assistant. Ask me about our products, bulk pricing, or compatibility!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: ChatMessageId::new(Uuid::new_v4().to_string()),
            role,
            text: text.into(),
        }
    }
}

/// Why a message could not be sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a reply is still pending")]
    ReplyPending,
}

/// Ordered message history. The welcome message is always first.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Model, WELCOME_MESSAGE)],
            pending: false,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Append the shopper's message and mark a reply as pending.
    ///
    /// Returns the transcript to send: every prior message in order followed
    /// by the new user turn.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` for blank input and
    /// `ChatError::ReplyPending` while the previous reply is outstanding.
    pub fn push_user(&mut self, text: &str) -> Result<Vec<ChatMessage>, ChatError> {
        if self.pending {
            return Err(ChatError::ReplyPending);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.messages.push(ChatMessage::new(ChatRole::User, text));
        self.pending = true;
        Ok(self.messages.clone())
    }

    /// Append the assistant reply and release the pending flag.
    pub fn push_model(&mut self, text: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::new(ChatRole::Model, text);
        self.messages.push(message.clone());
        self.pending = false;
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_welcome() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, ChatRole::Model);
        assert_eq!(conversation.messages()[0].text, WELCOME_MESSAGE);
    }

    #[test]
    fn test_transcript_includes_history_and_new_turn() {
        let mut conversation = Conversation::new();
        conversation.push_user("Do you ship to Canada?").expect("send");
        conversation.push_model("Yes, we do.");

        let transcript = conversation.push_user("  And bulk pricing? ").expect("send");
        let texts: Vec<_> = transcript.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, [
            WELCOME_MESSAGE,
            "Do you ship to Canada?",
            "Yes, we do.",
            "And bulk pricing?"
        ]);
        assert_eq!(transcript.last().map(|m| m.role), Some(ChatRole::User));
    }

    #[test]
    fn test_send_refused_while_pending() {
        let mut conversation = Conversation::new();
        conversation.push_user("hello").expect("send");
        assert!(conversation.is_pending());
        assert_eq!(conversation.push_user("again"), Err(ChatError::ReplyPending));

        conversation.push_model("hi");
        assert!(!conversation.is_pending());
        assert!(conversation.push_user("again").is_ok());
    }

    #[test]
    fn test_blank_message_rejected() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.push_user("   "), Err(ChatError::EmptyMessage));
        assert!(!conversation.is_pending());
        assert_eq!(conversation.messages().len(), 1);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = ChatMessage::new(ChatRole::User, "a");
        let b = ChatMessage::new(ChatRole::User, "a");
        assert_ne!(a.id, b.id);
    }
}
