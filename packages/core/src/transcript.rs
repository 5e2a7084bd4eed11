use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Bot,
    User,
}

/// A single chat bubble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new bot message
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, text.into())
    }

    /// Create a new user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into())
    }

    fn new(role: Role, text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text,
            timestamp: Utc::now(),
        }
    }

    /// Display label for the author
    pub fn author_label(&self) -> &'static str {
        match self.role {
            Role::Bot => "Bot",
            Role::User => "You",
        }
    }
}

/// Append-only conversation log. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> &Message {
        self.push(Message::bot(text))
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(Message::user(text))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Texts only, handy for assertions and logs
    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut transcript = Transcript::new();
        transcript.push_bot("Welcome!");
        transcript.push_user("Alice");
        transcript.push_bot("Next?");

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.texts(), vec!["Welcome!", "Alice", "Next?"]);
        assert_eq!(transcript.messages()[1].role, Role::User);
        assert_eq!(transcript.messages()[1].author_label(), "You");
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::bot("a");
        let b = Message::bot("a");
        assert_ne!(a.id, b.id);
    }
}
