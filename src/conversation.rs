use chrono::{DateTime, Local};
use serde::Serialize;

use crate::responder::GREETING;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

/// Append-only message log plus the transient typing flag. Owned by the
/// coordinator, which is the only writer; everything else reads.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
    is_awaiting_response: bool,
}

impl Conversation {
    /// Starts a session with the bot greeting already present.
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
            is_awaiting_response: false,
        };
        conversation.append(Sender::Bot, GREETING);
        conversation
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &Message {
        self.append(Sender::User, content)
    }

    pub fn push_bot(&mut self, content: impl Into<String>) -> &Message {
        self.append(Sender::Bot, content)
    }

    fn append(&mut self, sender: Sender, content: impl Into<String>) -> &Message {
        let message = Message {
            id: self.next_id,
            content: content.into(),
            sender,
            timestamp: Local::now(),
        };
        self.next_id += 1;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn set_awaiting(&mut self, awaiting: bool) {
        self.is_awaiting_response = awaiting;
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.is_awaiting_response
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_is_seeded_with_greeting() {
        let conversation = Conversation::new();
        let messages = conversation.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, 1);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(messages[0].content, GREETING);
        assert!(!conversation.is_awaiting_response());
    }

    #[test]
    fn test_appends_keep_ids_strictly_increasing() {
        let mut conversation = Conversation::new();
        conversation.push_user("first");
        conversation.push_bot("second");
        conversation.push_user("third");
        let ids: Vec<u64> = conversation.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn test_append_captures_sender_and_content() {
        let mut conversation = Conversation::new();
        let message = conversation.push_user("  spaces kept as given  ");
        assert_eq!(message.sender, Sender::User);
        assert_eq!(message.content, "  spaces kept as given  ");
    }

    #[test]
    fn test_awaiting_flag_round_trip() {
        let mut conversation = Conversation::new();
        conversation.set_awaiting(true);
        assert!(conversation.is_awaiting_response());
        conversation.set_awaiting(false);
        assert!(!conversation.is_awaiting_response());
    }

    #[test]
    fn test_message_serializes_with_lowercase_sender() {
        let mut conversation = Conversation::new();
        let message = conversation.push_user("hello").clone();
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["sender"], "user");
        assert_eq!(value["content"], "hello");
        assert_eq!(value["id"], 2);
    }
}
