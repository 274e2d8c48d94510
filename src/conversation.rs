use crate::models::{Message, Sender};

/// Append-only, insertion-ordered record of the conversation. Messages are
/// never edited or removed for the life of the session.
#[derive(Debug, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_user(&mut self, text: &str) -> Message {
        self.append(text, Sender::User, Vec::new())
    }

    pub fn append_assistant(&mut self, text: &str, sources: Vec<String>) -> Message {
        self.append(text, Sender::Assistant, sources)
    }

    fn append(&mut self, text: &str, sender: Sender, sources: Vec<String>) -> Message {
        let message = Message {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            sender,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            sources,
        };
        self.messages.push(message.clone());
        message
    }

    /// Snapshot of the full history, oldest first.
    pub fn list(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
