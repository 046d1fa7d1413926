use crate::chat::Message;

/// Ordered message history, always rooted at a single system message.
#[derive(Debug, Clone)]
pub struct Conversation {
    system_prompt: String,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        let system_prompt = system_prompt.into();
        Self {
            messages: vec![Message::system(system_prompt.clone())],
            system_prompt,
        }
    }

    /// Drop everything but the original system message.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message::system(self.system_prompt.clone()));
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Swap in a previously saved history as-is.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
