use async_trait::async_trait;

use crate::error::GatewayError;

use super::message::{Message, ToolCallRequest};
use super::tool::Tool;

/// What the backend answered with.
///
/// Either a final text or a batch of tool calls, never both. A batch may
/// carry narration the model emitted alongside the calls.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResponse {
    TextReply(String),
    ToolCallBatch {
        content: Option<String>,
        calls: Vec<ToolCallRequest>,
    },
}

impl GatewayResponse {
    /// Text content of the response, or `""` when the backend sent none.
    pub fn into_text(self) -> String {
        match self {
            GatewayResponse::TextReply(text) => text,
            GatewayResponse::ToolCallBatch { content, .. } => content.unwrap_or_default(),
        }
    }
}

/// Trait for backends that support chat-style interactions.
///
/// Implementations must not retry and must not assume ownership of the
/// conversation; they only read it.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, messages: &[Message]) -> Result<GatewayResponse, GatewayError> {
        self.chat_with_tools(messages, None).await
    }

    async fn chat_with_tools(
        &self,
        messages: &[Message],
        tools: Option<&[Tool]>,
    ) -> Result<GatewayResponse, GatewayError>;
}
