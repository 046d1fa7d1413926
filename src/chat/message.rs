use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role of a participant in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// Instructions that frame the whole conversation
    System,
    /// The user/human participant in the conversation
    User,
    /// The AI assistant participant in the conversation
    Assistant,
    /// Output of a tool the assistant asked for
    Tool,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::Tool => "tool",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tool invocation requested by the model.
///
/// Only the gateway creates these, from the backend's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Identifier pairing this request with its result message
    pub id: String,
    /// Name of the registered tool to run
    pub name: String,
    /// Arguments keyed by parameter name
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// A single entry in the conversation log.
///
/// Each role only carries the fields that are valid for it: only the
/// assistant issues tool calls and only a tool message answers one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(default)]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCallRequest>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    /// Plain assistant reply with no tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Assistant message that issues tool calls, with optional narration.
    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Message::Assistant {
            content,
            tool_calls,
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Message::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> ChatRole {
        match self {
            Message::System { .. } => ChatRole::System,
            Message::User { .. } => ChatRole::User,
            Message::Assistant { .. } => ChatRole::Assistant,
            Message::Tool { .. } => ChatRole::Tool,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Message::System { content } | Message::User { content } => Some(content),
            Message::Tool { content, .. } => Some(content),
            Message::Assistant { content, .. } => content.as_deref(),
        }
    }

    /// Tool calls issued by this message; empty for every role but assistant.
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        match self {
            Message::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_message_serializes_with_role_tag() {
        let msg = Message::tool_result("call_1", "ok");
        let value = serde_json::to_value(&msg).expect("serialize");
        assert_eq!(
            value,
            json!({"role": "tool", "tool_call_id": "call_1", "content": "ok"})
        );
    }

    #[test]
    fn assistant_text_omits_empty_tool_calls() {
        let value = serde_json::to_value(Message::assistant("hi")).expect("serialize");
        assert_eq!(value, json!({"role": "assistant", "content": "hi"}));
    }

    #[test]
    fn assistant_without_content_field_parses() {
        let msg: Message = serde_json::from_value(json!({
            "role": "assistant",
            "tool_calls": [{"id": "a", "name": "list_directory", "arguments": {"path": "."}}]
        }))
        .expect("deserialize");
        assert_eq!(msg.content(), None);
        assert_eq!(msg.tool_calls().len(), 1);
        assert_eq!(msg.tool_calls()[0].arguments["path"], json!("."));
    }

    #[test]
    fn non_assistant_has_no_tool_calls() {
        assert!(Message::user("x").tool_calls().is_empty());
        assert_eq!(Message::user("x").role(), ChatRole::User);
    }
}
