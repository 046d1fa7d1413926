//! Client for OpenAI-compatible chat completion endpoints.
//!
//! Ollama exposes this API under `/v1/`, which is what the defaults target,
//! but any server speaking the same `chat/completions` protocol works.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::chat::{ChatProvider, GatewayResponse, Message, Tool, ToolCallRequest, ToolChoice};
use crate::error::GatewayError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1/";
pub const DEFAULT_MODEL: &str = "qwen2.5:32b";
/// Ollama ignores the key but the OpenAI protocol requires one.
pub const DEFAULT_API_KEY: &str = "ollama";

/// Configuration for the Ollama client.
#[derive(Debug)]
pub struct OllamaConfig {
    /// Base URL of the OpenAI-compatible API, e.g. `http://localhost:11434/v1/`.
    pub base_url: String,
    /// Bearer token sent with each request.
    pub api_key: SecretString,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
}

/// Client for an OpenAI-compatible chat completions API.
#[derive(Debug)]
pub struct Ollama {
    config: OllamaConfig,
    client: Client,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Tool]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
}

#[derive(Serialize)]
struct OllamaChatMessage<'a> {
    role: &'static str,
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OllamaToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Serialize, Deserialize, Debug)]
struct OllamaToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    call_type: String,
    function: OllamaFunctionCall,
}

#[derive(Serialize, Deserialize, Debug)]
struct OllamaFunctionCall {
    name: String,
    /// A JSON-encoded string on the wire; some servers send an object instead.
    #[serde(default)]
    arguments: Value,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Deserialize, Debug)]
struct OllamaChatResponse {
    choices: Vec<OllamaChatChoice>,
}

#[derive(Deserialize, Debug)]
struct OllamaChatChoice {
    message: OllamaResponseMessage,
}

#[derive(Deserialize, Debug)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OllamaToolCall>>,
}

impl<'a> From<&'a Message> for OllamaChatMessage<'a> {
    fn from(message: &'a Message) -> Self {
        let tool_calls = match message.tool_calls() {
            [] => None,
            calls => Some(calls.iter().map(OllamaToolCall::from).collect()),
        };
        let tool_call_id = match message {
            Message::Tool { tool_call_id, .. } => Some(tool_call_id.as_str()),
            _ => None,
        };
        Self {
            role: message.role().as_str(),
            content: message.content(),
            tool_calls,
            tool_call_id,
        }
    }
}

impl From<&ToolCallRequest> for OllamaToolCall {
    fn from(call: &ToolCallRequest) -> Self {
        Self {
            id: call.id.clone(),
            call_type: function_type(),
            function: OllamaFunctionCall {
                name: call.name.clone(),
                arguments: Value::String(Value::Object(call.arguments.clone()).to_string()),
            },
        }
    }
}

impl Ollama {
    pub fn with_client(client: Client, config: OllamaConfig) -> Self {
        Self { config, client }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatProvider for Ollama {
    async fn chat_with_tools(
        &self,
        messages: &[Message],
        tools: Option<&[Tool]>,
    ) -> Result<GatewayResponse, GatewayError> {
        let tools = tools.filter(|tools| !tools.is_empty());
        let body = OllamaChatRequest {
            model: &self.config.model,
            messages: messages.iter().map(OllamaChatMessage::from).collect(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
            tools,
            tool_choice: tools.map(|_| ToolChoice::Auto),
        };

        log::debug!(
            "ollama request: model={} messages={} tools={}",
            self.config.model,
            messages.len(),
            tools.map_or(0, <[Tool]>::len)
        );

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GatewayError::Auth(format!("HTTP {status}: {text}")));
        }
        if !status.is_success() {
            return Err(GatewayError::Provider(format!("HTTP {status}: {text}")));
        }

        parse_response(&text)
    }
}

fn parse_response(raw: &str) -> Result<GatewayResponse, GatewayError> {
    let response: OllamaChatResponse =
        serde_json::from_str(raw).map_err(|err| GatewayError::ResponseFormat {
            message: err.to_string(),
            raw_response: raw.to_string(),
        })?;
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| GatewayError::ResponseFormat {
            message: "response contained no choices".to_string(),
            raw_response: raw.to_string(),
        })?;

    let calls = message.tool_calls.unwrap_or_default();
    if calls.is_empty() {
        return Ok(GatewayResponse::TextReply(message.content.unwrap_or_default()));
    }

    let calls = calls
        .into_iter()
        .map(|call| {
            let arguments = parse_arguments(call.function.arguments).map_err(|message| {
                GatewayError::ResponseFormat {
                    message: format!("tool call '{}': {message}", call.id),
                    raw_response: raw.to_string(),
                }
            })?;
            Ok(ToolCallRequest::new(call.id, call.function.name, arguments))
        })
        .collect::<Result<Vec<_>, GatewayError>>()?;

    Ok(GatewayResponse::ToolCallBatch {
        content: message.content.filter(|text| !text.trim().is_empty()),
        calls,
    })
}

fn parse_arguments(raw: Value) -> Result<Map<String, Value>, String> {
    let value = match raw {
        Value::Null => return Ok(Map::new()),
        Value::String(text) if text.trim().is_empty() => return Ok(Map::new()),
        Value::String(text) => serde_json::from_str(&text)
            .map_err(|err| format!("arguments are not valid JSON: {err}"))?,
        other => other,
    };
    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!("arguments must be a JSON object, got {other}")),
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::builder::{FunctionBuilder, GatewayBuilder, ParamBuilder};

    fn gateway(url: &str) -> Ollama {
        GatewayBuilder::new()
            .base_url(format!("{url}/v1/"))
            .model("test-model")
            .build()
            .expect("build gateway")
    }

    #[test]
    fn parses_text_reply() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        assert_eq!(
            parse_response(raw).expect("parse"),
            GatewayResponse::TextReply("hello".to_string())
        );
    }

    #[test]
    fn null_content_becomes_empty_text() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(
            parse_response(raw).expect("parse"),
            GatewayResponse::TextReply(String::new())
        );
    }

    #[test]
    fn parses_tool_calls_in_order() {
        let raw = json!({"choices":[{"message":{"role":"assistant","content":"","tool_calls":[
            {"id":"a","type":"function","function":{"name":"list_directory","arguments":"{\"path\":\".\"}"}},
            {"id":"b","type":"function","function":{"name":"read_file","arguments":{"file_path":"x"}}}
        ]}}]})
        .to_string();
        let GatewayResponse::ToolCallBatch { content, calls } = parse_response(&raw).expect("parse")
        else {
            panic!("expected tool calls");
        };
        assert_eq!(content, None);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "a");
        assert_eq!(calls[0].arguments["path"], json!("."));
        assert_eq!(calls[1].name, "read_file");
        assert_eq!(calls[1].arguments["file_path"], json!("x"));
    }

    #[test]
    fn malformed_arguments_are_a_format_error() {
        let raw = json!({"choices":[{"message":{"tool_calls":[
            {"id":"a","type":"function","function":{"name":"read_file","arguments":"{not json"}}
        ]}}]})
        .to_string();
        assert!(matches!(
            parse_response(&raw),
            Err(GatewayError::ResponseFormat { .. })
        ));
    }

    #[test]
    fn empty_choices_is_a_format_error() {
        assert!(matches!(
            parse_response(r#"{"choices":[]}"#),
            Err(GatewayError::ResponseFormat { .. })
        ));
    }

    #[test]
    fn assistant_tool_calls_go_out_as_json_strings() {
        let mut args = Map::new();
        args.insert("path".to_string(), json!("src"));
        let msg = Message::assistant_tool_calls(
            None,
            vec![ToolCallRequest::new("a", "list_directory", args)],
        );
        let wire = serde_json::to_value(OllamaChatMessage::from(&msg)).expect("serialize");
        assert_eq!(
            wire,
            json!({
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "a",
                    "type": "function",
                    "function": {"name": "list_directory", "arguments": "{\"path\":\"src\"}"}
                }]
            })
        );
    }

    #[tokio::test]
    async fn sends_conversation_and_tools() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer ollama")
            .match_body(Matcher::PartialJson(json!({
                "model": "test-model",
                "stream": false,
                "tool_choice": "auto",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ],
                "tools": [{"type": "function", "function": {"name": "read_file"}}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"done"}}]}"#)
            .create_async()
            .await;

        let tools = vec![FunctionBuilder::new("read_file")
            .param(ParamBuilder::new("file_path"))
            .build()];
        let messages = vec![Message::system("sys"), Message::user("hi")];
        let response = gateway(&server.url())
            .chat_with_tools(&messages, Some(&tools))
            .await
            .expect("chat");

        assert_eq!(response, GatewayResponse::TextReply("done".to_string()));
        mock.assert_async().await;
    }

    #[test]
    fn request_without_tools_omits_tool_fields() {
        let messages = [Message::user("hi")];
        let body = OllamaChatRequest {
            model: "m",
            messages: messages.iter().map(OllamaChatMessage::from).collect(),
            temperature: None,
            max_tokens: None,
            stream: false,
            tools: None,
            tool_choice: None,
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_choice").is_none());
        assert_eq!(value["messages"], json!([{"role": "user", "content": "hi"}]));
    }

    #[tokio::test]
    async fn plain_chat_returns_final_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::PartialJson(json!({
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"final"}}]}"#)
            .create_async()
            .await;

        let response = gateway(&server.url())
            .chat(&[Message::user("hi")])
            .await
            .expect("chat");

        assert_eq!(response.into_text(), "final");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_surfaces_as_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("model not found")
            .create_async()
            .await;

        let err = gateway(&server.url())
            .chat(&[Message::user("hi")])
            .await
            .expect_err("should fail");

        match err {
            GatewayError::Provider(message) => assert!(message.contains("model not found")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
