use std::sync::Arc;

use serde_json::Value;

use crate::chat::{GatewayResponse, Message, ToolCallRequest};
use crate::error::GatewayError;
use crate::progress::with_progress;
use crate::tools::{ToolContext, ToolRegistry};

use super::state::{StateGuard, TurnState};
use super::Agent;

impl Agent {
    /// Run one user message through to a final reply.
    ///
    /// The conversation keeps everything appended before a failure; no
    /// assistant message is added for a turn that errored.
    pub async fn run_turn(&mut self, input: &str) -> Result<String, GatewayError> {
        let Agent {
            provider,
            registry,
            context,
            conversation,
            progress,
            debug,
            state,
        } = self;
        let mut state = StateGuard::new(state);

        conversation.push(Message::user(input));
        state.set(TurnState::AwaitingInitialReply);

        let tools = registry.tools();
        let offered = (!tools.is_empty()).then_some(tools.as_slice());
        let first = with_progress(
            progress,
            provider.chat_with_tools(conversation.messages(), offered),
        )
        .await?;

        let (content, calls) = match first {
            GatewayResponse::ToolCallBatch { content, calls } if !calls.is_empty() => {
                (content, calls)
            }
            other => {
                let text = other.into_text();
                conversation.push(Message::assistant(text.clone()));
                return Ok(text);
            }
        };

        conversation.push(Message::assistant_tool_calls(content, calls.clone()));
        state.set(TurnState::ExecutingTools);

        for call in &calls {
            if *debug {
                eprintln!("[tool] {} {}", call.name, Value::Object(call.arguments.clone()));
            }
            let output = dispatch_blocking(registry, context, call).await;
            conversation.push(Message::tool_result(call.id.clone(), output));
        }

        state.set(TurnState::AwaitingFinalReply);
        let reply = match with_progress(progress, provider.chat(conversation.messages())).await? {
            GatewayResponse::TextReply(text) => text,
            batch => {
                log::warn!("tool calls requested after tool results; using text content only");
                batch.into_text()
            }
        };
        conversation.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Like [`Agent::run_turn`], but a failure becomes the reply text.
    pub async fn chat(&mut self, input: &str) -> String {
        match self.run_turn(input).await {
            Ok(reply) => reply,
            Err(err) => {
                log::error!("turn failed: {err}");
                if self.debug {
                    format!("Error while processing message: {err}\n{err:?}")
                } else {
                    format!("Error while processing message: {err}")
                }
            }
        }
    }
}

/// Run a tool on the blocking pool so the runtime keeps polling signals.
async fn dispatch_blocking(
    registry: &Arc<ToolRegistry>,
    context: &ToolContext,
    call: &ToolCallRequest,
) -> String {
    let registry = Arc::clone(registry);
    let context = context.clone();
    let name = call.name.clone();
    let args = call.arguments.clone();

    match tokio::task::spawn_blocking(move || registry.dispatch(&name, &args, &context)).await {
        Ok(output) => output,
        Err(err) => {
            log::error!("tool worker for {} failed: {err}", call.name);
            format!("Tool error: tool worker failed: {err}")
        }
    }
}
