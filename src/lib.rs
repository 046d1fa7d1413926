//! Tool-augmented conversations with an OpenAI-compatible chat backend.
//!
//! The crate is split the same way the conversation flows:
//!
//! - [`chat`] holds the message model, tool schema and the [`chat::ChatProvider`] seam.
//! - [`backends`] implements that seam over HTTP.
//! - [`tools`] is the registry and dispatcher of local side-effecting tools.
//! - [`agent`] drives a turn: submit, run requested tools, resubmit, answer.
//! - [`progress`] draws a spinner while a blocking call is in flight.
//! - [`conversation`] owns the message log and its JSON persistence.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use codeagent::agent::Agent;
//! use codeagent::builder::GatewayBuilder;
//! use codeagent::tools::{ToolContext, ToolRegistry};
//!
//! # async fn run() -> Result<(), codeagent::error::GatewayError> {
//! let gateway = GatewayBuilder::new().model("qwen2.5:32b").build()?;
//! let mut agent = Agent::new(
//!     Box::new(gateway),
//!     Arc::new(ToolRegistry::builtin()),
//!     ToolContext::new("."),
//! );
//! let reply = agent.chat("list the files in the current directory").await;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod backends;
pub mod builder;
pub mod chat;
pub mod conversation;
pub mod error;
pub mod progress;
pub mod tools;

pub use chat::{GatewayResponse, Message, ToolCallRequest};
pub use error::GatewayError;

/// System prompt a fresh conversation starts with.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional programming assistant. You can:
1. Analyze and understand code
2. Create, modify and delete files
3. Run shell commands
4. Give programming advice and solutions
5. Search and browse the file system

Always give clear, accurate help and explain what you are about to do before doing it.
When asked to modify a file, analyze the existing code first, then propose improvements.";
