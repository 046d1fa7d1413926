//! The turn controller: owns the conversation and drives the
//! request, tool execution, resubmission cycle against a [`ChatProvider`].

mod state;
mod turn;

use std::path::Path;
use std::sync::Arc;

use crate::chat::{ChatProvider, Message};
use crate::conversation::{store, validate_tool_pairing, Conversation, PairingIssue, PersistenceError};
use crate::progress::ProgressIndicator;
use crate::tools::{ToolContext, ToolRegistry};
use crate::DEFAULT_SYSTEM_PROMPT;

pub use state::TurnState;

/// Outcome of loading a saved conversation.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub messages: usize,
    /// Pairing gaps found in the loaded history; it is kept regardless.
    pub issues: Vec<PairingIssue>,
}

pub struct Agent {
    provider: Box<dyn ChatProvider>,
    registry: Arc<ToolRegistry>,
    context: ToolContext,
    conversation: Conversation,
    progress: ProgressIndicator,
    debug: bool,
    state: TurnState,
}

impl Agent {
    pub fn new(
        provider: Box<dyn ChatProvider>,
        registry: Arc<ToolRegistry>,
        context: ToolContext,
    ) -> Self {
        Self {
            provider,
            registry,
            context,
            conversation: Conversation::new(DEFAULT_SYSTEM_PROMPT),
            progress: ProgressIndicator::default(),
            debug: false,
            state: TurnState::Idle,
        }
    }

    /// Start over from `prompt` instead of the default system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.conversation = Conversation::new(prompt);
        self
    }

    pub fn with_progress(mut self, progress: ProgressIndicator) -> Self {
        self.progress = progress;
        self
    }

    /// Echo tool calls to stderr and include error details in replies.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn conversation(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Clear the history back to the system prompt.
    pub fn reset(&mut self) {
        self.conversation.reset();
        self.state = TurnState::Idle;
    }

    pub fn replace_conversation(&mut self, messages: Vec<Message>) {
        self.conversation.replace(messages);
    }

    pub fn save_conversation(&self, path: &Path) -> Result<(), PersistenceError> {
        store::save(path, self.conversation.messages())?;
        log::info!(
            "saved {} messages to {}",
            self.conversation.len(),
            path.display()
        );
        Ok(())
    }

    /// Replace the history with a saved one.
    ///
    /// The file is accepted as-is; pairing gaps are logged and reported but
    /// never rejected.
    pub fn load_conversation(&mut self, path: &Path) -> Result<LoadReport, PersistenceError> {
        let messages = store::load(path)?;
        let issues = validate_tool_pairing(&messages);
        for issue in &issues {
            log::warn!("{}: {issue}", path.display());
        }
        let report = LoadReport {
            messages: messages.len(),
            issues,
        };
        self.conversation.replace(messages);
        log::info!("loaded {} messages from {}", report.messages, path.display());
        Ok(report)
    }
}
