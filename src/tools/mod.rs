//! Local tools the model can invoke: file access, shell commands, search.

mod builtin;
mod context;
mod definition;
mod error;
mod handlers;
mod registry;

pub use builtin::builtin_tools;
pub use context::{ToolContext, DEFAULT_COMMAND_TIMEOUT, DEFAULT_SEARCH_EXTENSIONS};
pub use definition::{ToolDefinition, ToolExecutor, ToolParam};
pub use error::ToolError;
pub use registry::ToolRegistry;
