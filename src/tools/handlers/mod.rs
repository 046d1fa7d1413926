//! Tool handlers for built-in tools.
//!
//! Each handler implements the tool execution logic.

mod file_read;
mod file_write;
mod ls;
mod search;
mod shell;

pub use file_read::read_file_tool;
pub use file_write::write_file_tool;
pub use ls::list_directory_tool;
pub use search::search_files_tool;
pub use shell::execute_command_tool;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ToolError;

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArgs(e.to_string()))
}
