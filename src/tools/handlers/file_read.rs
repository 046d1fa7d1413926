use std::fs;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::tools::context::ToolContext;
use crate::tools::definition::{ToolDefinition, ToolParam};
use crate::tools::error::ToolError;

use super::parse_args;

#[derive(Debug, Deserialize)]
struct ReadFileArgs {
    file_path: String,
}

/// Create the read_file tool definition.
#[must_use]
pub fn read_file_tool() -> ToolDefinition {
    ToolDefinition {
        name: "read_file",
        description: "Read the contents of a file.",
        params: vec![ToolParam::string("file_path", "Path of the file to read.")],
        required: vec!["file_path"],
        executor: Arc::new(execute_read_file),
    }
}

fn execute_read_file(ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
    let args: ReadFileArgs = parse_args(args)?;
    let path = ctx.resolve(&args.file_path);
    fs::read_to_string(&path).map_err(|e| ToolError::io("read file", args.file_path, e))
}
