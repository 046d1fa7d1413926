use std::fs;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::tools::context::ToolContext;
use crate::tools::definition::{ToolDefinition, ToolParam};
use crate::tools::error::ToolError;

use super::parse_args;

#[derive(Debug, Deserialize)]
struct WriteFileArgs {
    file_path: String,
    content: String,
}

/// Create the write_file tool definition.
#[must_use]
pub fn write_file_tool() -> ToolDefinition {
    ToolDefinition {
        name: "write_file",
        description: "Write or create a file, creating parent directories as needed.",
        params: vec![
            ToolParam::string("file_path", "Path of the file to write."),
            ToolParam::string("content", "Full content of the file."),
        ],
        required: vec!["file_path", "content"],
        executor: Arc::new(execute_write_file),
    }
}

fn execute_write_file(ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
    let args: WriteFileArgs = parse_args(args)?;
    let path = ctx.resolve(&args.file_path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| ToolError::io("create directory", parent.display().to_string(), e))?;
    }
    fs::write(&path, &args.content)
        .map_err(|e| ToolError::io("write file", args.file_path.clone(), e))?;

    Ok(format!(
        "Wrote {} bytes to {}",
        args.content.len(),
        args.file_path
    ))
}
