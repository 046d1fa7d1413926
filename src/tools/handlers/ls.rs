//! Single-level directory listing.

use std::fs;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::tools::context::ToolContext;
use crate::tools::definition::{ToolDefinition, ToolParam};
use crate::tools::error::ToolError;

use super::parse_args;

const EMPTY_DIRECTORY: &str = "Directory is empty";

#[derive(Debug, Deserialize)]
struct ListDirectoryArgs {
    path: String,
}

/// Create the list_directory tool definition.
#[must_use]
pub fn list_directory_tool() -> ToolDefinition {
    ToolDefinition {
        name: "list_directory",
        description: "List the contents of a directory. Directories are suffixed with '/'.",
        params: vec![ToolParam::string("path", "Directory path.")],
        required: vec!["path"],
        executor: Arc::new(execute_list_directory),
    }
}

fn execute_list_directory(ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
    let args: ListDirectoryArgs = parse_args(args)?;
    let dir = ctx.resolve(&args.path);

    let read_dir =
        fs::read_dir(&dir).map_err(|e| ToolError::io("list directory", args.path.clone(), e))?;

    let mut entries: Vec<(String, bool)> = read_dir
        .flatten()
        .map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            (name, entry.path().is_dir())
        })
        .collect();

    if entries.is_empty() {
        return Ok(EMPTY_DIRECTORY.to_string());
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    let lines: Vec<String> = entries
        .into_iter()
        .map(|(name, is_dir)| if is_dir { format!("{name}/") } else { name })
        .collect();
    Ok(lines.join("\n"))
}
