//! Case-insensitive text search across a directory tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use walkdir::WalkDir;

use crate::tools::context::ToolContext;
use crate::tools::definition::{ToolDefinition, ToolParam};
use crate::tools::error::ToolError;

use super::parse_args;

const NO_MATCHES: &str = "No matching files found";

#[derive(Debug, Deserialize)]
struct SearchFilesArgs {
    pattern: String,
    #[serde(default = "default_directory")]
    directory: String,
}

fn default_directory() -> String {
    ".".to_string()
}

/// Create the search_files tool definition.
#[must_use]
pub fn search_files_tool() -> ToolDefinition {
    ToolDefinition {
        name: "search_files",
        description: "Search text in files (case-insensitive). Returns paths of matching files.",
        params: vec![
            ToolParam::string("pattern", "Text to search for."),
            ToolParam::string("directory", "Directory to search in.").with_default("."),
        ],
        required: vec!["pattern"],
        executor: Arc::new(execute_search_files),
    }
}

fn execute_search_files(ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
    let args: SearchFilesArgs = parse_args(args)?;
    let root = ctx.resolve(&args.directory);
    let needle = args.pattern.to_lowercase();

    // An unreadable root is reported; anything unreadable below it is skipped.
    fs::read_dir(&root).map_err(|e| ToolError::io("search directory", args.directory, e))?;

    let mut matches: Vec<String> = collect_files(&root)
        .into_iter()
        .filter(|path| ctx.is_searchable(path))
        .filter(|path| file_contains(path, &needle))
        .map(|path| path.display().to_string())
        .collect();

    if matches.is_empty() {
        return Ok(NO_MATCHES.to_string());
    }
    matches.sort();
    Ok(matches.join("\n"))
}

/// Every regular file under `root`. Directory symlinks are not followed and
/// entries that cannot be read are skipped.
fn collect_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn file_contains(path: &Path, needle: &str) -> bool {
    match fs::read_to_string(path) {
        Ok(content) => content.to_lowercase().contains(needle),
        Err(e) => {
            log::debug!("search skipped {}: {e}", path.display());
            false
        }
    }
}
