//! Tool execution error types.

use std::io;

/// Everything that can go wrong inside a tool.
///
/// None of these escape the dispatcher: they are rendered into the tool
/// result so the model can read and react to them.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Tool not found in registry.
    #[error("unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments provided to the tool.
    #[error("invalid tool arguments: {0}")]
    InvalidArgs(String),

    /// Filesystem or process I/O failed.
    #[error("could not {action} '{path}': {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    /// Command ran but did not exit successfully.
    #[error("{}", describe_failure(.code, .stdout, .stderr))]
    CommandFailed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Command exceeded its wall-clock budget and was killed.
    #[error("command timed out after {0}ms")]
    Timeout(u64),

    /// Tool execution failed for another reason.
    #[error("tool execution failed: {0}")]
    Execution(String),
}

impl ToolError {
    pub(crate) fn io(action: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        ToolError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

fn describe_failure(code: &Option<i32>, stdout: &str, stderr: &str) -> String {
    let mut text = match code {
        Some(code) => format!("command failed (exit code: {code})"),
        None => "command was terminated by a signal".to_string(),
    };
    if !stderr.trim().is_empty() {
        text.push_str(":\n");
        text.push_str(stderr.trim_end());
    }
    if !stdout.trim().is_empty() {
        text.push_str("\nstdout:\n");
        text.push_str(stdout.trim_end());
    }
    text
}
