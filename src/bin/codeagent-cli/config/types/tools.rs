use serde::{Deserialize, Serialize};

use super::DEFAULT_COMMAND_TIMEOUT_SECS;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Names of the tools to offer; empty offers all of them.
    pub enabled: Vec<String>,
    pub command_timeout_secs: u64,
    pub search_extensions: Option<Vec<String>>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: Vec::new(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            search_extensions: None,
        }
    }
}
