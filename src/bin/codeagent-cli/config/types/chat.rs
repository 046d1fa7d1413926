use serde::{Deserialize, Serialize};

use super::DEFAULT_PROGRESS_INTERVAL_MS;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatConfig {
    pub system_prompt: Option<String>,
    pub progress_interval_ms: u64,
    pub progress_label: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            progress_label: codeagent::progress::DEFAULT_LABEL.to_string(),
        }
    }
}
