use serde::{Deserialize, Serialize};

use super::{ChatConfig, GatewayConfig, LoggingConfig, ToolsConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_model: Option<String>,
    pub gateway: GatewayConfig,
    pub chat: ChatConfig,
    pub tools: ToolsConfig,
    pub logging: LoggingConfig,
}
