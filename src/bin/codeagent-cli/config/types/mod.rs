mod app;
mod chat;
mod gateway;
mod logging;
mod tools;

const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 100;
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub use app::AppConfig;
pub use chat::ChatConfig;
pub use gateway::GatewayConfig;
pub use logging::LoggingConfig;
pub use tools::ToolsConfig;
