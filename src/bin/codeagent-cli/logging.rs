use std::path::PathBuf;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::{ConfigPaths, LoggingConfig};

/// Log to a rotating file so the terminal stays free for the conversation.
///
/// File output stops once the returned handle is dropped.
pub fn init_logging(
    config: &LoggingConfig,
    paths: &ConfigPaths,
    debug: bool,
) -> anyhow::Result<LoggerHandle> {
    let log_path = config
        .path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.logs_dir.join("codeagent.log"));
    let directory = log_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or(paths.logs_dir.clone());
    let basename = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("codeagent")
        .to_string();
    let level = if debug { "debug" } else { config.level.as_str() };
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    Ok(handle)
}
