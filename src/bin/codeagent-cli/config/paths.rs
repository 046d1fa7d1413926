use std::path::{Path, PathBuf};

use super::error::ConfigError;

const APP_DIR: &str = "codeagent";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = match config_override {
            Some(path) => path.to_path_buf(),
            None => default_config_dir()?.join("config.toml"),
        };
        Ok(Self {
            config_file,
            logs_dir: default_data_dir()?.join("logs"),
        })
    }
}

fn default_config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::MissingHome)?;
    Ok(home.join(".config").join(APP_DIR))
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::MissingHome)?;
    Ok(home.join(".local").join("share").join(APP_DIR))
}
