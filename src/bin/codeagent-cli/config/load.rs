use std::fs;
use std::path::Path;

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
    pub config_exists: bool,
}

/// Read the config file, falling back to defaults when it does not exist.
pub fn load_config(path_override: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let paths = ConfigPaths::resolve(path_override)?;
    fs::create_dir_all(&paths.logs_dir)?;
    let (config, config_exists) = read_config(&paths.config_file)?;
    Ok(LoadedConfig {
        config,
        paths,
        config_exists,
    })
}

fn read_config(path: &Path) -> Result<(AppConfig, bool), ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok((toml::from_str(&contents)?, true)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok((AppConfig::default(), false)),
        Err(err) => Err(ConfigError::Io(err)),
    }
}
