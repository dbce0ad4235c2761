use crate::error::{HarnessError, HarnessResult};

use serde::Deserialize;

pub const CONFIG_PATH_ENV: &str = "SENSUSULTRA_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "sensusultra.toml";

#[cfg(windows)]
pub const DEFAULT_DEVICE: &str = "COM1";
#[cfg(not(windows))]
pub const DEFAULT_DEVICE: &str = "/dev/ttyS0";

#[derive(Deserialize)]
struct ConfigFile {
    device: Option<String>,
    log_path: Option<String>,
    data_path: Option<String>,
    user_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub device: String,
    pub log_path: String,
    pub data_path: String,
    pub user_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            device: DEFAULT_DEVICE.to_string(),
            log_path: "SENSUSULTRA.LOG".to_string(),
            data_path: "SENSUSULTRA_DATA.DMP".to_string(),
            user_path: "SENSUSULTRA_USER.DMP".to_string(),
        }
    }
}

/// Layers the TOML file at `path`, if there is one, over the defaults.
pub fn parse_config<P>(path: P) -> HarnessResult<Config> where P: AsRef<std::path::Path> {
    let mut config = Config::default();
    if let Ok(config_file) = std::fs::read_to_string(&path) {
        let parsed_config: ConfigFile = toml::from_str(&config_file)
            .map_err(HarnessError::ConfigFileParsingError)?;
        if let Some(v) = parsed_config.device { config.device = v; }
        if let Some(v) = parsed_config.log_path { config.log_path = v; }
        if let Some(v) = parsed_config.data_path { config.data_path = v; }
        if let Some(v) = parsed_config.user_path { config.user_path = v; }
    }
    Ok(config)
}

/// The config file path: `$SENSUSULTRA_CONFIG`, or `sensusultra.toml` in the
/// working directory.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
