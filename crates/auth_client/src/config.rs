use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Override for the token file location; defaults to the app data dir.
    #[serde(default)]
    pub token_file: Option<PathBuf>,
}

const CONFIG_FILE_PATH: &str = "config.toml";
const DEFAULT_API_BASE: &str = "http://localhost:5013/api";

fn default_timeout_secs() -> u64 {
    10
}

fn parse_u64_env(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: default_timeout_secs(),
            token_file: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        //detect the config file exists
        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                if let Ok(file_config) = toml::from_str::<Config>(&content) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables if they exist
        if let Ok(api_base) = std::env::var("FITADMIN_API_BASE") {
            config.api_base = api_base;
        }
        if let Ok(timeout) = std::env::var("FITADMIN_TIMEOUT_SECS") {
            if let Some(secs) = parse_u64_env(&timeout) {
                config.timeout_secs = secs;
            }
        }
        if let Ok(token_file) = std::env::var("FITADMIN_TOKEN_FILE") {
            config.token_file = Some(PathBuf::from(token_file));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u64_env_values() {
        assert_eq!(parse_u64_env("15"), Some(15));
        assert_eq!(parse_u64_env(" 30 "), Some(30));
        assert_eq!(parse_u64_env("nope"), None);
        assert_eq!(parse_u64_env(""), None);
    }

    #[test]
    fn defaults_apply_for_missing_fields() {
        let config: Config = toml::from_str(r#"api_base = "https://api.example.com""#)
            .expect("parse config");
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.token_file.is_none());
    }
}
