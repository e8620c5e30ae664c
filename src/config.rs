#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::error::{FleetError, Result};
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_DIRECTORY_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_NOTIFIER_BASE_URL: &str = "http://localhost:8082";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub directory_base_url: String,
    pub notifier_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: computed_default_database_url(),
            directory_base_url: DEFAULT_DIRECTORY_BASE_URL.to_string(),
            notifier_base_url: DEFAULT_NOTIFIER_BASE_URL.to_string(),
        }
    }
}

/// Read the config file, falling back to defaults when it does not exist.
/// `DATABASE_URL` from the environment wins over the file.
///
/// # Errors
/// Returns [`FleetError::ConfigError`] when the file cannot be read or a base URL
/// does not parse.
pub async fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(".dockfleet/config.toml"));
    let mut config = if config_path.exists() {
        let content = tokio::fs::read_to_string(&config_path)
            .await
            .map_err(|e| FleetError::ConfigError(format!("Failed to read config: {e}")))?;
        parse_config_content(&content)
    } else {
        Config::default()
    };

    if let Some(url) = non_empty_env_var("DATABASE_URL") {
        config.database_url = url;
    }

    validate_base_url("directory_base_url", &config.directory_base_url)?;
    validate_base_url("notifier_base_url", &config.notifier_base_url)?;
    Ok(config)
}

pub fn parse_config_content(content: &str) -> Config {
    let mut config = Config::default();

    for line in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
    {
        if let Some(value) = parse_key_value(line, "database_url") {
            config.database_url = expand_env_vars(value);
        }
        if let Some(value) = parse_key_value(line, "directory_base_url") {
            config.directory_base_url = expand_env_vars(value);
        }
        if let Some(value) = parse_key_value(line, "notifier_base_url") {
            config.notifier_base_url = expand_env_vars(value);
        }
    }

    config
}

fn validate_base_url(key: &str, value: &str) -> Result<()> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| FleetError::ConfigError(format!("invalid {key} '{value}': {e}")))
}

fn expand_env_vars(input: &str) -> String {
    let mut result = input.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_part = &result[start + 2..start + end];
            let (var_name, default) = var_part.split_once(":-").unwrap_or((var_part, ""));
            let value = std::env::var(var_name).unwrap_or_else(|_| default.to_string());
            result.replace_range(start..=(start + end), &value);
        } else {
            break;
        }
    }
    result
}

pub fn parse_key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.split_once('=')
        .and_then(|(lhs, rhs)| (lhs.trim() == key).then_some(rhs.trim().trim_matches('"')))
}

fn non_empty_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn computed_default_database_url() -> String {
    let user = std::env::var("FLEET_DB_USER").unwrap_or_else(|_| "dockfleet".to_string());
    let pass = std::env::var("FLEET_DB_PASSWORD").unwrap_or_else(|_| "dockfleet".to_string());
    let host = std::env::var("FLEET_DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("FLEET_DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let db = std::env::var("FLEET_DB_NAME").unwrap_or_else(|_| "dockfleet_db".to_string());
    format!("postgresql://{user}:{pass}@{host}:{port}/{db}")
}
