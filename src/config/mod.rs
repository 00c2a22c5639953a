use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};
use thiserror::Error;

use crate::models::container::COMPOSE_PROJECT_LABEL;

pub const CONFIG_PATH_ENV: &str = "DTOGGLE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        use crate::errors::codes::ErrorCode;

        match self {
            ConfigError::Io(_) => ErrorCode::CONFIG_READ_FAILED,
            ConfigError::Yaml(_) => ErrorCode::CONFIG_PARSE_FAILED,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DockerConfig {
    /// Unix socket of the engine. Bollard's local defaults are used when unset.
    pub socket_path: Option<String>,
    /// Seconds the engine waits for a container to exit before killing it.
    pub stop_timeout_secs: i64,
    pub project_label: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            socket_path: None,
            stop_timeout_secs: 10,
            project_label: COMPOSE_PROJECT_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: String,
    pub excluded_modules: Vec<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: "dtoggle".to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: "http://localhost:4317".to_string(),
            excluded_modules: vec!["hyper".to_string(), "tonic".to_string(), "h2".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub docker: DockerConfig,
    pub telemetry: TelemetryConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file: File = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads the file named by `DTOGGLE_CONFIG`, falling back to `config.yaml`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(path)
    }
}
