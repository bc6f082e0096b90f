//! Configuration loading for the quilt server
//!
//! Settings come from an optional JSON file, then environment overrides:
//! - `HOST`, `PORT`: bind address
//! - `DATABASE_PATH`: SQLite file
//! - `COHERE_API_KEY`, `COHERE_MODEL`: reflection provider

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Placeholder shipped in sample env files; treated as "no key"
pub const PLACEHOLDER_API_KEY: &str = "your-cohere-api-key-here";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid port: {0}")]
    InvalidPort(String),
}

/// Root configuration for the quilt server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuiltConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub reflection: ReflectionConfig,

    /// Broadcast channel capacity per subscriber
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for QuiltConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            reflection: ReflectionConfig::default(),
            event_capacity: default_event_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Keep patches in memory only (nothing survives a restart)
    #[serde(default)]
    pub in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            in_memory: false,
        }
    }
}

/// Settings for the external text-generation provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_ms: default_timeout_ms(),
            api_key: None,
        }
    }
}

impl ReflectionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The credential, unless missing, blank or still the placeholder
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> String {
    "patches.db".to_string()
}

fn default_api_url() -> String {
    "https://api.cohere.ai".to_string()
}

fn default_model() -> String {
    "command-r-plus-08-2024".to_string()
}

fn default_max_tokens() -> u32 {
    100
}

fn default_temperature() -> f32 {
    0.8
}

fn default_timeout_ms() -> u64 {
    8_000
}

fn default_event_capacity() -> usize {
    1024
}

impl QuiltConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.storage.database_path = path;
        }
        if let Some(key) = lookup("COHERE_API_KEY") {
            self.reflection.api_key = Some(key);
        }
        if let Some(model) = lookup("COHERE_MODEL") {
            self.reflection.model = model;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = QuiltConfig::from_json("{}").unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.storage.database_path, "patches.db");
        assert!(!config.storage.in_memory);
        assert_eq!(config.reflection.model, "command-r-plus-08-2024");
        assert_eq!(config.reflection.max_tokens, 100);
        assert!((config.reflection.temperature - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.reflection.timeout(), Duration::from_secs(8));
        assert_eq!(config.event_capacity, 1024);
        assert!(config.reflection.usable_api_key().is_none());
    }

    #[test]
    fn test_default_matches_empty_file() {
        let config = QuiltConfig::default();
        assert_eq!(config.event_capacity, 1024);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_parse_partial_sections() {
        let json = r#"{
            "server": { "port": 9000 },
            "storage": { "in_memory": true },
            "reflection": { "timeout_ms": 1500 }
        }"#;

        let config = QuiltConfig::from_json(json).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(config.storage.in_memory);
        assert_eq!(config.reflection.timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            QuiltConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            QuiltConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = QuiltConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("HOST", "127.0.0.1"),
                ("PORT", "8081"),
                ("DATABASE_PATH", "/tmp/quilt.db"),
                ("COHERE_API_KEY", "secret"),
                ("COHERE_MODEL", "command-r"),
            ]))
            .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.storage.database_path, "/tmp/quilt.db");
        assert_eq!(config.reflection.usable_api_key(), Some("secret"));
        assert_eq!(config.reflection.model, "command-r");
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let mut config = QuiltConfig::default();
        let result = config.apply_overrides(lookup_from(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::InvalidPort(p)) if p == "eighty"));
    }

    #[test]
    fn test_placeholder_key_is_not_usable() {
        let mut config = QuiltConfig::default();
        config.reflection.api_key = Some(PLACEHOLDER_API_KEY.to_string());
        assert!(config.reflection.usable_api_key().is_none());

        config.reflection.api_key = Some("   ".to_string());
        assert!(config.reflection.usable_api_key().is_none());
    }
}
