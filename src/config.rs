//! Configuration for the scopecast daemon.
//!
//! Loads configuration from a TOML file. Every field has a default matching
//! the production deployment, so the daemon also runs with no file at all.

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub publish: PublishConfig,
    pub logging: LoggingConfig,
}

/// Which acquisition front end to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Raw status socket with the line-oriented protocol
    Stream,
    /// Public HTTP status document
    Document,
}

/// Acquisition configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub mode: SourceMode,
    /// Control system host (stream mode)
    pub host: String,
    /// Status protocol port (stream mode)
    pub port: u16,
    /// Opaque status query literal, sent as-is each tick (stream mode)
    pub query: String,
    /// Receive timeout bounding each drain read, milliseconds (stream mode)
    pub read_timeout_ms: u64,
    /// Status document URL (document mode)
    pub url: String,
    /// HTTP client timeout, milliseconds (document mode)
    pub http_timeout_ms: u64,
    /// Tick period override, milliseconds; defaults to 100 for stream
    /// mode and 250 for document mode
    pub interval_ms: Option<u64>,
}

/// Publish socket configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// PUB bind endpoint
    pub endpoint: String,
    /// Send high-water-mark
    pub send_hwm: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter (overridden by RUST_LOG)
    pub level: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::Stream,
            host: "192.168.200.81".to_string(),
            port: 4000,
            query: "???".to_string(),
            read_timeout_ms: 1100,
            url: "https://api.astropeiler.de/25m".to_string(),
            http_timeout_ms: 5000,
            interval_ms: None,
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            endpoint: "tcp://*:50011".to_string(),
            send_hwm: 10_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}

impl SourceConfig {
    /// Effective tick period for the configured mode
    pub fn interval(&self) -> Duration {
        let default_ms = match self.mode {
            SourceMode::Stream => 100,
            SourceMode::Document => 250,
        };
        Duration::from_millis(self.interval_ms.unwrap_or(default_ms))
    }

    /// Receive timeout for the stream transport
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Request timeout for the document client
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.mode, SourceMode::Stream);
        assert_eq!(config.source.host, "192.168.200.81");
        assert_eq!(config.source.port, 4000);
        assert_eq!(config.source.query, "???");
        assert_eq!(config.publish.endpoint, "tcp://*:50011");
        assert_eq!(config.publish.send_hwm, 10_000);
        assert_eq!(config.source.interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_document_mode_defaults() {
        let config: Config = toml::from_str("[source]\nmode = \"document\"\n").unwrap();
        assert_eq!(config.source.mode, SourceMode::Document);
        assert_eq!(config.source.interval(), Duration::from_millis(250));
        assert!(config.source.url.starts_with("https://"));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[source]
mode = "stream"
host = "10.0.0.5"
port = 4001
interval_ms = 500

[publish]
endpoint = "tcp://127.0.0.1:6000"
send_hwm = 100

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.source.host, "10.0.0.5");
        assert_eq!(config.source.port, 4001);
        assert_eq!(config.source.interval(), Duration::from_millis(500));
        assert_eq!(config.publish.endpoint, "tcp://127.0.0.1:6000");
        assert_eq!(config.publish.send_hwm, 100);
        assert_eq!(config.logging.level, "debug");
    }
}
