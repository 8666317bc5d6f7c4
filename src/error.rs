//! Error types for scopecast

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Scopecast error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Publish socket error
    #[error("Publish socket error: {0}")]
    Zmq(#[from] zmq::Error),

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Upstream closed the status connection
    #[error("Connection closed by peer")]
    ConnectionClosed,

    /// Undecodable status document
    #[error("Decode error: {0}")]
    Decode(String),

    /// Packet serialization error
    #[error("Encode error: {0}")]
    Encode(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
