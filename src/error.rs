//! Error types for backend calls and configuration loading

use std::path::PathBuf;

/// Failure of a single backend call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request could not be sent, timed out, or its body could not be read
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("HTTP error! Status: {status}{}", detail_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// Body was not a valid status payload
    #[error("malformed status payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Short classification used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport(e) if e.is_timeout() => "timeout",
            ApiError::Transport(e) if e.is_connect() => "connect",
            ApiError::Transport(_) => "transport",
            ApiError::Status { .. } => "status",
            ApiError::Decode(_) => "decode",
        }
    }
}

fn detail_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default()
}

/// Failure to load the optional config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
