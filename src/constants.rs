//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the lottery backend
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default status polling interval
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Keyword shown until the backend reports its own
pub const DEFAULT_KEYWORD: &str = "I want to join lottery";

/// Default log file (relative to the working directory)
pub const DEFAULT_LOG_FILE: &str = "lottery-display.log";

/// Directory under $HOME holding the optional config file
pub const CONFIG_DIR_NAME: &str = ".lottery-display";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Per-request timeout for backend calls
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// UI frame interval; also drives the drawing animation
pub const FRAME_INTERVAL_MS: u64 = 50;

/// Application name
pub const APP_NAME: &str = "Lottery Display";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
