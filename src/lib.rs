//! # Lottery Display
//!
//! A terminal display client for a Meshtastic lottery backend.
//!
//! ## Features
//! - Polls `GET /status` on a fixed interval and mirrors it on screen
//! - Lobby, drawing animation and results screens
//! - Start a draw (`POST /trigger-draw`) and go back home (`POST /reset`)
//! - English and Chinese display strings
//! - Recovery screen when rendering fails
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine + status poller)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod i18n;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use models::{Participant, PrizeLevels, StatusSnapshot, Watermark, Winners};
pub use error::{ApiError, ConfigError};
pub use config::{Cli, Settings};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState, Screen};
pub use app::{AppState, AppActor, ConnectionStatus};
pub use network::{ApiClient, NetworkActor};
