//! App layer - central state management and command processing
//!
//! The App actor owns the polling timer, receives UI events and network
//! responses, updates state, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod poller;

pub use state::{AppState, ConnectionStatus};
pub use actor::AppActor;
pub use poller::StatusPoller;
