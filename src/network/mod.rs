//! Network layer - backend HTTP calls
//!
//! The Network actor receives commands from the App layer, runs them
//! concurrently and sends back typed responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::ApiClient;
