//! Network messages - communication between App and Network layers

use crate::models::StatusSnapshot;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// GET /status
    FetchStatus { id: u64 },
    /// POST /trigger-draw
    TriggerDraw { id: u64 },
    /// POST /reset
    Reset { id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    pub fn id(&self) -> Option<u64> {
        match self {
            NetworkCommand::FetchStatus { id }
            | NetworkCommand::TriggerDraw { id }
            | NetworkCommand::Reset { id } => Some(*id),
            NetworkCommand::Shutdown => None,
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Status fetched and decoded
    StatusFetched {
        id: u64,
        snapshot: StatusSnapshot,
        time_ms: u64,
    },
    /// Status fetch failed (transport, HTTP status or decode)
    StatusFailed {
        id: u64,
        error: String,
        time_ms: u64,
    },
    /// Backend accepted the draw request
    DrawTriggered { id: u64 },
    /// Backend rejected the draw request or it never arrived
    DrawFailed { id: u64, error: String },
    /// Backend state was reset
    ResetCompleted { id: u64 },
    /// Reset request failed
    ResetFailed { id: u64, error: String },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::StatusFetched { id, .. } => *id,
            NetworkResponse::StatusFailed { id, .. } => *id,
            NetworkResponse::DrawTriggered { id } => *id,
            NetworkResponse::DrawFailed { id, .. } => *id,
            NetworkResponse::ResetCompleted { id } => *id,
            NetworkResponse::ResetFailed { id, .. } => *id,
        }
    }
}
