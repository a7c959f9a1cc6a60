//! Command handlers - business logic for processing UI events and network responses

use crate::app::state::{AppState, ConnectionStatus, DrawRequest};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::StatusSnapshot;

impl AppState {
    // ========================
    // Polling
    // ========================

    /// Scheduled poll tick
    pub fn poll_tick(&mut self) -> Option<NetworkCommand> {
        if self.poller.is_busy() {
            return None;
        }
        let id = self.next_id();
        self.poller.tick(id)
    }

    /// Manual or post-reset fetch, outside the regular cadence
    pub fn force_refresh(&mut self) -> NetworkCommand {
        let id = self.next_id();
        tracing::debug!(id, "Forcing status refresh");
        self.poller.force(id)
    }

    /// Poll-apply transition: mirror a snapshot whose watermark is new
    pub fn apply_snapshot(&mut self, snapshot: StatusSnapshot) {
        if !self.poller.is_new(snapshot.last_update) {
            return;
        }

        tracing::info!(
            last_update = snapshot.last_update.0,
            participants = snapshot.participant_count,
            in_progress = snapshot.in_progress,
            has_results = snapshot.results.is_some(),
            "Received status update"
        );

        let screen_before = self.screen();
        let completed = snapshot.has_completed_draw();

        self.participants = snapshot.participants;
        self.participant_count = snapshot.participant_count;
        self.keyword = snapshot.keyword;
        self.prizes = snapshot.prizes;
        self.in_progress = snapshot.in_progress;

        // Results latch; never cleared from the poll path
        if completed {
            self.winners = snapshot.results;
        }

        // Reconcile the tentative draw with what the server now reports
        self.draw_request = match self.draw_request {
            _ if self.in_progress || completed => None,
            Some(DrawRequest::Accepted) => {
                tracing::warn!("Backend accepted the draw but reports no draw in progress");
                None
            }
            other => other,
        };

        self.poller.accept(snapshot.last_update);

        if self.screen() != screen_before {
            self.scroll = 0;
        }
    }

    // ========================
    // Operator actions
    // ========================

    /// Action-apply: optimistic draw start
    pub fn trigger_draw(&mut self) -> Option<NetworkCommand> {
        if self.participant_count == 0 {
            tracing::warn!("Cannot trigger lottery: no participants");
            return None;
        }
        if !self.can_trigger() {
            tracing::debug!(screen = ?self.screen(), connection = ?self.connection, "Draw trigger ignored");
            return None;
        }

        let id = self.next_id();
        tracing::info!(id, participants = self.participant_count, "Triggering lottery");
        self.draw_request = Some(DrawRequest::Requested { id });
        self.scroll = 0;
        Some(NetworkCommand::TriggerDraw { id })
    }

    /// Action-apply: ask the backend to reset. Local state is cleared only
    /// once the backend confirms.
    pub fn reset(&mut self) -> Option<NetworkCommand> {
        if self.pending_reset_id.is_some() {
            return None;
        }
        let id = self.next_id();
        tracing::info!(id, "Resetting lottery");
        self.pending_reset_id = Some(id);
        Some(NetworkCommand::Reset { id })
    }

    // ========================
    // Scrolling / popups
    // ========================

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response; returns follow-up commands to send
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        tracing::trace!(id = response.id(), "Network response");
        match response {
            NetworkResponse::StatusFetched { id, snapshot, time_ms } => {
                let fresh = self.poller.complete(id);
                if self.connection != ConnectionStatus::Connected {
                    tracing::info!(id, time_ms, "Backend connected");
                }
                self.connection = ConnectionStatus::Connected;
                if fresh {
                    self.apply_snapshot(snapshot);
                } else {
                    tracing::debug!(id, "Dropping status fetched before reset");
                }
                Vec::new()
            }
            NetworkResponse::StatusFailed { id, error, time_ms } => {
                self.poller.complete(id);
                if self.connection != ConnectionStatus::Disconnected {
                    tracing::warn!(id, time_ms, %error, "Failed to fetch status");
                }
                self.connection = ConnectionStatus::Disconnected;
                Vec::new()
            }
            NetworkResponse::DrawTriggered { id } => {
                if self.draw_request == Some(DrawRequest::Requested { id }) {
                    tracing::info!(id, "Lottery started, waiting for results");
                    self.draw_request = Some(DrawRequest::Accepted);
                }
                Vec::new()
            }
            NetworkResponse::DrawFailed { id, error } => {
                if self.draw_request == Some(DrawRequest::Requested { id }) {
                    tracing::error!(id, %error, "Error triggering lottery");
                    self.draw_request = None;
                }
                Vec::new()
            }
            NetworkResponse::ResetCompleted { id } => {
                if self.pending_reset_id == Some(id) {
                    self.pending_reset_id = None;
                }
                self.winners = None;
                self.in_progress = false;
                self.draw_request = None;
                self.scroll = 0;
                // Backend does not bump lastUpdate on reset
                self.poller.forget_watermark();
                self.poller.discard_in_flight();
                vec![self.force_refresh()]
            }
            NetworkResponse::ResetFailed { id, error } => {
                if self.pending_reset_id == Some(id) {
                    self.pending_reset_id = None;
                }
                tracing::error!(id, %error, "Error resetting lottery");
                Vec::new()
            }
        }
    }
}
