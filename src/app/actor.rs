//! App actor - message loop processing poll ticks, UI events and network responses

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::app::state::AppState;
use crate::config::Settings;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that drives the status poller and processes events
pub struct AppActor {
    state: AppState,
    poll_interval: Duration,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        settings: &Settings,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(settings),
            poll_interval: settings.poll_interval,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop.
    ///
    /// The poll timer is local to this loop, so it stops as soon as the loop
    /// exits (quit, or either input channel closing).
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        self.publish();

        // First tick fires immediately: fetch on start, then every interval
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(interval_ms = self.poll_interval.as_millis() as u64, "Starting HTTP polling");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(cmd) = self.state.poll_tick() {
                        self.send(cmd);
                        self.publish();
                    }
                }
                event = ui_rx.recv() => {
                    let Some(event) = event else { break };
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.publish();
                }
                response = net_rx.recv() => {
                    let Some(response) = response else { break };
                    for cmd in self.state.handle_response(response) {
                        self.send(cmd);
                    }
                    self.publish();
                }
            }
        }

        tracing::info!("Polling stopped");
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::TriggerDraw => {
                if let Some(cmd) = self.state.trigger_draw() {
                    self.send(cmd);
                }
            }
            UiEvent::Reset => {
                if let Some(cmd) = self.state.reset() {
                    self.send(cmd);
                }
            }
            UiEvent::Refresh => {
                tracing::info!("Manually refreshing status");
                let cmd = self.state.force_refresh();
                self.send(cmd);
            }

            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            UiEvent::Quit => return true,
        }

        false
    }

    fn send(&self, cmd: NetworkCommand) {
        if self.network_tx.send(cmd).is_err() {
            tracing::warn!("Network actor is gone, command dropped");
        }
    }

    fn publish(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_polls_immediately_and_skips_ticks_while_busy() {
        let settings = Settings::default();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_tx, mut net_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(AppActor::new(&settings, net_tx, render_tx).run(ui_rx, resp_rx));

        assert_eq!(net_rx.recv().await, Some(NetworkCommand::FetchStatus { id: 1 }));

        // First fetch still unanswered: later ticks are skipped
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert!(net_rx.try_recv().is_err());

        resp_tx
            .send(NetworkResponse::StatusFailed { id: 1, error: String::from("connection refused"), time_ms: 1 })
            .unwrap();
        assert_eq!(net_rx.recv().await, Some(NetworkCommand::FetchStatus { id: 2 }));

        ui_tx.send(UiEvent::Quit).unwrap();
        assert_eq!(net_rx.recv().await, Some(NetworkCommand::Shutdown));
        handle.await.unwrap();
    }
}
