//! Network actor - runs backend calls in the Tokio async runtime

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;

/// Network actor that processes backend commands
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchStatus { id }) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                let start = Instant::now();
                                let result = client.fetch_status().await;
                                let time_ms = start.elapsed().as_millis() as u64;

                                let response = match result {
                                    Ok(snapshot) => {
                                        tracing::debug!(id, time_ms, last_update = snapshot.last_update.0, "Status fetched");
                                        NetworkResponse::StatusFetched { id, snapshot, time_ms }
                                    }
                                    Err(e) => {
                                        tracing::debug!(id, time_ms, kind = e.kind(), error = %e, "Status fetch failed");
                                        NetworkResponse::StatusFailed { id, error: e.to_string(), time_ms }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::TriggerDraw { id }) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %client.base_url(), "POST /trigger-draw");
                                let response = match client.trigger_draw().await {
                                    Ok(()) => NetworkResponse::DrawTriggered { id },
                                    Err(e) => {
                                        tracing::warn!(id, kind = e.kind(), error = %e, "Draw request rejected");
                                        NetworkResponse::DrawFailed { id, error: e.to_string() }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Reset { id }) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %client.base_url(), "POST /reset");
                                let response = match client.reset().await {
                                    Ok(()) => NetworkResponse::ResetCompleted { id },
                                    Err(e) => {
                                        tracing::warn!(id, kind = e.kind(), error = %e, "Reset request failed");
                                        NetworkResponse::ResetFailed { id, error: e.to_string() }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            // In-flight requests are dropped, not awaited
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {
                    // Task completed - responses are sent by the tasks themselves
                }
            }
        }
    }
}
