//! Status poller bookkeeping: busy guard and change-detection watermark
//!
//! The timer itself lives in [`crate::app::AppActor::run`]; this type only
//! decides whether a tick may issue a fetch and whether a fetched snapshot is
//! new.

use std::collections::BTreeSet;

use crate::messages::NetworkCommand;
use crate::models::Watermark;

#[derive(Debug, Default)]
pub struct StatusPoller {
    /// Status fetches sent but not yet answered
    outstanding: BTreeSet<u64>,
    /// Subset of `outstanding` whose answers must not be applied
    stale: BTreeSet<u64>,
    /// `lastUpdate` of the last applied snapshot
    watermark: Option<Watermark>,
}

impl StatusPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduled fetch; skipped while any earlier fetch is still in flight
    pub fn tick(&mut self, id: u64) -> Option<NetworkCommand> {
        if self.is_busy() {
            tracing::trace!(outstanding = self.outstanding.len(), "Poll tick skipped, fetch in flight");
            return None;
        }
        self.outstanding.insert(id);
        Some(NetworkCommand::FetchStatus { id })
    }

    /// Out-of-band fetch that ignores the busy guard
    pub fn force(&mut self, id: u64) -> NetworkCommand {
        self.outstanding.insert(id);
        NetworkCommand::FetchStatus { id }
    }

    /// Mark a fetch as answered (success or failure).
    ///
    /// Returns false if the fetch was discarded while in flight.
    pub fn complete(&mut self, id: u64) -> bool {
        self.outstanding.remove(&id);
        !self.stale.remove(&id)
    }

    /// Mark every in-flight fetch as stale. They still hold the busy guard
    /// until answered.
    pub fn discard_in_flight(&mut self) {
        self.stale.extend(self.outstanding.iter().copied());
    }

    pub fn is_busy(&self) -> bool {
        !self.outstanding.is_empty()
    }

    /// True if a snapshot carrying `watermark` has not been applied yet
    pub fn is_new(&self, watermark: Watermark) -> bool {
        self.watermark != Some(watermark)
    }

    pub fn accept(&mut self, watermark: Watermark) {
        self.watermark = Some(watermark);
    }

    /// Drop the watermark so the next snapshot is applied unconditionally
    pub fn forget_watermark(&mut self) {
        self.watermark = None;
    }

    pub fn watermark(&self) -> Option<Watermark> {
        self.watermark
    }
}
