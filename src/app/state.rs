//! App state - pure data structure with no I/O logic

use crate::app::poller::StatusPoller;
use crate::config::Settings;
use crate::constants::DEFAULT_KEYWORD;
use crate::i18n::Lang;
use crate::messages::{RenderState, Screen};
use crate::models::{Participant, PrizeLevels, Winners};

/// Backend reachability as seen by the poller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No fetch has completed yet
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

/// A draw the operator asked for that no snapshot has confirmed yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawRequest {
    /// POST /trigger-draw in flight
    Requested { id: u64 },
    /// Backend answered 2xx, waiting for a snapshot to show the draw
    Accepted,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub lang: Lang,
    pub api_url: String,

    // Mirrored from the last applied snapshot
    pub participants: Vec<Participant>,
    pub participant_count: u64,
    pub keyword: String,
    pub prizes: PrizeLevels,
    pub in_progress: bool,

    // Latched results: set by a completed-draw snapshot, cleared only by reset
    pub winners: Option<Winners>,

    // Local, unconfirmed draw
    pub draw_request: Option<DrawRequest>,
    pub pending_reset_id: Option<u64>,

    // Polling
    pub connection: ConnectionStatus,
    pub poller: StatusPoller,
    pub next_request_id: u64,

    // UI state
    pub scroll: u16,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        AppState {
            lang: settings.lang,
            api_url: settings.api_url.clone(),
            participants: Vec::new(),
            participant_count: 0,
            keyword: String::from(DEFAULT_KEYWORD),
            prizes: PrizeLevels::new(),
            in_progress: false,
            winners: None,
            draw_request: None,
            pending_reset_id: None,
            connection: ConnectionStatus::Connecting,
            poller: StatusPoller::new(),
            next_request_id: 1,
            scroll: 0,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Server-confirmed or tentative draw
    pub fn is_drawing(&self) -> bool {
        self.in_progress || self.draw_request.is_some()
    }

    pub fn screen(&self) -> Screen {
        if self.connection == ConnectionStatus::Connecting {
            Screen::Loading
        } else if self.is_drawing() {
            Screen::Drawing
        } else if self.winners.is_some() {
            Screen::Results
        } else {
            Screen::Lobby
        }
    }

    /// Whether a draw may be started from the current state
    pub fn can_trigger(&self) -> bool {
        self.participant_count > 0
            && self.connection == ConnectionStatus::Connected
            && self.screen() == Screen::Lobby
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            lang: self.lang,
            api_url: self.api_url.clone(),
            screen: self.screen(),
            connection: self.connection,
            is_polling: self.poller.is_busy(),
            last_update: self.poller.watermark(),
            keyword: self.keyword.clone(),
            participant_count: self.participant_count,
            participants: self.participants.clone(),
            prizes: self.prizes.clone(),
            winners: self.winners.clone(),
            can_trigger: self.can_trigger(),
            scroll: self.scroll,
            show_help: self.show_help,
        }
    }
}
