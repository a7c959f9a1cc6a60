//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::ConnectionStatus;
use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_KEYWORD};
use crate::i18n::Lang;
use crate::models::{Participant, PrizeLevels, Watermark, Winners};

/// Which main screen is shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    /// Nothing fetched yet
    #[default]
    Loading,
    /// Participant list, prize settings, draw button
    Lobby,
    /// Draw animation
    Drawing,
    /// Latched winners
    Results,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub lang: Lang,
    pub api_url: String,
    pub screen: Screen,

    // Connection
    pub connection: ConnectionStatus,
    pub is_polling: bool,
    pub last_update: Option<Watermark>,

    // Mirrored lottery state
    pub keyword: String,
    pub participant_count: u64,
    pub participants: Vec<Participant>,
    pub prizes: PrizeLevels,
    pub winners: Option<Winners>,

    // Lobby
    pub can_trigger: bool,

    // UI state
    pub scroll: u16,
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            lang: Lang::En,
            api_url: String::from(DEFAULT_API_BASE_URL),
            screen: Screen::Loading,
            connection: ConnectionStatus::Connecting,
            is_polling: false,
            last_update: None,
            keyword: String::from(DEFAULT_KEYWORD),
            participant_count: 0,
            participants: Vec::new(),
            prizes: PrizeLevels::new(),
            winners: None,
            can_trigger: false,
            scroll: 0,
            show_help: false,
        }
    }
}
