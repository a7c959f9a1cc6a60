//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::messages::render::Screen;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    // Operator actions
    TriggerDraw,
    Reset,
    Refresh,

    // Scrolling (participant list / winners)
    ScrollUp,
    ScrollDown,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    screen: Screen,
    show_help: bool,
    faulted: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Recovery screen only offers reload and quit
    if faulted {
        return match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Some(UiEvent::Refresh),
            KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
            _ => None,
        };
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
        KeyCode::Char('d') | KeyCode::Enter if screen == Screen::Lobby => Some(UiEvent::TriggerDraw),
        KeyCode::Char('b') | KeyCode::Backspace if screen == Screen::Results => Some(UiEvent::Reset),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_actions_depend_on_screen() {
        assert_eq!(key_to_ui_event(press(KeyCode::Char('d')), Screen::Lobby, false, false), Some(UiEvent::TriggerDraw));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('d')), Screen::Results, false, false), None);
        assert_eq!(key_to_ui_event(press(KeyCode::Char('b')), Screen::Results, false, false), Some(UiEvent::Reset));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('b')), Screen::Drawing, false, false), None);
    }

    #[test]
    fn test_help_swallows_keys() {
        assert_eq!(key_to_ui_event(press(KeyCode::Char('d')), Screen::Lobby, true, false), Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_fault_screen_keys() {
        assert_eq!(key_to_ui_event(press(KeyCode::Char('r')), Screen::Lobby, false, true), Some(UiEvent::Refresh));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('d')), Screen::Lobby, false, true), None);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(ctrl_c, Screen::Results, false, true), Some(UiEvent::Quit));
    }
}
