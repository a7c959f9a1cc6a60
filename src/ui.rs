//! Screen rendering for the lottery display

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use ratatui::{prelude::*, widgets::*};

use crate::app::ConnectionStatus;
use crate::constants::{APP_NAME, APP_VERSION};
use crate::i18n::{self, t, Lang, K};
use crate::messages::{RenderState, Screen};
use crate::models::{Participant, PrizeTier};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ============================================================================
// Render-fault catcher
// ============================================================================

thread_local! {
    static RENDERING: Cell<bool> = const { Cell::new(false) };
}

/// True while [`draw_guarded`] is running a view on this thread. Panics seen
/// here are caught and turned into the recovery screen.
pub fn render_in_progress() -> bool {
    RENDERING.with(Cell::get)
}

/// Draw `view`, falling back to the recovery screen if it panics.
///
/// Once `fault` is set the view is no longer attempted; the caller clears
/// `fault` to retry.
pub fn draw_guarded<F>(f: &mut Frame, lang: Lang, fault: &mut Option<String>, view: F)
where
    F: FnOnce(&mut Frame),
{
    if let Some(message) = fault.as_deref() {
        draw_fault_screen(f, lang, message);
        return;
    }

    RENDERING.with(|r| r.set(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| view(f)));
    RENDERING.with(|r| r.set(false));

    if let Err(payload) = outcome {
        let message = panic_message(payload.as_ref());
        tracing::error!(error = %message, "Rendering failed, showing recovery screen");
        draw_fault_screen(f, lang, &message);
        *fault = Some(message);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("unknown rendering fault")
    }
}

fn draw_fault_screen(f: &mut Frame, lang: Lang, message: &str) {
    let area = f.area();
    f.render_widget(Clear, area);

    let popup_area = centered_rect(70, 60, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(format!("⚠{}", t(lang, K::ErrorTitle)), Style::default().fg(Color::Red).bold()));

    let lines = vec![
        Line::from(""),
        Line::from(t(lang, K::ErrorBody)),
        Line::from(Span::styled(format!("({message})"), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(t(lang, K::SuggestedSolutions), Style::default().fg(Color::Gray))),
        Line::from(format!("  • {}", t(lang, K::FixReload))),
        Line::from(format!("  • {}", t(lang, K::FixResize))),
        Line::from(format!("  • {}", t(lang, K::FixPlainTerminal))),
        Line::from(""),
        Line::from(Span::styled(t(lang, K::KeysFault), Style::default().fg(Color::Yellow).bold())),
    ];

    let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(body, popup_area);
}

// ============================================================================
// Screens
// ============================================================================

pub fn draw_ui(f: &mut Frame, state: &RenderState, tick: u64) {
    let area = f.area();

    if state.screen == Screen::Loading {
        draw_loading(f, state, tick, area);
        return;
    }

    let banner_height = if state.connection == ConnectionStatus::Disconnected { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(banner_height), // Disconnect banner
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    draw_header(f, state, tick, chunks[0]);
    if banner_height > 0 {
        draw_disconnect_banner(f, state, chunks[1]);
    }

    match state.screen {
        Screen::Lobby => draw_lobby(f, state, chunks[2]),
        Screen::Drawing => draw_drawing(f, state, tick, chunks[2]),
        Screen::Results => draw_results(f, state, chunks[2]),
        Screen::Loading => {}
    }

    draw_status_bar(f, state, chunks[3]);

    if state.show_help {
        draw_help_popup(f, state.lang, area);
    }
}

fn draw_loading(f: &mut Frame, state: &RenderState, tick: u64, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(spinner_frame(tick), Style::default().fg(Color::Magenta).bold())),
        Line::from(Span::styled(t(state.lang, K::Loading), Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);
}

fn draw_header(f: &mut Frame, state: &RenderState, tick: u64, area: Rect) {
    let lang = state.lang;

    let title = Line::from(Span::styled(t(lang, K::AppTitle), Style::default().fg(Color::White).bold()));

    let (before, after) = i18n::join_instruction_parts(lang);
    let instruction = Line::from(vec![
        Span::styled(before, Style::default().fg(Color::Gray)),
        Span::styled(state.keyword.clone(), Style::default().fg(Color::Magenta).bold()),
        Span::styled(after, Style::default().fg(Color::Gray)),
    ]);

    let (symbol, label) = match state.connection {
        ConnectionStatus::Connected => ("✔".to_string(), t(lang, K::Connected)),
        ConnectionStatus::Connecting => (spinner_frame(tick).to_string(), t(lang, K::Connecting)),
        ConnectionStatus::Disconnected => ("✖".to_string(), t(lang, K::Disconnected)),
    };
    let color = connection_color(state.connection);
    let mut status = vec![
        Span::styled(format!("{symbol} "), Style::default().fg(color)),
        Span::styled(label, Style::default().fg(color).bold()),
    ];
    if let Some(watermark) = state.last_update {
        status.push(Span::styled(
            format!("   {}: {}", t(lang, K::LastUpdate), watermark.label()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if state.is_polling {
        status.push(Span::styled(" ⟳", Style::default().fg(Color::DarkGray)));
    }

    let header = Paragraph::new(vec![title, instruction, Line::from(status)]).alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn draw_disconnect_banner(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        Line::from(Span::styled(
            format!("✖ {}", t(state.lang, K::BannerTitle)),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(Span::styled(
            i18n::backend_hint(state.lang, &state.api_url),
            Style::default().fg(Color::Red),
        )),
    ];

    let banner = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    f.render_widget(banner, area);
}

fn draw_lobby(f: &mut Frame, state: &RenderState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
        .split(area);

    let prize_height = bordered_height(state.prizes.len());
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),            // Stats
            Constraint::Length(prize_height), // Prize settings
            Constraint::Length(5),            // Draw button
            Constraint::Min(0),
        ])
        .split(columns[0]);

    draw_stats(f, state, left[0]);
    draw_prize_settings(f, state, left[1]);
    draw_draw_button(f, state, left[2]);
    draw_participants(f, state, columns[1]);
}

fn draw_stats(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("👥{}", t(state.lang, K::StatsTitle)));

    let lines = vec![
        Line::from(Span::styled(
            state.participant_count.to_string(),
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(Span::styled(t(state.lang, K::CurrentParticipants), Style::default().fg(Color::Gray))),
    ];

    f.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Center), area);
}

fn draw_prize_settings(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("🏆{}", t(state.lang, K::PrizeSettings)));

    let items: Vec<ListItem> = state
        .prizes
        .iter()
        .map(|(name, count)| {
            let tier = PrizeTier::classify(name);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", tier.badge())),
                Span::styled(name.to_string(), Style::default().fg(tier_color(tier)).bold()),
                Span::styled(
                    format!("  {}", i18n::winners_count(state.lang, *count as usize)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn draw_draw_button(f: &mut Frame, state: &RenderState, area: Rect) {
    let lang = state.lang;
    let label = if state.connection != ConnectionStatus::Connected {
        t(lang, K::BtnWaitingConnection)
    } else if state.participant_count == 0 {
        t(lang, K::BtnWaitingParticipants)
    } else {
        t(lang, K::BtnStart)
    };

    let (border, text_style) = if state.can_trigger {
        (Style::default().fg(Color::Green), Style::default().fg(Color::Black).bg(Color::Green).bold())
    } else {
        (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
    };

    let mut lines = vec![Line::from(Span::styled(format!(" {label} "), text_style))];
    if state.participant_count == 0 && state.connection == ConnectionStatus::Connected {
        lines.push(Line::from(Span::styled(
            i18n::wait_for_keyword(lang, &state.keyword),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let button = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(border))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(button, area);
}

fn draw_participants(f: &mut Frame, state: &RenderState, area: Rect) {
    let lang = state.lang;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" 👥 {} ", t(lang, K::ParticipantsTitle)))
        .title(
            Line::from(format!(" {} ", i18n::people_count(lang, state.participants.len()))).right_aligned(),
        );

    if state.participants.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(t(lang, K::NoParticipants), Style::default().fg(Color::Gray))),
            Line::from(Span::styled(t(lang, K::WaitingKeyword), Style::default().fg(Color::DarkGray))),
        ];
        f.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Center), area);
        return;
    }

    let lines: Vec<Line> = state
        .participants
        .iter()
        .enumerate()
        .map(|(i, p)| numbered_line(i, p, Color::Magenta))
        .collect();

    let list = Paragraph::new(lines)
        .block(block)
        .scroll((clamp_scroll(state.scroll, state.participants.len()), 0));
    f.render_widget(list, area);
}

fn draw_drawing(f: &mut Frame, state: &RenderState, tick: u64, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let active_dot = (tick / 4) as usize % 3;
    let dots: Vec<Span> = (0..3)
        .map(|i| {
            let (symbol, color) = if i == active_dot { ("● ", Color::Magenta) } else { ("· ", Color::DarkGray) };
            Span::styled(symbol, Style::default().fg(color))
        })
        .collect();

    let sparkle = if (tick / 8) % 2 == 0 { "✨" } else { "  " };
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{sparkle} ")),
            Span::styled(spinner_frame(tick), Style::default().fg(Color::Magenta).bold()),
            Span::raw(format!(" {sparkle}")),
        ]),
        Line::from(""),
        Line::from(Span::styled(t(state.lang, K::DrawingTitle), Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(t(state.lang, K::DrawingHint), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(dots),
        Line::from(Span::styled("⚡", Style::default().fg(Color::Yellow))),
    ];

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Yellow)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(card, popup_area);
}

fn draw_results(f: &mut Frame, state: &RenderState, area: Rect) {
    let lang = state.lang;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title + back hint
            Constraint::Min(3),    // Prize grid
            Constraint::Length(5), // Congratulations
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(t(lang, K::ResultsTitle), Style::default().fg(Color::Yellow).bold())),
        Line::from(Span::styled(format!("↺ {}", t(lang, K::BackHome)), Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let Some(winners) = state.winners.as_ref() else {
        return;
    };

    if winners.is_empty() {
        let empty = Paragraph::new(t(lang, K::NoWinners))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
    } else {
        let prizes: Vec<(&str, &Vec<Participant>)> = winners.iter().collect();
        let cols = prizes.len().min(3);
        let rows = prizes.len().div_ceil(cols);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
            .split(chunks[1]);

        for (row_idx, row) in prizes.chunks(cols).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(row_areas[row_idx]);
            for (cell, (name, list)) in cells.iter().zip(row) {
                draw_prize_winners(f, state, name, list, *cell);
            }
        }
    }

    let congrats = Paragraph::new(vec![
        Line::from("🎊🎉🎊"),
        Line::from(Span::styled(t(lang, K::Congrats), Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(t(lang, K::Thanks), Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Magenta)));
    f.render_widget(congrats, chunks[2]);
}

fn draw_prize_winners(f: &mut Frame, state: &RenderState, name: &str, winners: &[Participant], area: Rect) {
    let tier = PrizeTier::classify(name);
    let color = tier_color(tier);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(format!(" {} {} ", tier.badge(), name), Style::default().fg(color).bold()))
        .title_bottom(Line::from(format!(" {} ", i18n::winners_count(state.lang, winners.len()))).right_aligned());

    if winners.is_empty() {
        let empty = Paragraph::new(t(state.lang, K::NoWinners))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = winners
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut line = numbered_line(i, p, color);
            line.push_span(Span::raw(" 🎊"));
            line
        })
        .collect();

    let list = Paragraph::new(lines)
        .block(block)
        .scroll((clamp_scroll(state.scroll, winners.len()), 0));
    f.render_widget(list, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let keys = match state.screen {
        Screen::Lobby | Screen::Loading => K::KeysLobby,
        Screen::Drawing => K::KeysDrawing,
        Screen::Results => K::KeysResults,
    };

    let bar = Paragraph::new(t(state.lang, keys)).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, lang: Lang, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(t(lang, K::HelpTitle))
        .title_bottom(Line::from(format!(" {APP_NAME} v{APP_VERSION} ")).right_aligned())
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(t(lang, K::HelpText))
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

// ============================================================================
// Helpers
// ============================================================================

fn numbered_line(index: usize, participant: &Participant, accent: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>3}. ", index + 1), Style::default().fg(accent).bold()),
        Span::styled(participant.name.clone(), Style::default().fg(Color::White).bold()),
        Span::styled(format!("  ID: {}", participant.id), Style::default().fg(Color::DarkGray)),
    ])
}

/// Height of a bordered block holding `lines` rows, at least one
fn bordered_height(lines: usize) -> u16 {
    u16::try_from(lines.max(1)).unwrap_or(u16::MAX).saturating_add(2)
}

/// Keep at least one line visible
fn clamp_scroll(scroll: u16, lines: usize) -> u16 {
    let max = lines.saturating_sub(1).min(u16::MAX as usize) as u16;
    scroll.min(max)
}

fn spinner_frame(tick: u64) -> &'static str {
    SPINNER[(tick / 2) as usize % SPINNER.len()]
}

/// Prize tier color
pub fn tier_color(tier: PrizeTier) -> Color {
    match tier {
        PrizeTier::First => Color::Yellow,
        PrizeTier::Second => Color::Gray,
        PrizeTier::Third => Color::Rgb(217, 119, 6),
        PrizeTier::Other => Color::Magenta,
    }
}

/// Connection indicator color
pub fn connection_color(status: ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Connected => Color::Green,
        ConnectionStatus::Connecting => Color::Yellow,
        ConnectionStatus::Disconnected => Color::Red,
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PrizeLevels, Watermark, Winners};
    use ratatui::backend::TestBackend;

    fn render_with<F: FnOnce(&mut Frame)>(width: u16, height: u16, draw: F) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(draw).expect("draw");

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(state: &RenderState) -> String {
        render_with(120, 40, |f| draw_ui(f, state, 0))
    }

    fn lobby(count: usize) -> RenderState {
        RenderState {
            screen: Screen::Lobby,
            connection: ConnectionStatus::Connected,
            last_update: Some(Watermark(1.0)),
            participant_count: count as u64,
            participants: (0..count)
                .map(|i| Participant::new(format!("!node{i}"), format!("Node {i}")))
                .collect(),
            prizes: [("First Prize", 1), ("Second Prize", 3), ("Third Prize", 5)]
                .into_iter()
                .collect::<PrizeLevels>(),
            can_trigger: count > 0,
            ..RenderState::default()
        }
    }

    #[test]
    fn test_loading_screen() {
        let out = render(&RenderState::default());
        assert!(out.contains("Loading lottery system..."));
    }

    #[test]
    fn test_lobby_lists_participants_and_prizes() {
        let out = render(&lobby(3));
        assert!(out.contains("Participation Stats"));
        assert!(out.contains("Node 2"));
        assert!(out.contains("ID: !node0"));
        assert!(out.contains("Second Prize"));
        assert!(out.contains("5 winners"));
        assert!(out.contains("Press d to Start Lottery"));
        assert!(out.contains("Last update: #1"));
        assert!(!out.contains("Unable to connect"));
    }

    #[test]
    fn test_empty_lobby_waits_for_participants() {
        let out = render(&lobby(0));
        assert!(out.contains("Waiting for participants..."));
        assert!(out.contains("No participants yet"));
        assert!(out.contains("to participate in lottery"));
    }

    #[test]
    fn test_disconnect_banner() {
        let state = RenderState {
            connection: ConnectionStatus::Disconnected,
            api_url: String::from("http://10.0.0.5:5000"),
            can_trigger: false,
            ..lobby(2)
        };
        let out = render(&state);
        assert!(out.contains("Unable to connect to backend server"));
        assert!(out.contains("http://10.0.0.5:5000"));
        assert!(out.contains("Waiting for connection..."));
    }

    #[test]
    fn test_drawing_hides_lobby() {
        let state = RenderState { screen: Screen::Drawing, ..lobby(3) };
        let out = render(&state);
        assert!(out.contains("Drawing in progress..."));
        assert!(!out.contains("Node 1"));
    }

    #[test]
    fn test_results_show_winners_in_order() {
        let winners: Winners = [
            ("First Prize", vec![Participant::new("a", "Alice")]),
            ("Second Prize", vec![Participant::new("b", "Bob"), Participant::new("c", "Carol")]),
            ("Third Prize", vec![]),
        ]
        .into_iter()
        .collect();
        let state = RenderState {
            screen: Screen::Results,
            winners: Some(winners),
            ..lobby(0)
        };
        let out = render(&state);
        assert!(out.contains("Lottery Results"));
        assert!(out.contains("1. Alice"));
        assert!(out.contains("ID: a"));
        let bob = out.find("1. Bob").expect("Bob listed");
        let carol = out.find("2. Carol").expect("Carol listed");
        assert!(bob < carol);
        assert!(out.contains("No winners"));
        assert!(out.contains("Congratulations to all winners!"));
    }

    #[test]
    fn test_help_popup() {
        let state = RenderState { show_help: true, ..lobby(1) };
        let out = render(&state);
        assert!(out.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_render_fault_shows_recovery_screen() {
        let mut fault = None;
        let out = render_with(100, 30, |f| {
            draw_guarded(f, Lang::En, &mut fault, |_| panic!("layout exploded"))
        });
        assert!(out.contains("An Error Occurred"));
        assert!(out.contains("Press r to reload"));
        assert_eq!(fault.as_deref(), Some("layout exploded"));

        // While faulted the view is not attempted again
        let out = render_with(100, 30, |f| {
            draw_guarded(f, Lang::En, &mut fault, |_| unreachable!("view must not run"))
        });
        assert!(out.contains("An Error Occurred"));
    }

    #[test]
    fn test_render_flag_only_set_inside_view() {
        assert!(!render_in_progress());

        let mut inside = false;
        let mut fault = None;
        render_with(40, 10, |f| draw_guarded(f, Lang::En, &mut fault, |_| inside = render_in_progress()));
        assert!(inside);
        assert!(!render_in_progress());

        render_with(40, 10, |f| draw_guarded(f, Lang::En, &mut fault, |_| panic!("bad layout")));
        assert!(fault.is_some());
        assert!(!render_in_progress());
    }

    #[test]
    fn test_keyword_highlight_covers_only_the_keyword() {
        let state = RenderState { keyword: String::from("e"), ..lobby(1) };
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| draw_ui(f, &state, 0)).expect("draw");

        let buffer = terminal.backend().buffer();
        let row: String = (0..buffer.area.width).map(|x| buffer[(x, 1)].symbol()).collect();
        let start = row.find("Send \"e\" to participate").expect("instruction row") as u16;
        let magenta: Vec<u16> = (0..buffer.area.width)
            .filter(|&x| buffer[(x, 1)].fg == Color::Magenta)
            .collect();
        assert_eq!(magenta, vec![start + 6]);
    }

    #[test]
    fn test_bordered_height_saturates() {
        assert_eq!(bordered_height(0), 3);
        assert_eq!(bordered_height(3), 5);
        assert_eq!(bordered_height(70_000), u16::MAX);
    }

    #[test]
    fn test_clamp_scroll() {
        assert_eq!(clamp_scroll(10, 3), 2);
        assert_eq!(clamp_scroll(1, 0), 0);
        assert_eq!(clamp_scroll(1, 5), 1);
    }
}
