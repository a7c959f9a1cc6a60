//! Lottery Display - Actor-based terminal client for the lottery backend
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine and status poller
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::panic;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing_subscriber::EnvFilter;

use lottery_display::config::{Cli, Settings};
use lottery_display::constants::FRAME_INTERVAL_MS;
use lottery_display::messages::ui_events::key_to_ui_event;
use lottery_display::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use lottery_display::network::{ApiClient, NetworkActor};
use lottery_display::ui::{self, draw_guarded, draw_ui};
use lottery_display::AppActor;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Log every panic. Panics caught by the render guard keep the alternate
/// screen; any other panic restores the terminal and then reaches the
/// previous hook, so the message is printed on stderr.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Panic");
        if ui::render_in_progress() {
            return;
        }
        restore_terminal();
        previous(info);
    }));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::resolve(Cli::parse())?;

    // Initialize logging to file
    let (dir, file_name) = split_log_path(&settings.log_file);
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    install_panic_hook();

    tracing::info!(api_url = %settings.api_url, lang = ?settings.lang, "Starting lottery display");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(ApiClient::new(settings.api_url.clone()), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&settings, net_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    // Dropping ui_tx above ends the app loop, which stops the poll timer
    let _ = app_handle.await;
    tracing::info!("Lottery display stopped");

    Ok(())
}

fn split_log_path(path: &Path) -> (&Path, &std::ffi::OsStr) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().unwrap_or(path.as_os_str());
    (dir, file_name)
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut fault: Option<String> = None;
    let mut tick: u64 = 0;

    loop {
        // Draw with current state
        terminal.draw(|f| {
            draw_guarded(f, current_state.lang, &mut fault, |f| draw_ui(f, &current_state, tick))
        })?;
        tick = tick.wrapping_add(1);

        // Poll for events with timeout
        if event::poll(Duration::from_millis(FRAME_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.screen,
                    current_state.show_help,
                    fault.is_some(),
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    if event == UiEvent::Refresh && fault.take().is_some() {
                        tracing::info!("Reloading display after render fault");
                        terminal.clear()?;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        drain_render_states(render_rx, &mut current_state)?;
    }

    Ok(())
}

/// Take the newest render state. Fails once the app actor is gone, so a dead
/// poll loop is never shown as a live display.
fn drain_render_states(
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
    current: &mut RenderState,
) -> anyhow::Result<()> {
    loop {
        match render_rx.try_recv() {
            Ok(state) => *current = state,
            Err(TryRecvError::Empty) => return Ok(()),
            Err(TryRecvError::Disconnected) => anyhow::bail!("app actor stopped unexpectedly"),
        }
    }
}
