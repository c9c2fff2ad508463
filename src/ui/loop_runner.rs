//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, background task events, the auto-refresh
//! timer, and a periodic tick. Terminal focus events are tracked so the
//! auto-refresh timer can stay quiet while the terminal is backgrounded.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::{handle_app_event, spawn_refresh, spawn_sources_load};
use super::input::handle_input;
use super::render::render;

/// Result of handling a key press event.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex four event sources:
/// - **Terminal input**: key presses and focus changes from crossterm's
///   async event stream
/// - **Background tasks**: source list, feed pages, and refresh completions
///   via the `AppEvent` channel
/// - **Auto-refresh timer**: a single interval re-armed whenever the
///   settings change the minute value; absent when the interval is 0
/// - **Periodic tick**: 250ms timer for status-message expiry
///
/// # Panic Safety
///
/// Installs a panic hook that restores terminal state before unwinding,
/// ensuring the terminal is not left in raw mode on panic.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    // Install panic hook BEFORE setting up terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();

    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    // Auto-refresh: a single interval, re-armed when the settings change.
    let mut auto_refresh: Option<tokio::time::Interval> = None;
    let mut armed_minutes = u64::MAX;

    // Signal handlers for graceful shutdown (Unix only)
    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    // Kick off startup loading: the source list first, then the feed once
    // the selector state is known (see events::handle_app_event).
    spawn_sources_load(app.api.clone(), &event_tx);

    loop {
        // Re-arm the auto-refresh timer when the interval setting changed.
        // 0 cancels any existing timer; there is never more than one armed.
        if armed_minutes != app.filters.refresh_minutes {
            armed_minutes = app.filters.refresh_minutes;
            auto_refresh = if armed_minutes == 0 {
                None
            } else {
                let period = Duration::from_secs(armed_minutes * 60);
                let mut interval =
                    tokio::time::interval_at(tokio::time::Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                Some(interval)
            };
            tracing::debug!(minutes = armed_minutes, "Auto-refresh timer re-armed");
        }

        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        // Clear expired status messages and trigger redraw if cleared
        if app.clear_expired_status() {
            app.needs_redraw = true;
        }

        // Drain all pending app events before handling more input, so
        // background completions are processed promptly during rapid typing.
        while let Ok(event) = event_rx.try_recv() {
            app.needs_redraw = true;
            handle_app_event(app, event, &event_tx);
        }

        // Platform-specific signal futures
        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        let auto_refresh_tick = async {
            match auto_refresh.as_mut() {
                Some(interval) => {
                    interval.tick().await;
                }
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;  // Process in order listed for predictable behavior

            // Signal handlers for graceful shutdown (highest priority)
            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            // Terminal input and focus events
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        app.needs_redraw = true;
                        match handle_input(app, key.code, key.modifiers, &event_tx) {
                            Ok(Action::Quit) => break,
                            Ok(Action::Continue) => {}
                            Err(e) => app.set_error(format!("Error: {}", e)),
                        }
                    }
                    // Focus stands in for document visibility: ticks that
                    // land while unfocused trigger no network activity.
                    Some(Ok(Event::FocusGained)) => app.terminal_focused = true,
                    Some(Ok(Event::FocusLost)) => app.terminal_focused = false,
                    Some(Ok(Event::Resize(_, _))) => app.needs_redraw = true,
                    _ => {}
                }
            }

            // Background task events (blocking recv for when queue was empty)
            Some(event) = event_rx.recv() => {
                app.needs_redraw = true;
                handle_app_event(app, event, &event_tx);
            }

            // Auto-refresh tick: fire only while the terminal is visible.
            // spawn_refresh is guarded, so a tick during a pending load no-ops.
            _ = auto_refresh_tick => {
                if app.terminal_focused {
                    tracing::debug!("Auto-refresh tick");
                    spawn_refresh(app, &event_tx);
                    app.needs_redraw = true;
                } else {
                    tracing::debug!("Auto-refresh tick skipped (terminal unfocused)");
                }
            }

            // Periodic tick for status expiry
            _ = tick_interval.tick() => {}
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
