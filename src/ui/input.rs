//! Keyboard input handling.
//!
//! Normal mode drives navigation and the trigger actions; the input modes
//! edit one field each through the status line. Trigger keys (refresh,
//! reload, load more) are gated on the in-flight state — while a request is
//! pending they do nothing, matching the disabled affordances.

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use crate::app::{App, AppEvent, Focus, InputMode};

use super::events::{spawn_load, spawn_refresh};
use super::loop_runner::Action;

/// Maximum length for any status-line input field.
const MAX_INPUT_LENGTH: usize = 256;

/// Handle a key press. Returns `Action::Quit` to leave the event loop.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    _modifiers: KeyModifiers,
    tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if app.input_mode != InputMode::Normal {
        handle_editing(app, code, tx);
        return Ok(Action::Continue);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),

        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Sources => Focus::Articles,
                Focus::Articles => Focus::Sources,
            };
        }

        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),

        // -- Source selection --
        KeyCode::Char(' ') | KeyCode::Enter if app.focus == Focus::Sources => {
            if let Some(key) = app.source_under_cursor().map(str::to_string) {
                app.toggle_source(&key);
                spawn_load(app, tx, false);
            }
        }
        KeyCode::Char('a') => {
            app.toggle_all_sources();
            spawn_load(app, tx, false);
        }

        // -- Filter edits --
        KeyCode::Char('/') => {
            let current = app.filters.keyword.clone();
            enter_mode(app, InputMode::Keyword, current);
        }
        KeyCode::Char('p') => {
            let period = app.cycle_period();
            app.set_status(format!("Period: {}", period.label()));
            spawn_load(app, tx, false);
        }
        KeyCode::Char('F') => {
            let current = date_buffer(app.filters.from_date);
            enter_mode(app, InputMode::FromDate, current);
        }
        KeyCode::Char('T') => {
            let current = date_buffer(app.filters.to_date);
            enter_mode(app, InputMode::ToDate, current);
        }
        KeyCode::Char('i') => {
            let current = app.filters.refresh_minutes.to_string();
            enter_mode(app, InputMode::Interval, current);
        }
        KeyCode::Char('L') => {
            let current = app.ingest_limit.to_string();
            enter_mode(app, InputMode::IngestLimit, current);
        }

        // -- Triggers (no-ops while a request is pending) --
        KeyCode::Char('r') => spawn_refresh(app, tx),
        KeyCode::Char('R') => {
            if !app.busy() {
                app.controller.invalidate();
                spawn_load(app, tx, false);
            }
        }
        KeyCode::Char('m') => {
            if !app.busy() && app.controller.can_load_more() {
                spawn_load(app, tx, true);
            }
        }

        // -- Misc --
        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KeyCode::Char('o') if app.focus == Focus::Articles => app.open_selected(),
        KeyCode::Char('x') if app.empty_state => {
            app.reset_filters();
            spawn_load(app, tx, false);
        }

        _ => {}
    }

    Ok(Action::Continue)
}

fn enter_mode(app: &mut App, mode: InputMode, initial: String) {
    app.input_mode = mode;
    app.input_buffer = initial;
}

fn date_buffer(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Status-line editing: type to append, Backspace to delete, Enter to
/// commit, Esc to abandon.
fn handle_editing(app: &mut App, code: KeyCode, tx: &mpsc::Sender<AppEvent>) {
    match code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.input_buffer.clear();
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            if app.input_buffer.len() < MAX_INPUT_LENGTH {
                app.input_buffer.push(c);
            }
        }
        KeyCode::Enter => commit_input(app, tx),
        _ => {}
    }
}

fn commit_input(app: &mut App, tx: &mpsc::Sender<AppEvent>) {
    let buffer = std::mem::take(&mut app.input_buffer);
    let mode = app.input_mode;
    app.input_mode = InputMode::Normal;

    match mode {
        InputMode::Normal => {}

        InputMode::Keyword => {
            app.set_keyword(&buffer);
            spawn_load(app, tx, false);
        }

        InputMode::FromDate | InputMode::ToDate => {
            let trimmed = buffer.trim();
            let parsed = if trimmed.is_empty() {
                Some(None)
            } else {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok().map(Some)
            };
            match parsed {
                Some(date) => {
                    if mode == InputMode::FromDate {
                        app.set_from_date(date);
                    } else {
                        app.set_to_date(date);
                    }
                    spawn_load(app, tx, false);
                }
                None => {
                    // Leave the field unchanged; the user retries.
                    app.set_error("Dates use YYYY-MM-DD");
                }
            }
        }

        InputMode::Interval => match buffer.trim().parse::<u64>() {
            Ok(0) => {
                app.set_refresh_minutes(0);
                app.set_status("Auto-refresh disabled");
            }
            Ok(minutes) => {
                app.set_refresh_minutes(minutes);
                app.set_status(format!("Auto-refresh every {} min", minutes));
            }
            Err(_) => app.set_error("Interval must be a number of minutes"),
        },

        InputMode::IngestLimit => match buffer.trim().parse::<u32>() {
            Ok(limit) if limit > 0 => {
                app.ingest_limit = limit;
                app.set_status(format!("Refresh pulls up to {} per source", limit));
            }
            _ => app.set_error("Per-source limit must be a positive number"),
        },
    }
}
