//! Status bar widget.
//!
//! Priority order: an active input prompt, then a posted status/error
//! message, then context-sensitive key hints. The trigger hints disappear
//! while a request is in flight, mirroring the disabled affordances.

use crate::app::{App, Focus, InputMode};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    // Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    let mut style = app.style("status_bar");

    let text: Cow<'_, str> = if app.input_mode != InputMode::Normal {
        let label = match app.input_mode {
            InputMode::Keyword => "Keyword",
            InputMode::FromDate => "From date (YYYY-MM-DD, empty clears)",
            InputMode::ToDate => "To date (YYYY-MM-DD, empty clears)",
            InputMode::Interval => "Auto-refresh minutes (0 disables)",
            InputMode::IngestLimit => "Items per source on refresh",
            InputMode::Normal => unreachable!(),
        };
        Cow::Owned(format!(
            "{}: {}_  (ENTER apply · ESC cancel)",
            label, app.input_buffer
        ))
    } else if let Some(status) = &app.status {
        if status.is_error {
            style = app.style("status_error");
        }
        Cow::Borrowed(status.text.as_ref())
    } else if app.busy() {
        Cow::Borrowed("Working...")
    } else {
        match app.focus {
            Focus::Sources => Cow::Borrowed(
                "[Space]toggle [a]ll/none [Tab]feed [/]keyword [p]eriod [r]efresh [q]uit",
            ),
            Focus::Articles => {
                if app.controller.can_load_more() {
                    Cow::Borrowed(
                        "[j/k]move [o]pen [m]ore [/]keyword [p]eriod [F/T]dates [r]efresh [R]eload [t]heme [q]uit",
                    )
                } else {
                    Cow::Borrowed(
                        "[j/k]move [o]pen [/]keyword [p]eriod [F/T]dates [r]efresh [R]eload [t]heme [q]uit",
                    )
                }
            }
        }
    };

    let paragraph = Paragraph::new(text).style(style);
    f.render_widget(paragraph, area);
}
