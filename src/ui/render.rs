//! Frame layout dispatch.

use crate::app::App;
use ratatui::{
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame,
};

use super::{articles, sources, status};

/// Width of the source selector pane.
const SOURCES_PANE_WIDTH: u16 = 34;

/// Render one frame: header line, source/feed panes, status bar.
pub(super) fn render(f: &mut Frame, app: &App) {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(f.area());

    // Header: the active-filter summary plus the loaded count.
    let header = Paragraph::new(app.header_line()).style(app.style("header"));
    f.render_widget(header, rows[0]);

    let panes = Layout::horizontal([
        Constraint::Length(SOURCES_PANE_WIDTH),
        Constraint::Min(1),
    ])
    .split(rows[1]);

    sources::render(f, app, panes[0]);
    articles::render(f, app, panes[1]);
    status::render(f, app, rows[2]);
}
