//! Source selector widget.
//!
//! One row per source with a checkbox marker; the pane title carries the
//! selected count, which is purely the size of the selected-set.

use crate::app::{App, Focus};
use crate::util::{sanitize, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the source selector panel.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::Sources;

    let items: Vec<ListItem> = if app.sources.is_empty() {
        vec![ListItem::new(Span::styled(
            "No sources available",
            app.style("feed_empty"),
        ))]
    } else {
        let title_width = area.width.saturating_sub(6) as usize;
        app.sources
            .iter()
            .enumerate()
            .map(|(i, source)| {
                let selected = app.selected_sources.contains(&source.key);
                let marker = if selected { "[x] " } else { "[ ] " };

                let marker_style = if selected {
                    app.style("source_checked")
                } else {
                    app.style("source_normal")
                };
                let row_style = if i == app.source_cursor && is_focused {
                    app.style("source_row_selected")
                } else {
                    app.style("source_normal")
                };

                let title = sanitize(&source.title);
                let title = truncate_to_width(&title, title_width).into_owned();

                ListItem::new(Line::from(vec![
                    Span::styled(marker, marker_style),
                    Span::styled(title, row_style),
                ]))
            })
            .collect()
    };

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let title = format!("Sources ({}/{})", app.selected_count(), app.sources.len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    f.render_widget(list, area);
}
