//! Article feed widget: the list itself plus the loading placeholder and
//! the empty state with its reset affordance.

use crate::app::{App, Focus};
use crate::util::{sanitize, truncate_to_width};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Format a timestamp as relative time
pub fn format_relative_time(timestamp: Option<DateTime<Utc>>) -> String {
    let Some(ts) = timestamp else {
        return String::new();
    };

    let diff = Utc::now().signed_duration_since(ts).num_seconds();

    // Future dates (malformed feed items)
    if diff < 0 {
        return "now".to_string();
    }

    if diff < 3600 {
        return format!("{}m", diff / 60);
    }

    if diff < 86400 {
        return format!("{}h", diff / 3600);
    }

    if diff < 604800 {
        return format!("{}d", diff / 86400);
    }

    // Older than 7 days - show date
    ts.format("%b %d").to_string()
}

/// Render the article feed panel.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::Articles;
    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let mut title = format!("Feed ({})", app.articles.len());
    if app.controller.can_load_more() && !app.busy() {
        title.push_str(" — more available");
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    // Loading placeholder replaces the list immediately on a non-append
    // load; the list data itself stays put so a failure brings it back.
    if app.loading {
        let placeholder = Paragraph::new("Loading feed...")
            .style(app.style("feed_loading"))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    // Empty state with the reset affordance.
    if app.empty_state {
        let lines = vec![
            Line::raw(""),
            Line::raw("  No articles match the current filters."),
            Line::raw(""),
            Line::raw("  Press [x] to clear the keyword and dates,"),
            Line::raw("  switch back to the last 24 hours, and reload."),
        ];
        let empty = Paragraph::new(lines)
            .style(app.style("feed_empty"))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    if app.articles.is_empty() {
        let placeholder = Paragraph::new("No articles yet — press r to refresh")
            .style(app.style("feed_empty"))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let line_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let title_style = if i == app.article_cursor && is_focused {
                app.style("article_selected")
            } else {
                app.style("article_title")
            };

            // Everything from the server is untrusted text; clean it before
            // it reaches the terminal.
            let title = sanitize(&article.title);
            let title = truncate_to_width(&title, line_width).into_owned();

            let mut meta = format!(
                "{} · {}",
                sanitize(&article.source_title),
                format_relative_time(article.published_at)
            );
            if let Some(detail) = article
                .reason
                .as_deref()
                .or(article.snippet.as_deref())
                .or(article.summary.as_deref())
            {
                meta.push_str(" · ");
                meta.push_str(&sanitize(detail));
            }
            let meta = truncate_to_width(&meta, line_width).into_owned();

            ListItem::new(vec![
                Line::from(Span::styled(title, title_style)),
                Line::from(Span::styled(
                    format!("  {}", meta),
                    app.style("article_meta"),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}
