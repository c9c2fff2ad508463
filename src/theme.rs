//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles. The chosen
//! variant is persisted independently of the filter settings.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Lowercase name as stored in the theme settings record.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Source selector --
    pub source_normal: Style,
    pub source_row_selected: Style,
    pub source_checked: Style,

    // -- Article feed --
    pub article_title: Style,
    pub article_meta: Style,
    pub article_selected: Style,
    pub feed_loading: Style,
    pub feed_empty: Style,

    // -- Chrome --
    pub header: Style,
    pub status_bar: Style,
    pub status_error: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            source_normal: Style::default(),
            source_row_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            source_checked: Style::default().fg(Color::Green),

            article_title: Style::default().add_modifier(Modifier::BOLD),
            article_meta: Style::default().fg(Color::DarkGray),
            article_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            feed_loading: Style::default().fg(Color::Yellow),
            feed_empty: Style::default().fg(Color::DarkGray),

            header: Style::default().fg(Color::Cyan),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            status_error: Style::default().bg(Color::DarkGray).fg(Color::Red),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    /// Light palette — adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            source_normal: Style::default().fg(Color::Black),
            source_row_selected: Style::default().bg(Color::Blue).fg(Color::White),
            source_checked: Style::default().fg(Color::Green),

            article_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            article_meta: Style::default().fg(Color::DarkGray),
            article_selected: Style::default().bg(Color::Blue).fg(Color::White),
            feed_loading: Style::default().fg(Color::Magenta),
            feed_empty: Style::default().fg(Color::DarkGray),

            header: Style::default().fg(Color::Blue),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            status_error: Style::default().bg(Color::White).fg(Color::Red),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map — string-keyed lookup
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`, resolving role
/// names (e.g. `"article_title"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 13] = [
    "source_normal",
    "source_row_selected",
    "source_checked",
    "article_title",
    "article_meta",
    "article_selected",
    "feed_loading",
    "feed_empty",
    "header",
    "status_bar",
    "status_error",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 13] = [
            p.source_normal,
            p.source_row_selected,
            p.source_checked,
            p.article_title,
            p.article_meta,
            p.article_selected,
            p.feed_loading,
            p.feed_empty,
            p.header,
            p.status_bar,
            p.status_error,
            p.panel_border,
            p.panel_border_focused,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
