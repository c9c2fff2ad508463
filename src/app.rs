//! Central application state.
//!
//! Everything the original page kept in module-level globals (offset, the
//! selected-source set, the in-flight flag) lives here as fields with a
//! defined lifecycle: constructed in `main`, mutated only from the UI task,
//! dropped on exit. Network work happens in spawned tasks that report back
//! through [`AppEvent`]; between awaits, all state mutation is atomic with
//! respect to other callbacks.

use std::borrow::Cow;
use std::collections::HashSet;

use chrono::NaiveDate;
use ratatui::style::Style;
use tokio::time::Instant;

use crate::api::{ApiClient, Article, Source};
use crate::feed::{describe_filters, FeedController, FeedQuery, Period};
use crate::settings::{FilterSettings, SettingsStore, ThemeSettings};
use crate::theme::{StyleMap, ThemeVariant};

/// Default number of items the server ingests per source on refresh.
/// User-editable at runtime; this is the single documented fallback.
pub const DEFAULT_INGEST_LIMIT: u32 = 20;

/// How long a status message stays on screen.
const STATUS_TTL_SECS: u64 = 5;

// ============================================================================
// Events from background tasks
// ============================================================================

/// Completion events sent by spawned network tasks back to the UI task.
#[derive(Debug)]
pub enum AppEvent {
    /// `GET /api/sources` finished.
    SourcesLoaded(Result<Vec<Source>, String>),
    /// `GET /api/articles` finished. `generation` is the controller token
    /// captured when the request started; stale pages are dropped on arrival.
    PageLoaded {
        generation: u64,
        append: bool,
        result: Result<Vec<Article>, String>,
    },
    /// `POST /api/refresh` finished, successfully or not. Either way the
    /// feed reloads from offset 0 next.
    RefreshFinished(Result<(), String>),
}

// ============================================================================
// View state enums
// ============================================================================

/// Which panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sources,
    Articles,
}

/// Modal text entry driven from the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Keyword,
    FromDate,
    ToDate,
    IngestLimit,
    Interval,
}

/// A status-line message with expiry and error styling.
#[derive(Debug)]
pub struct StatusLine {
    pub text: Cow<'static, str>,
    pub is_error: bool,
    posted_at: Instant,
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
pub struct App {
    pub api: ApiClient,
    pub store: SettingsStore,

    // Persisted filter state (the in-memory copy of filters.json)
    pub filters: FilterSettings,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    // Data
    pub sources: Vec<Source>,
    pub selected_sources: HashSet<String>,
    pub articles: Vec<Article>,

    // Feed pagination/reentrancy state
    pub controller: FeedController,
    /// Non-append load in progress: the feed pane shows a placeholder while
    /// the previous article list stays in memory, so a failure restores it.
    pub loading: bool,
    /// Last non-append load came back with zero results.
    pub empty_state: bool,
    /// `POST /api/refresh` in flight. Trigger affordances stay disabled.
    pub refresh_in_flight: bool,

    /// Items the server ingests per source on refresh. User-editable.
    pub ingest_limit: u32,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub source_cursor: usize,
    pub article_cursor: usize,
    pub status: Option<StatusLine>,
    pub needs_redraw: bool,

    /// Whether the terminal window has focus. The auto-refresh timer only
    /// fires while it does — a backgrounded terminal generates no traffic.
    pub terminal_focused: bool,
}

impl App {
    pub fn new(
        api: ApiClient,
        store: SettingsStore,
        filters: FilterSettings,
        theme_variant: ThemeVariant,
    ) -> Self {
        Self {
            api,
            store,
            filters,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            sources: Vec::new(),
            selected_sources: HashSet::new(),
            articles: Vec::new(),
            controller: FeedController::new(),
            loading: false,
            empty_state: false,
            refresh_in_flight: false,
            ingest_limit: DEFAULT_INGEST_LIMIT,
            focus: Focus::Articles,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            source_cursor: 0,
            article_cursor: 0,
            status: None,
            needs_redraw: true,
            terminal_focused: true,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    // ========================================================================
    // Theme
    // ========================================================================

    /// Cycle the theme variant and persist the preference to its own record,
    /// independent of the filter settings.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.theme_variant = next;
        self.theme = StyleMap::from_palette(&next.palette());
        self.needs_redraw = true;

        if let Err(e) = self.store.save_theme(&ThemeSettings {
            variant: next.name().to_string(),
        }) {
            tracing::warn!(error = %e, "Failed to persist theme preference");
        }
        next.name()
    }

    // ========================================================================
    // Source selection
    // ========================================================================

    /// Install the source list fetched at startup and derive the selection:
    /// the saved keys if the user ever chose (dropping any that no longer
    /// exist), otherwise every source the server marks `enabled`.
    pub fn install_sources(&mut self, sources: Vec<Source>) {
        let live: HashSet<&str> = sources.iter().map(|s| s.key.as_str()).collect();

        self.selected_sources = match &self.filters.sources {
            Some(saved) => saved
                .iter()
                .filter(|key| live.contains(key.as_str()))
                .cloned()
                .collect(),
            None => sources
                .iter()
                .filter(|s| s.enabled)
                .map(|s| s.key.clone())
                .collect(),
        };

        self.sources = sources;
        self.source_cursor = 0;
    }

    /// Number of selected sources — a pure view of set size.
    pub fn selected_count(&self) -> usize {
        self.selected_sources.len()
    }

    /// Flip exactly one source's membership, persist the merged settings,
    /// and reset pagination.
    pub fn toggle_source(&mut self, key: &str) {
        if !self.selected_sources.remove(key) {
            self.selected_sources.insert(key.to_string());
        }
        self.persist_filters();
        self.controller.invalidate();
    }

    /// Select all sources, or clear the selection when everything is already
    /// selected.
    pub fn toggle_all_sources(&mut self) {
        if self.selected_sources.len() == self.sources.len() {
            self.selected_sources.clear();
        } else {
            self.selected_sources = self.sources.iter().map(|s| s.key.clone()).collect();
        }
        self.persist_filters();
        self.controller.invalidate();
    }

    /// Source key under the selector cursor.
    pub fn source_under_cursor(&self) -> Option<&str> {
        self.sources.get(self.source_cursor).map(|s| s.key.as_str())
    }

    // ========================================================================
    // Filter mutations
    // ========================================================================

    /// Write the full merged settings record. Called after every mutation so
    /// fields the mutation didn't touch survive.
    pub fn persist_filters(&mut self) {
        let mut keys: Vec<String> = self.selected_sources.iter().cloned().collect();
        keys.sort();
        self.filters.sources = Some(keys);

        if let Err(e) = self.store.save_filters(&self.filters) {
            tracing::warn!(error = %e, "Failed to persist settings");
            self.set_error("Could not save settings");
        }
    }

    pub fn set_keyword(&mut self, keyword: &str) {
        self.filters.keyword = keyword.trim().to_string();
        self.persist_filters();
        self.controller.invalidate();
    }

    pub fn cycle_period(&mut self) -> Period {
        self.filters.period = self.filters.period.next();
        self.persist_filters();
        self.controller.invalidate();
        self.filters.period
    }

    pub fn set_from_date(&mut self, date: Option<NaiveDate>) {
        self.filters.from_date = date;
        self.persist_filters();
        self.controller.invalidate();
    }

    pub fn set_to_date(&mut self, date: Option<NaiveDate>) {
        self.filters.to_date = date;
        self.persist_filters();
        self.controller.invalidate();
    }

    /// Change the auto-refresh interval. The event loop re-arms its timer
    /// from `filters.refresh_minutes` on the next pass; 0 disables it.
    pub fn set_refresh_minutes(&mut self, minutes: u64) {
        self.filters.refresh_minutes = minutes;
        self.persist_filters();
    }

    /// The empty-state reset affordance: clear the keyword, force the period
    /// back to the last 24 hours, drop both date bounds, persist, and reset
    /// pagination. The source selection is left as the user had it.
    pub fn reset_filters(&mut self) {
        self.filters.keyword.clear();
        self.filters.period = Period::Today;
        self.filters.from_date = None;
        self.filters.to_date = None;
        self.persist_filters();
        self.controller.invalidate();
        self.empty_state = false;
    }

    // ========================================================================
    // Feed loading
    // ========================================================================

    /// Any network operation in flight that should keep the trigger
    /// affordances (refresh, reload, load more) disabled.
    pub fn busy(&self) -> bool {
        self.controller.is_in_flight() || self.refresh_in_flight
    }

    /// Start a feed load if nothing else is in flight.
    ///
    /// Returns the composed query and its generation token for the spawned
    /// task, or `None` when the call is a no-op (reentrancy guard). A
    /// non-append load flips the pane into its placeholder state immediately;
    /// the old article list stays in memory until a page actually lands.
    pub fn begin_load(&mut self, append: bool) -> Option<(FeedQuery, u64)> {
        if self.refresh_in_flight {
            return None;
        }
        let (offset, generation) = self.controller.begin(append)?;
        if !append {
            self.loading = true;
            self.empty_state = false;
        }
        let query = FeedQuery::compose(
            &self.filters,
            self.selected_sources.iter().cloned(),
            offset,
        );
        Some((query, generation))
    }

    /// Apply a finished page load.
    ///
    /// Runs the unconditional cleanup (in-flight flag, placeholder) first,
    /// then applies the result only when the generation is still current:
    /// replace on non-append, extend on append, empty-state on a zero-result
    /// replace. A failure reports to the status line and leaves whatever was
    /// rendered before untouched.
    pub fn on_page_loaded(
        &mut self,
        generation: u64,
        append: bool,
        result: Result<Vec<Article>, String>,
    ) {
        self.loading = false;

        match result {
            Ok(page) => {
                if !self.controller.finish_success(generation, append, page.len()) {
                    tracing::debug!(generation, "Dropping stale feed page");
                    return;
                }
                if append {
                    self.articles.extend(page);
                } else {
                    self.empty_state = page.is_empty();
                    self.articles = page;
                    self.article_cursor = 0;
                }
                self.clamp_cursors();
                self.set_status(format!("{} loaded", self.articles.len()));
            }
            Err(e) => {
                if !self.controller.finish_failure(generation) {
                    tracing::debug!(generation, error = %e, "Dropping stale feed error");
                    return;
                }
                tracing::warn!(error = %e, "Feed load failed");
                self.set_error("Feed unavailable — showing last results");
            }
        }
    }

    /// Install the startup source list, or log the failure and leave the
    /// selector unpopulated. No user-facing recovery either way.
    pub fn on_sources_loaded(&mut self, result: Result<Vec<Source>, String>) {
        match result {
            Ok(sources) => {
                tracing::info!(count = sources.len(), "Sources loaded");
                self.install_sources(sources);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load source list");
            }
        }
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Start a server-side refresh: persist current settings first, then
    /// hand the spawned task the selected keys and per-source limit.
    /// `None` when something is already in flight.
    pub fn begin_refresh(&mut self) -> Option<(Vec<String>, u32)> {
        if self.busy() {
            return None;
        }
        self.persist_filters();
        self.refresh_in_flight = true;
        self.set_status("Refreshing sources...");

        let mut keys: Vec<String> = self.selected_sources.iter().cloned().collect();
        keys.sort();
        Some((keys, self.ingest_limit))
    }

    /// Record the refresh outcome and reset pagination. The caller reloads
    /// the feed afterwards whether the refresh worked or not — a failed
    /// refresh degrades to "show whatever the feed currently has".
    pub fn on_refresh_finished(&mut self, result: Result<(), String>) {
        self.refresh_in_flight = false;
        match result {
            Ok(()) => self.set_status("Sources refreshed"),
            Err(e) => {
                tracing::warn!(error = %e, "Refresh failed");
                self.set_error("Refresh failed — reloading existing feed");
            }
        }
        self.controller.invalidate();
    }

    // ========================================================================
    // Status line
    // ========================================================================

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status = Some(StatusLine {
            text: msg.into(),
            is_error: false,
            posted_at: Instant::now(),
        });
    }

    pub fn set_error(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status = Some(StatusLine {
            text: msg.into(),
            is_error: true,
            posted_at: Instant::now(),
        });
    }

    /// Clear an expired status message. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some(status) = &self.status {
            if status.posted_at.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status = None;
                return true;
            }
        }
        false
    }

    /// Header line: active filters in words, plus the loaded count.
    pub fn header_line(&self) -> String {
        let summary = describe_filters(
            &self.filters,
            self.selected_count(),
            self.sources.len(),
        );
        if self.loading {
            format!("{} · loading...", summary)
        } else {
            format!("{} · {} loaded", summary, self.articles.len())
        }
    }

    // ========================================================================
    // Cursor movement and article actions
    // ========================================================================

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.article_cursor)
    }

    /// Move the cursor of the focused pane, clamped to its list.
    pub fn move_cursor(&mut self, delta: i64) {
        let (cursor, len) = match self.focus {
            Focus::Sources => (&mut self.source_cursor, self.sources.len()),
            Focus::Articles => (&mut self.article_cursor, self.articles.len()),
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        let new = (*cursor as i64 + delta).clamp(0, len as i64 - 1);
        *cursor = new as usize;
    }

    fn clamp_cursors(&mut self) {
        if self.article_cursor >= self.articles.len() {
            self.article_cursor = self.articles.len().saturating_sub(1);
        }
        if self.source_cursor >= self.sources.len() {
            self.source_cursor = self.sources.len().saturating_sub(1);
        }
    }

    /// Open the selected article in the system browser.
    pub fn open_selected(&mut self) {
        let Some(article) = self.selected_article() else {
            return;
        };
        let url = article.url.clone();
        match open::that(&url) {
            Ok(()) => self.set_status("Opened in browser"),
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Failed to open browser");
                self.set_error("Could not open browser");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn source(key: &str, enabled: bool) -> Source {
        Source {
            key: key.to_string(),
            title: key.to_uppercase(),
            enabled,
        }
    }

    fn article(id: i64, title: &str) -> Article {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "url": format!("https://example.com/{}", id),
            "source_key": "habr_dev",
            "source_title": "Habr"
        }))
        .unwrap()
    }

    fn test_app(tag: &str) -> App {
        let dir = std::env::temp_dir().join(format!("newsbrief_app_test_{}", tag));
        let _ = std::fs::remove_dir_all(&dir);
        let api = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        App::new(
            api,
            SettingsStore::new(dir),
            FilterSettings::default(),
            ThemeVariant::Dark,
        )
    }

    // ------------------------------------------------------------------
    // Source selection
    // ------------------------------------------------------------------

    #[test]
    fn test_no_saved_settings_selects_enabled_sources() {
        let mut app = test_app("default_selection");
        app.install_sources(vec![source("a", true), source("b", false)]);

        assert!(app.selected_sources.contains("a"));
        assert!(!app.selected_sources.contains("b"));
        assert_eq!(app.selected_count(), 1);
    }

    #[test]
    fn test_saved_selection_wins_over_enabled_flags() {
        let mut app = test_app("saved_selection");
        app.filters.sources = Some(vec!["b".to_string()]);
        app.install_sources(vec![source("a", true), source("b", false)]);

        assert_eq!(app.selected_count(), 1);
        assert!(app.selected_sources.contains("b"));
    }

    #[test]
    fn test_saved_keys_unknown_to_server_dropped() {
        let mut app = test_app("stale_keys");
        app.filters.sources = Some(vec!["gone".to_string(), "a".to_string()]);
        app.install_sources(vec![source("a", true)]);

        assert_eq!(app.selected_count(), 1);
        assert!(app.selected_sources.contains("a"));
    }

    #[test]
    fn test_toggle_flips_only_that_source() {
        let mut app = test_app("toggle");
        app.install_sources(vec![source("a", true), source("b", true)]);
        assert_eq!(app.selected_count(), 2);

        app.toggle_source("a");
        assert_eq!(app.selected_count(), 1);
        assert!(app.selected_sources.contains("b"));

        app.toggle_source("a");
        assert_eq!(app.selected_count(), 2);
    }

    #[test]
    fn test_toggle_persists_selection() {
        let mut app = test_app("toggle_persist");
        app.install_sources(vec![source("a", true), source("b", true)]);
        app.toggle_source("a");

        let saved = app.store.load_filters();
        assert_eq!(saved.sources, Some(vec!["b".to_string()]));
    }

    #[test]
    fn test_toggle_all_flips_between_full_and_empty() {
        let mut app = test_app("toggle_all");
        app.install_sources(vec![source("a", true), source("b", false)]);
        assert_eq!(app.selected_count(), 1);

        // Not everything selected: select all.
        app.toggle_all_sources();
        assert_eq!(app.selected_count(), 2);

        // Everything selected: clear.
        app.toggle_all_sources();
        assert_eq!(app.selected_count(), 0);
    }

    #[test]
    fn test_selection_change_resets_pagination() {
        let mut app = test_app("toggle_resets");
        app.install_sources(vec![source("a", true)]);

        let (_, generation) = app.begin_load(false).unwrap();
        app.on_page_loaded(generation, false, Ok((0..50).map(|i| article(i, "t")).collect()));
        let (_, generation) = app.begin_load(true).unwrap();
        app.on_page_loaded(generation, true, Ok((50..100).map(|i| article(i, "t")).collect()));
        assert_eq!(app.controller.offset(), 50);

        app.toggle_source("a");
        assert_eq!(app.controller.offset(), 0);
    }

    // ------------------------------------------------------------------
    // Feed loading
    // ------------------------------------------------------------------

    #[test]
    fn test_begin_load_is_reentrancy_guarded() {
        let mut app = test_app("guard");
        assert!(app.begin_load(false).is_some());
        // Second trigger while the first is pending: no-op.
        assert!(app.begin_load(false).is_none());
        assert!(app.begin_load(true).is_none());
    }

    #[test]
    fn test_non_append_shows_placeholder_and_keeps_old_list() {
        let mut app = test_app("placeholder");
        let (_, generation) = app.begin_load(false).unwrap();
        app.on_page_loaded(generation, false, Ok(vec![article(1, "old")]));

        let (_, generation) = app.begin_load(false).unwrap();
        assert!(app.loading);
        // The old list is retained until the new page lands.
        assert_eq!(app.articles.len(), 1);

        app.on_page_loaded(generation, false, Err("connection refused".to_string()));
        assert!(!app.loading);
        assert_eq!(app.articles.len(), 1);
        assert_eq!(app.articles[0].title, "old");
        assert!(app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_zero_results_enter_empty_state() {
        let mut app = test_app("empty");
        let (_, generation) = app.begin_load(false).unwrap();
        app.on_page_loaded(generation, false, Ok(vec![]));

        assert!(app.empty_state);
        assert!(app.articles.is_empty());
    }

    #[test]
    fn test_append_extends_without_clearing() {
        let mut app = test_app("append");
        let (_, generation) = app.begin_load(false).unwrap();
        app.on_page_loaded(generation, false, Ok((0..50).map(|i| article(i, "t")).collect()));

        let (query, generation) = app.begin_load(true).unwrap();
        assert_eq!(query.offset, 50);
        app.on_page_loaded(generation, true, Ok(vec![article(100, "more")]));

        assert_eq!(app.articles.len(), 51);
        assert_eq!(app.articles[50].title, "more");
    }

    #[test]
    fn test_stale_page_not_rendered() {
        let mut app = test_app("stale");
        let (_, generation) = app.begin_load(false).unwrap();

        // Filters change mid-flight: the pending page is superseded.
        app.set_keyword("rust");

        app.on_page_loaded(generation, false, Ok(vec![article(1, "stale")]));
        assert!(app.articles.is_empty());
        // The guard released, so a fresh load can start.
        assert!(app.begin_load(false).is_some());
    }

    #[test]
    fn test_reset_filters_matches_contract() {
        let mut app = test_app("reset");
        app.install_sources(vec![source("a", true), source("b", true)]);
        app.toggle_source("b");
        app.set_keyword("rust");
        app.filters.period = Period::Custom;
        app.filters.from_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        app.filters.to_date = NaiveDate::from_ymd_opt(2024, 1, 31);

        app.reset_filters();

        // Keyword cleared, period forced to 24h, bounds dropped, sources
        // unchanged, offset back to 0.
        let query = FeedQuery::compose(
            &app.filters,
            app.selected_sources.iter().cloned(),
            app.controller.offset(),
        );
        assert_eq!(query.keyword, "");
        assert!(query.today_only);
        assert_eq!(query.from_date, None);
        assert_eq!(query.to_date, None);
        assert_eq!(query.sources, vec!["a".to_string()]);
        assert_eq!(query.offset, 0);

        // And the cleared settings were persisted.
        let saved = app.store.load_filters();
        assert_eq!(saved.keyword, "");
        assert_eq!(saved.period, Period::Today);
        assert_eq!(saved.sources, Some(vec!["a".to_string()]));
    }

    // ------------------------------------------------------------------
    // Refresh
    // ------------------------------------------------------------------

    #[test]
    fn test_refresh_persists_settings_and_blocks_loads() {
        let mut app = test_app("refresh");
        app.install_sources(vec![source("a", true), source("b", true)]);
        app.set_keyword("ai");

        let (keys, limit) = app.begin_refresh().unwrap();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(limit, DEFAULT_INGEST_LIMIT);
        assert_eq!(app.store.load_filters().keyword, "ai");

        // Everything else is a no-op while the refresh runs.
        assert!(app.begin_load(false).is_none());
        assert!(app.begin_refresh().is_none());
    }

    #[test]
    fn test_refresh_failure_still_resets_offset() {
        let mut app = test_app("refresh_fail");
        let (_, generation) = app.begin_load(false).unwrap();
        app.on_page_loaded(generation, false, Ok((0..50).map(|i| article(i, "t")).collect()));
        let (_, generation) = app.begin_load(true).unwrap();
        app.on_page_loaded(generation, true, Ok((0..50).map(|i| article(i, "t")).collect()));
        assert_eq!(app.controller.offset(), 50);

        app.begin_refresh().unwrap();
        app.on_refresh_finished(Err("status 500".to_string()));

        assert!(!app.refresh_in_flight);
        assert_eq!(app.controller.offset(), 0);
        assert!(app.status.as_ref().unwrap().is_error);
        // Articles remain until the follow-up reload replaces them.
        assert_eq!(app.articles.len(), 100);
    }

    // ------------------------------------------------------------------
    // Misc
    // ------------------------------------------------------------------

    #[test]
    fn test_source_failure_leaves_selector_unpopulated() {
        let mut app = test_app("sources_fail");
        app.on_sources_loaded(Err("boom".to_string()));
        assert!(app.sources.is_empty());
        // Not a status-line event, just a log entry.
        assert!(app.status.is_none());
    }

    #[test]
    fn test_header_line_includes_count() {
        let mut app = test_app("header");
        app.install_sources(vec![source("a", true), source("b", true)]);
        let (_, generation) = app.begin_load(false).unwrap();
        app.on_page_loaded(generation, false, Ok(vec![article(1, "t")]));

        let header = app.header_line();
        assert!(header.contains("today"));
        assert!(header.contains("all sources"));
        assert!(header.contains("1 loaded"));
    }

    #[test]
    fn test_cycle_theme_persists_variant() {
        let mut app = test_app("theme");
        assert_eq!(app.cycle_theme(), "light");
        assert_eq!(app.store.load_theme().variant, "light");
        assert_eq!(app.cycle_theme(), "dark");
        assert_eq!(app.store.load_theme().variant, "dark");
    }

    #[test]
    fn test_cursor_clamped_to_list() {
        let mut app = test_app("cursor");
        app.focus = Focus::Articles;
        app.move_cursor(1);
        assert_eq!(app.article_cursor, 0); // empty list

        let (_, generation) = app.begin_load(false).unwrap();
        app.on_page_loaded(generation, false, Ok(vec![article(1, "a"), article(2, "b")]));
        app.move_cursor(10);
        assert_eq!(app.article_cursor, 1);
        app.move_cursor(-10);
        assert_eq!(app.article_cursor, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_expires() {
        let mut app = test_app("status_expiry");
        app.set_status("hello");
        assert!(!app.clear_expired_status());

        tokio::time::advance(Duration::from_secs(STATUS_TTL_SECS + 1)).await;
        assert!(app.clear_expired_status());
        assert!(app.status.is_none());
    }
}
