//! Feed controller: filter state composition, pagination cursor, and the
//! single-request-in-flight discipline.
//!
//! The controller owns nothing about the network or the UI. It hands out
//! composed queries tagged with a generation number and decides afterwards
//! whether a response is still current. Exactly one request may be
//! outstanding; a second trigger while one is pending is a no-op — callers
//! re-trigger after completion if they still want fresh data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::settings::FilterSettings;

/// Fixed page size for the article feed, matching the server's default limit.
pub const PAGE_SIZE: usize = 50;

// ============================================================================
// Period
// ============================================================================

/// The time-window filter mode applied to article queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    /// Only items from the last day; date bounds are ignored.
    #[serde(rename = "24h")]
    Today,
    /// Explicit `from`/`to` bounds, either of which may be open.
    #[serde(rename = "custom")]
    Custom,
    /// No time window at all.
    #[serde(rename = "all")]
    All,
}

impl Period {
    /// Cycle through the three modes, in the order the radio group shows them.
    pub fn next(self) -> Self {
        match self {
            Self::Today => Self::Custom,
            Self::Custom => Self::All,
            Self::All => Self::Today,
        }
    }

    /// Short label for the period selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "24h",
            Self::Custom => "custom",
            Self::All => "all",
        }
    }
}

// ============================================================================
// FeedQuery
// ============================================================================

/// A fully composed article query. Derived per fetch from the current
/// settings, source selection, and pagination cursor; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub sources: Vec<String>,
    pub keyword: String,
    pub today_only: bool,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub limit: usize,
    pub offset: usize,
}

impl FeedQuery {
    /// Compose a query from the filter settings and the selected source keys.
    ///
    /// - `Today` forces `today_only=true` and drops both date bounds no
    ///   matter what the date fields contain.
    /// - `Custom` includes each bound only when it is set.
    /// - `All` is `Custom` with both bounds open.
    pub fn compose(
        settings: &FilterSettings,
        selected: impl IntoIterator<Item = String>,
        offset: usize,
    ) -> Self {
        let mut sources: Vec<String> = selected.into_iter().collect();
        sources.sort();

        let (today_only, from_date, to_date) = match settings.period {
            Period::Today => (true, None, None),
            Period::Custom => (false, settings.from_date, settings.to_date),
            Period::All => (false, None, None),
        };

        Self {
            sources,
            keyword: settings.keyword.trim().to_string(),
            today_only,
            from_date,
            to_date,
            limit: PAGE_SIZE,
            offset,
        }
    }

    /// Render the query as URL parameter pairs.
    ///
    /// `sources` is comma-joined and omitted entirely when the selection is
    /// empty (the server then defaults to all sources); `q` is omitted when
    /// the trimmed keyword is empty. `today_only`, `limit`, and `offset` are
    /// always present.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        if !self.sources.is_empty() {
            pairs.push(("sources", self.sources.join(",")));
        }
        if !self.keyword.is_empty() {
            pairs.push(("q", self.keyword.clone()));
        }
        pairs.push(("today_only", self.today_only.to_string()));
        if let Some(from) = self.from_date {
            pairs.push(("from_date", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to_date {
            pairs.push(("to_date", to.format("%Y-%m-%d").to_string()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }
}

// ============================================================================
// FeedController
// ============================================================================

/// Pagination cursor plus the reentrancy guard and generation token.
///
/// Invariants:
/// - `offset` is a non-negative multiple of [`PAGE_SIZE`], reset to 0 by
///   [`invalidate`](Self::invalidate) and advanced only when an append page
///   lands successfully.
/// - At most one request is in flight; [`begin`](Self::begin) refuses a
///   second one.
/// - A response is applied only when its generation still matches — anything
///   superseded by a filter change is dropped on arrival.
#[derive(Debug)]
pub struct FeedController {
    offset: usize,
    in_flight: bool,
    generation: u64,
    last_page_len: Option<usize>,
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedController {
    pub fn new() -> Self {
        Self {
            offset: 0,
            in_flight: false,
            generation: 0,
            last_page_len: None,
        }
    }

    /// Start a load if none is pending.
    ///
    /// Returns the offset the request should fetch at and the generation to
    /// hand back to [`finish_success`](Self::finish_success) /
    /// [`finish_failure`](Self::finish_failure), or `None` while a prior
    /// request is still in flight (the caller no-ops).
    ///
    /// An append load fetches one page past the current cursor; the cursor
    /// itself only advances when that page lands.
    pub fn begin(&mut self, append: bool) -> Option<(usize, u64)> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        let offset = if append {
            self.offset + PAGE_SIZE
        } else {
            self.offset
        };
        Some((offset, self.generation))
    }

    /// Record a successful page. Returns `false` when the response was stale
    /// (its generation no longer matches) and must not be rendered.
    ///
    /// The in-flight flag clears unconditionally — the cleanup step runs
    /// whether or not the result is applied.
    pub fn finish_success(&mut self, generation: u64, append: bool, page_len: usize) -> bool {
        self.in_flight = false;
        if generation != self.generation {
            return false;
        }
        self.last_page_len = Some(page_len);
        if append {
            self.offset += PAGE_SIZE;
        }
        true
    }

    /// Record a failed request. Returns `false` when the failure belongs to a
    /// superseded request and should not even be reported.
    pub fn finish_failure(&mut self, generation: u64) -> bool {
        self.in_flight = false;
        generation == self.generation
    }

    /// Filters or sources changed: reset the cursor and supersede whatever is
    /// in flight. The stale response is dropped when it arrives; it is never
    /// aborted mid-request.
    pub fn invalidate(&mut self) {
        self.offset = 0;
        self.last_page_len = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// "Load more" is available iff the most recent page came back full. A
    /// short page signals end-of-data; before any page has loaded there is
    /// nothing to extend.
    pub fn can_load_more(&self) -> bool {
        matches!(self.last_page_len, Some(n) if n >= PAGE_SIZE)
    }
}

// ============================================================================
// Filter summary
// ============================================================================

/// Human-readable one-line summary of the active filters.
///
/// Shown in the header: keyword phrase, period phrase, and source-count
/// phrase. The result count is appended by the caller once a page has loaded.
pub fn describe_filters(settings: &FilterSettings, selected: usize, total: usize) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);

    let keyword = settings.keyword.trim();
    if !keyword.is_empty() {
        parts.push(format!("\"{}\"", keyword));
    }

    let period = match settings.period {
        Period::Today => "today".to_string(),
        Period::All => "all time".to_string(),
        Period::Custom => match (settings.from_date, settings.to_date) {
            (Some(from), Some(to)) => format!("{} to {}", from, to),
            (Some(from), None) => format!("from {}", from),
            (None, Some(to)) => format!("until {}", to),
            (None, None) => "all time".to_string(),
        },
    };
    parts.push(period);

    if total > 0 && selected == total {
        parts.push("all sources".to_string());
    } else if total > 0 {
        parts.push(format!("{}/{} sources", selected, total));
    } else {
        parts.push("sources unavailable".to_string());
    }

    parts.join(" · ")
}

// ============================================================================
// Tests
// ============================================================================
