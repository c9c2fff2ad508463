//! REST client for the NewsBrief server API.
//!
//! Three endpoints, all owned by the server:
//!
//! - `GET /api/sources` — the configured content sources
//! - `GET /api/articles` — the filtered, paginated feed
//! - `POST /api/refresh` — ask the server to ingest fresh items
//!
//! [`client::ApiClient`] is cheap to clone (it wraps a pooled
//! `reqwest::Client`), so spawned tasks take their own copy.

mod client;
mod types;

pub use client::{ApiClient, ApiError};
pub use types::{Article, RefreshRequest, Source};
