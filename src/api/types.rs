//! Wire types for the server API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named upstream content feed the server can ingest from.
///
/// Immutable from the client's perspective; the "selected" flag the UI shows
/// is derived state kept in the app, not here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    pub key: String,
    pub title: String,
    pub enabled: bool,
}

/// An article row from `GET /api/articles`. Read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub source_key: String,
    pub source_title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime::deserialize")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    /// Server-side ranking annotation ("matches your query", etc.).
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body for `POST /api/refresh`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    /// Source keys to ingest. Empty means "server default" and is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    pub limit_per_source: u32,
}

/// Timestamp fields the server may emit with or without a UTC offset
/// (SQLite-backed rows frequently lose the offset). Naive values are read as
/// UTC; anything unparseable becomes `None` rather than failing the row.
mod lenient_datetime {
    use super::*;
    use serde::Deserializer;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }

    fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Some(naive.and_utc());
            }
        }
        tracing::debug!(value = %s, "Unparseable timestamp from server");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_deserializes() {
        let json = r#"{"key": "habr_dev", "title": "Habr", "enabled": true, "type": "rss", "url": "https://habr.com/rss"}"#;
        let source: Source = serde_json::from_str(json).unwrap();
        assert_eq!(source.key, "habr_dev");
        assert_eq!(source.title, "Habr");
        assert!(source.enabled);
    }

    #[test]
    fn test_article_minimal_fields() {
        let json = r#"{
            "id": 7,
            "title": "Hello",
            "url": "https://example.com/a",
            "source_key": "vc_all",
            "source_title": "VC.ru"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 7);
        assert_eq!(article.summary, None);
        assert_eq!(article.published_at, None);
    }

    #[test]
    fn test_article_rfc3339_timestamp() {
        let json = r#"{
            "id": 1, "title": "t", "url": "u", "source_key": "k", "source_title": "s",
            "published_at": "2024-03-01T08:30:00+00:00"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        let ts = article.published_at.unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T08:30:00+00:00");
    }

    #[test]
    fn test_article_naive_timestamp_read_as_utc() {
        let json = r#"{
            "id": 1, "title": "t", "url": "u", "source_key": "k", "source_title": "s",
            "published_at": "2024-03-01T08:30:00"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(
            article.published_at.unwrap().to_rfc3339(),
            "2024-03-01T08:30:00+00:00"
        );
    }

    #[test]
    fn test_article_garbage_timestamp_becomes_none() {
        let json = r#"{
            "id": 1, "title": "t", "url": "u", "source_key": "k", "source_title": "s",
            "published_at": "yesterday-ish", "created_at": null
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.published_at, None);
        assert_eq!(article.created_at, None);
    }

    #[test]
    fn test_refresh_request_omits_empty_sources() {
        let body = RefreshRequest {
            sources: None,
            limit_per_source: 20,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"limit_per_source":20}"#);

        let body = RefreshRequest {
            sources: Some(vec!["habr_dev".to_string()]),
            limit_per_source: 20,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"sources":["habr_dev"],"limit_per_source":20}"#);
    }
}
