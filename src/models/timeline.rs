//! Timeline notice data structure.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::de::{lenient_string, opt_lenient_string};

/// A notice posted on the placement timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineNotice {
    /// Notice identifier
    #[serde(default)]
    pub id: Option<u64>,

    /// Notice title
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    /// Notice body (HTML)
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    /// Creation timestamp as published
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,

    /// Comma-separated tags
    #[serde(default, deserialize_with = "opt_lenient_string")]
    pub tags: Option<String>,
}

impl TimelineNotice {
    /// Parse `created_at`, accepting RFC 3339 and the naive forms the
    /// exports use. Naive values are read as UTC.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Individual tags, trimmed, empty entries dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Lowercased title, description and tags joined for matching.
    pub fn search_blob(&self) -> String {
        let mut blob = String::with_capacity(
            self.title.len() + self.description.len() + self.tags.as_ref().map_or(0, String::len) + 2,
        );
        blob.push_str(&self.title);
        blob.push(' ');
        blob.push_str(&self.description);
        if let Some(tags) = &self.tags {
            blob.push(' ');
            blob.push_str(tags);
        }
        blob.to_lowercase()
    }
}

/// Sort notices most recent first.
///
/// Unparseable timestamps sort after parseable ones; ties fall back to the
/// raw string, descending.
pub fn sort_newest_first(notices: &mut [TimelineNotice]) {
    notices.sort_by_cached_key(|n| (Reverse(n.timestamp()), Reverse(n.created_at.clone())));
}
