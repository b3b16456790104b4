// SPDX-License-Identifier: MPL-2.0
//! Wire data model for the summary endpoint.
//!
//! The backend returns `{ items: [{key, value, unit?}], fetched_at }` where
//! `value` may be a JSON number or string depending on the measurement.
//! The whole payload is replaced on every successful load; nothing here is
//! ever merged or patched.

use chrono::{DateTime, Local};
use serde::Deserialize;
use std::fmt;

/// A single key/value measurement record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row {
    pub key: String,
    pub value: RowValue,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Measurement value as sent by the backend: either a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers render without a trailing ".0" (34, not 34.0).
            RowValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            RowValue::Number(n) => write!(f, "{}", n),
            RowValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The full result set for one query, replaced wholesale on every load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub items: Vec<Row>,
    #[serde(default)]
    pub fetched_at: String,
}

/// Renders an ISO-8601 `fetched_at` value as a local timestamp for display.
///
/// Returns `None` when the value is empty or not a valid RFC 3339 timestamp,
/// in which case the view omits the "Latest dataset" line.
pub fn format_fetched_at(fetched_at: &str) -> Option<String> {
    if fetched_at.is_empty() {
        return None;
    }
    let parsed = DateTime::parse_from_rfc3339(fetched_at).ok()?;
    let local = parsed.with_timezone(&Local);
    Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}
