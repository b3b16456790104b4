// SPDX-License-Identifier: MPL-2.0
//! Thin HTTP gateway to the measurement backend.
//!
//! Two logical operations are exposed: reading the current summary for a
//! query, and triggering a backend-side ingest of fresh data. All failures
//! are normalized into [`Error`] so the sync controller can surface a single
//! error string regardless of whether the transport, the server, or the
//! payload was at fault.

use crate::error::{Error, Result};
use crate::summary::Summary;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

/// Client for the summary/ingest HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// A trailing slash on the base URL is tolerated and stripped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// The configured backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the summary for `query`.
    ///
    /// Returns `Ok(None)` when the backend answers 204 No Content — callers
    /// must not assume a body is always present.
    pub async fn fetch_summary(&self, query: &str) -> Result<Option<Summary>> {
        let url = format!("{}/api/summary", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = normalize_failure(response).await;
            tracing::warn!(%status, query, "summary request failed: {}", err);
            return Err(err);
        }
        if status == StatusCode::NO_CONTENT {
            tracing::debug!(query, "summary returned no content");
            return Ok(None);
        }

        let summary = response.json::<Summary>().await?;
        tracing::debug!(query, items = summary.items.len(), "summary loaded");
        Ok(Some(summary))
    }

    /// Asks the backend to ingest a fresh dataset.
    ///
    /// Sends an empty body; a success body, if any, is ignored.
    pub async fn trigger_ingest(&self) -> Result<()> {
        let url = format!("{}/api/ingest", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = normalize_failure(response).await;
            tracing::warn!(%status, "ingest request failed: {}", err);
            return Err(err);
        }
        tracing::debug!("ingest triggered");
        Ok(())
    }
}

/// Turns a non-success response into an [`Error::Api`] whose message is the
/// response body text, or the status line when the body is empty.
async fn normalize_failure(response: reqwest::Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        Error::Api(format!("HTTP {}", status))
    } else {
        Error::Api(body.to_string())
    }
}
