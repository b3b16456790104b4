// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::summary::Summary;
use std::time::Instant;

/// Messages consumed by `App::update`. Every load trigger funnels into the
/// same request pipeline; results come back as `SummaryLoaded`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The filter input changed (one message per edit).
    QueryChanged(String),
    /// Explicit reload of the current query (Search button or Enter).
    SearchPressed,
    /// Ask the backend to ingest a fresh dataset, then reload.
    RefreshPressed,
    /// Periodic poll tick.
    Tick(Instant),
    /// Result of a summary load. A response whose token is not the latest
    /// issued belongs to a superseded request and is dropped.
    SummaryLoaded {
        token: u64,
        result: Result<Option<Summary>, Error>,
    },
    /// Result of the ingest call.
    IngestCompleted(Result<(), Error>),
    /// The window is closing; stop polling and exit.
    CloseRequested,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Backend base URL override (`--base-url`).
    pub base_url: Option<String>,
    /// Optional path to a `settings.toml` used instead of the platform
    /// default (`--config`).
    pub config_path: Option<String>,
}
