// SPDX-License-Identifier: MPL-2.0
//! AirLens is a small desktop client for an air quality backend. It shows
//! the latest hourly measurement summary as a filterable key/value list,
//! reloads it on a timer, and can ask the backend to ingest a fresh dataset
//! on demand.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod summary;

pub use error::{Error, Result};
