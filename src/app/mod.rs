// SPDX-License-Identifier: MPL-2.0
//! Sync controller for the measurement dashboard.
//!
//! `App` owns all mutable client state (query, result set, loading flag,
//! error line) and funnels the load triggers (start, poll tick, query edit,
//! user actions) into a single request/response pipeline. Every issued load
//! carries a monotonically increasing token; a response whose token is not
//! the latest issued belongs to a superseded request and is dropped, so the
//! view always reflects the most recently requested query.

mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::api::ApiClient;
use crate::config;
use crate::summary::Row;
use iced::{Element, Subscription, Task};
use std::path::Path;
use std::time::Duration;

pub struct App {
    api: ApiClient,
    query: String,
    rows: Vec<Row>,
    fetched_at: String,
    loading: bool,
    error: String,
    /// Token of the most recently issued load.
    latest_token: u64,
    /// Bumped on every query change so the poll timer is re-armed.
    poll_generation: u64,
    poll_interval: Duration,
    shutting_down: bool,
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes controller state from config/flags and kicks off the
    /// initial load of the (empty) query.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = match flags.config_path.as_deref() {
            Some(path) => config::load_from_path(Path::new(path)),
            None => config::load(),
        }
        .unwrap_or_else(|err| {
            tracing::warn!("failed to load settings: {}", err);
            config::Config::default()
        });

        let base_url = config::resolve_base_url(flags.base_url, &config);
        let poll_interval = Duration::from_secs(config.refresh_interval_secs().max(1));
        tracing::info!(%base_url, ?poll_interval, "starting");

        let mut app = App {
            api: ApiClient::new(base_url),
            query: String::new(),
            rows: Vec::new(),
            fetched_at: String::new(),
            loading: false,
            error: String::new(),
            latest_token: 0,
            poll_generation: 0,
            poll_interval,
            shutting_down: false,
        };
        let task = app.load();
        (app, task)
    }

    fn title(&self) -> String {
        "AirLens".to_string()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.shutting_down {
            return Subscription::none();
        }

        let close = iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Window(iced::window::Event::CloseRequested) => {
                Some(Message::CloseRequested)
            }
            _ => None,
        });

        Subscription::batch([
            subscription::poll(self.poll_generation, self.poll_interval),
            close,
        ])
    }

    /// Updates the filter immediately. Never issues a network call by
    /// itself; the query-change trigger in `update` follows up with a load.
    fn set_query(&mut self, query: String) {
        if query != self.query {
            self.query = query;
            // Re-arm the poll timer so the next tick is a full interval away.
            self.poll_generation += 1;
        }
    }

    /// Issues exactly one summary request for the current query and marks it
    /// as the latest. Loading stays true until the latest request resolves.
    fn load(&mut self) -> Task<Message> {
        self.loading = true;
        self.error.clear();
        self.latest_token += 1;
        let token = self.latest_token;
        let api = self.api.clone();
        let query = self.query.clone();
        Task::perform(
            async move { api.fetch_summary(&query).await },
            move |result| Message::SummaryLoaded { token, result },
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(query) => {
                self.set_query(query);
                self.load()
            }
            Message::SearchPressed => self.load(),
            Message::Tick(_instant) => self.load(),
            Message::RefreshPressed => {
                self.error.clear();
                let api = self.api.clone();
                Task::perform(
                    async move { api.trigger_ingest().await },
                    Message::IngestCompleted,
                )
            }
            Message::IngestCompleted(Ok(())) => self.load(),
            Message::IngestCompleted(Err(err)) => {
                // The ingest path never touches the loading flag; only
                // `load` owns it.
                self.error = err.to_string();
                Task::none()
            }
            Message::SummaryLoaded { token, result } => {
                if token != self.latest_token {
                    tracing::debug!(
                        token,
                        latest = self.latest_token,
                        "dropping stale summary response"
                    );
                    return Task::none();
                }
                self.loading = false;
                match result {
                    Ok(Some(summary)) => {
                        self.rows = summary.items;
                        self.fetched_at = summary.fetched_at;
                    }
                    Ok(None) => {
                        // 204: no dataset right now; keep whatever we had.
                    }
                    Err(err) => {
                        self.error = err.to_string();
                    }
                }
                Task::none()
            }
            Message::CloseRequested => {
                self.shutting_down = true;
                iced::exit()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn fetched_at(&self) -> &str {
        &self.fetched_at
    }

    pub fn error_message(&self) -> &str {
        &self.error
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::summary::{RowValue, Summary};
    use std::time::Instant;

    fn test_app() -> App {
        App {
            api: ApiClient::new(config::DEFAULT_BASE_URL),
            query: String::new(),
            rows: Vec::new(),
            fetched_at: String::new(),
            loading: false,
            error: String::new(),
            latest_token: 0,
            poll_generation: 0,
            poll_interval: Duration::from_secs(60),
            shutting_down: false,
        }
    }

    fn sample_summary() -> Summary {
        Summary {
            items: vec![Row {
                key: "PM10".to_string(),
                value: RowValue::Number(34.0),
                unit: Some("µg/m³".to_string()),
            }],
            fetched_at: "2024-01-01T10:00:00Z".to_string(),
        }
    }

    /// Runs a full load cycle: issue the request, then deliver `result` for
    /// the token it was issued under.
    fn complete_load(app: &mut App, result: Result<Option<Summary>, Error>) {
        let _ = app.update(Message::SearchPressed);
        let token = app.latest_token;
        let _ = app.update(Message::SummaryLoaded { token, result });
    }

    #[test]
    fn load_sets_loading_and_clears_error() {
        let mut app = test_app();
        app.error = "stale error".to_string();

        let _ = app.update(Message::SearchPressed);

        assert!(app.loading);
        assert!(app.error.is_empty());
        assert_eq!(app.latest_token, 1);
    }

    #[test]
    fn successful_load_replaces_rows_and_ends_loading() {
        let mut app = test_app();

        complete_load(&mut app, Ok(Some(sample_summary())));

        assert!(!app.loading);
        assert!(app.error.is_empty());
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].key, "PM10");
        assert_eq!(app.rows[0].value, RowValue::Number(34.0));
        assert_eq!(app.rows[0].unit.as_deref(), Some("µg/m³"));
        assert_eq!(app.fetched_at, "2024-01-01T10:00:00Z");
    }

    #[test]
    fn failed_load_keeps_rows_and_sets_error() {
        let mut app = test_app();
        complete_load(&mut app, Ok(Some(sample_summary())));
        let rows_before = app.rows.clone();

        complete_load(&mut app, Err(Error::Api("db unavailable".to_string())));

        assert!(!app.loading);
        assert_eq!(app.error, "db unavailable");
        assert_eq!(app.rows, rows_before);
    }

    #[test]
    fn repeating_a_load_yields_the_same_result_set() {
        let mut app = test_app();

        complete_load(&mut app, Ok(Some(sample_summary())));
        let first = app.rows.clone();
        complete_load(&mut app, Ok(Some(sample_summary())));

        assert_eq!(app.rows, first);
    }

    #[test]
    fn no_content_leaves_state_untouched() {
        let mut app = test_app();
        complete_load(&mut app, Ok(Some(sample_summary())));
        let rows_before = app.rows.clone();
        let fetched_before = app.fetched_at.clone();

        complete_load(&mut app, Ok(None));

        assert!(!app.loading);
        assert!(app.error.is_empty());
        assert_eq!(app.rows, rows_before);
        assert_eq!(app.fetched_at, fetched_before);
    }

    #[test]
    fn stale_response_is_ignored_entirely() {
        let mut app = test_app();
        let _ = app.update(Message::SearchPressed); // token 1
        let _ = app.update(Message::SearchPressed); // token 2, now latest

        let _ = app.update(Message::SummaryLoaded {
            token: 1,
            result: Err(Error::Api("old failure".to_string())),
        });

        // The stale response must not touch rows, error, or the loading
        // flag; only the latest request's resolution ends the load.
        assert!(app.loading);
        assert!(app.error.is_empty());

        let _ = app.update(Message::SummaryLoaded {
            token: 2,
            result: Ok(Some(sample_summary())),
        });
        assert!(!app.loading);
        assert_eq!(app.rows.len(), 1);
    }

    #[test]
    fn set_query_issues_no_network_call() {
        let mut app = test_app();

        app.set_query("pm10".to_string());

        assert_eq!(app.query, "pm10");
        assert_eq!(app.latest_token, 0);
        assert!(!app.loading);
    }

    #[test]
    fn query_change_rearms_poll_timer_and_loads() {
        let mut app = test_app();

        let _ = app.update(Message::QueryChanged("o3".to_string()));

        assert_eq!(app.query, "o3");
        assert_eq!(app.poll_generation, 1);
        assert_eq!(app.latest_token, 1);
        assert!(app.loading);
    }

    #[test]
    fn unchanged_query_does_not_rearm_timer() {
        let mut app = test_app();
        app.query = "o3".to_string();

        app.set_query("o3".to_string());

        assert_eq!(app.poll_generation, 0);
    }

    #[test]
    fn tick_reloads_current_query() {
        let mut app = test_app();
        let _ = app.update(Message::QueryChanged("no2".to_string()));
        let token_before = app.latest_token;

        let _ = app.update(Message::Tick(Instant::now()));

        assert_eq!(app.latest_token, token_before + 1);
        assert_eq!(app.query, "no2");
    }

    #[test]
    fn refresh_press_clears_error_without_loading_flag() {
        let mut app = test_app();
        app.error = "previous".to_string();

        let _ = app.update(Message::RefreshPressed);

        assert!(app.error.is_empty());
        assert!(!app.loading);
        assert_eq!(app.latest_token, 0);
    }

    #[test]
    fn failed_ingest_sets_error_and_skips_load() {
        let mut app = test_app();
        let _ = app.update(Message::RefreshPressed);

        let _ = app.update(Message::IngestCompleted(Err(Error::Api(
            "ingest already running".to_string(),
        ))));

        assert_eq!(app.error, "ingest already running");
        assert!(!app.loading);
        assert_eq!(app.latest_token, 0);
    }

    #[test]
    fn successful_ingest_triggers_load() {
        let mut app = test_app();
        let _ = app.update(Message::RefreshPressed);

        let _ = app.update(Message::IngestCompleted(Ok(())));

        assert!(app.loading);
        assert_eq!(app.latest_token, 1);
    }

    #[test]
    fn close_request_stops_polling() {
        let mut app = test_app();

        let _ = app.update(Message::CloseRequested);

        assert!(app.shutting_down);
        // subscription() now yields Subscription::none(); no further ticks
        // can reach update, so no load happens after teardown.
    }
}
