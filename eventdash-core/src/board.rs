//! List-level state for the dashboard: the fetched events plus the loading
//! flag and the single inline message shown above the buckets.

use chrono::{DateTime, TimeZone};

use crate::categorize::{CategorizedEvents, CategoryCache};
use crate::client::{EventSource, Fetched, NOT_AVAILABLE_MESSAGE};
use crate::credential::Credential;
use crate::error::{EventError, LIST_FALLBACK_MESSAGE};
use crate::event::EventListItem;

#[derive(Debug, Default)]
pub struct EventBoard {
    events: Vec<EventListItem>,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    /// Bumped whenever `events` is replaced.
    generation: u64,
    cache: CategoryCache,
}

impl EventBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EventListItem] {
        &self.events
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Hard failure message, if the last load failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Informational message for the soft empty state.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fetch the event list and replace the board's contents.
    ///
    /// Errors never escape: they end up in [`EventBoard::error`]. Without a
    /// credential no request is made.
    pub async fn load<S: EventSource>(&mut self, source: &S, credential: Option<&Credential>) {
        self.loading = true;
        self.error = None;
        self.notice = None;

        let result = match credential {
            Some(credential) => source.fetch_events(Some(credential)).await,
            None => Err(EventError::Unauthenticated),
        };

        match result {
            Ok(Fetched::Found(events)) => {
                tracing::info!(count = events.len(), "loaded events");
                self.replace(events);
            }
            Ok(Fetched::NotAvailable) => {
                tracing::info!("no events available yet");
                self.replace(Vec::new());
                self.notice = Some(NOT_AVAILABLE_MESSAGE.to_string());
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load events");
                self.error = Some(e.display_message(LIST_FALLBACK_MESSAGE));
            }
        }

        self.loading = false;
    }

    fn replace(&mut self, events: Vec<EventListItem>) {
        self.events = events;
        self.generation += 1;
    }

    /// Buckets for the day `reference` falls on, recomputed only when the
    /// list or the day changed.
    pub fn categorized<Tz: TimeZone>(&mut self, reference: &DateTime<Tz>) -> &CategorizedEvents {
        self.cache
            .get_or_compute(self.generation, &self.events, reference)
    }
}
