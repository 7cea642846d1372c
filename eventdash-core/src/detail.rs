//! State for the event detail view.
//!
//! Selecting an event starts a detail fetch; the view is open while the
//! fetch runs and afterwards shows either the event or a message. Every
//! fetch is stamped with a sequence number so that a response for an
//! older selection, or one arriving after the view was closed, is dropped
//! instead of overwriting newer state.

use crate::client::{EventSource, Fetched, NOT_AVAILABLE_MESSAGE};
use crate::credential::Credential;
use crate::error::{DETAIL_FALLBACK_MESSAGE, EventResult};
use crate::event::EventDetail;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Closed,
    Loading {
        event_id: i64,
    },
    Loaded(EventDetail),
    Failed(String),
}

/// Proof of a started detail fetch. Only the newest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct DetailTicket {
    seq: u64,
    event_id: i64,
}

impl DetailTicket {
    pub fn event_id(&self) -> i64 {
        self.event_id
    }
}

#[derive(Debug, Default)]
pub struct DetailModal {
    state: DetailState,
    seq: u64,
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, DetailState::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading { .. })
    }

    pub fn selected(&self) -> Option<&EventDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            DetailState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Open the view for `event_id` with a fetch in flight.
    ///
    /// Clears any previous selection or error and invalidates every
    /// earlier ticket.
    pub fn begin(&mut self, event_id: i64) -> DetailTicket {
        self.seq += 1;
        self.state = DetailState::Loading { event_id };
        DetailTicket {
            seq: self.seq,
            event_id,
        }
    }

    /// Apply the outcome of the fetch started by `ticket`.
    ///
    /// Returns false, leaving state untouched, when the ticket is stale.
    pub fn resolve(&mut self, ticket: DetailTicket, result: EventResult<Fetched<EventDetail>>) -> bool {
        if ticket.seq != self.seq || !self.is_loading() {
            tracing::debug!(
                event_id = ticket.event_id,
                "dropping stale detail response"
            );
            return false;
        }

        self.state = match result {
            Ok(Fetched::Found(detail)) => DetailState::Loaded(detail),
            Ok(Fetched::NotAvailable) => DetailState::Failed(NOT_AVAILABLE_MESSAGE.to_string()),
            Err(e) => {
                tracing::error!(event_id = ticket.event_id, error = %e, "failed to load event detail");
                DetailState::Failed(e.display_message(DETAIL_FALLBACK_MESSAGE))
            }
        };
        true
    }

    /// Select `event_id` and fetch its detail.
    ///
    /// Without a credential nothing is fetched and the view stays closed.
    pub async fn open<S: EventSource>(
        &mut self,
        source: &S,
        credential: Option<&Credential>,
        event_id: i64,
    ) {
        let Some(credential) = credential else {
            tracing::debug!(event_id, "not opening detail without a credential");
            return;
        };

        let ticket = self.begin(event_id);
        let result = source.fetch_event_detail(Some(credential), event_id).await;
        let _ = self.resolve(ticket, result);
    }

    /// Close the view from any state. Pending fetches become stale.
    pub fn close(&mut self) {
        self.seq += 1;
        self.state = DetailState::Closed;
    }
}
