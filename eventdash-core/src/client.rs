//! HTTP client for the events API.
//!
//! Two read-only endpoints:
//! - `GET /api/events` for the dashboard list
//! - `GET /api/events/detail?id=<id>` for a single event
//!
//! Both share one status policy: 401 is a bad credential, 404 is the soft
//! "nothing to show yet" state, any other non-2xx is a plain HTTP error.
//! There are no retries and no caching.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::config::DashConfig;
use crate::credential::Credential;
use crate::error::{EventError, EventResult};
use crate::event::{EventDetail, EventListItem};

/// Informational message for a 404 from either endpoint.
pub const NOT_AVAILABLE_MESSAGE: &str =
    "This event has not started yet or has been closed. Please try again later.";

/// Result of a fetch that reached the server and was not rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Found(T),
    /// The server answered 404: nothing to show, not a failure.
    NotAvailable,
}

impl<T> Fetched<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Fetched::Found(value) => Some(value),
            Fetched::NotAvailable => None,
        }
    }
}

/// Where events come from.
///
/// Implemented by [`EventClient`] over HTTP; controllers are generic over it.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    async fn fetch_events(
        &self,
        credential: Option<&Credential>,
    ) -> EventResult<Fetched<Vec<EventListItem>>>;

    async fn fetch_event_detail(
        &self,
        credential: Option<&Credential>,
        event_id: i64,
    ) -> EventResult<Fetched<EventDetail>>;
}

/// HTTP client for the events API
#[derive(Debug, Clone)]
pub struct EventClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EventClient {
    pub fn new(base_url: &str, timeout: Duration) -> EventResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| EventError::Config(format!("Invalid API URL '{}': {}", base_url, e)))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EventError::Config(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &DashConfig) -> EventResult<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    fn endpoint(&self, path: &str) -> EventResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| EventError::Config(format!("Invalid endpoint '{}': {}", path, e)))
    }

    /// Issue an authenticated GET and apply the shared status policy.
    ///
    /// Returns the decoded JSON body on 2xx, `None` on 404.
    async fn get_json(&self, credential: Option<&Credential>, url: Url) -> EventResult<Option<Value>> {
        let credential = credential.ok_or(EventError::Unauthenticated)?;

        tracing::debug!(%url, "GET");
        let resp = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, credential.bearer())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        tracing::debug!(%url, status = status.as_u16(), "response");

        match status {
            s if s.is_success() => Ok(Some(resp.json::<Value>().await?)),
            StatusCode::UNAUTHORIZED => Err(EventError::InvalidCredential),
            StatusCode::NOT_FOUND => Ok(None),
            s => Err(EventError::HttpStatus(s.as_u16())),
        }
    }
}

impl EventSource for EventClient {
    /// GET /api/events
    async fn fetch_events(
        &self,
        credential: Option<&Credential>,
    ) -> EventResult<Fetched<Vec<EventListItem>>> {
        let url = self.endpoint("/api/events")?;

        match self.get_json(credential, url).await? {
            Some(body) => Ok(Fetched::Found(normalize_event_list(body))),
            None => Ok(Fetched::NotAvailable),
        }
    }

    /// GET /api/events/detail?id=<id>
    async fn fetch_event_detail(
        &self,
        credential: Option<&Credential>,
        event_id: i64,
    ) -> EventResult<Fetched<EventDetail>> {
        let mut url = self.endpoint("/api/events/detail")?;
        url.query_pairs_mut()
            .append_pair("id", &event_id.to_string());

        match self.get_json(credential, url).await? {
            Some(body) => {
                let detail = serde_json::from_value(body)
                    .map_err(|e| EventError::Decode(e.to_string()))?;
                Ok(Fetched::Found(detail))
            }
            None => Ok(Fetched::NotAvailable),
        }
    }
}

/// Flatten the list endpoint's body into one list.
///
/// The backend sends either a bare array or `{ openEvents, closedEvents }`.
/// Open events come first. Fields that are missing or not arrays count as
/// empty, and any other shape yields an empty list. Elements that do not
/// decode are skipped.
pub fn normalize_event_list(body: Value) -> Vec<EventListItem> {
    let raw = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let mut items = take_array(&mut map, "openEvents");
            items.extend(take_array(&mut map, "closedEvents"));
            items
        }
        _ => Vec::new(),
    };

    raw.into_iter()
        .filter_map(|item| match serde_json::from_value::<EventListItem>(item) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed event");
                None
            }
        })
        .collect()
}

fn take_array(map: &mut serde_json::Map<String, Value>, key: &str) -> Vec<Value> {
    match map.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}
