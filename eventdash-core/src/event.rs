//! Event records as returned by the events API.
//!
//! These are plain data: fetched, displayed, and replaced wholesale on the
//! next fetch. Field names on the wire are camelCase.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Shown when an event has neither a venue nor a location.
pub const ONLINE_LOCATION: &str = "Online";

/// An event as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListItem {
    pub event_id: i64,
    pub title: String,
    pub start_time: StartTime,
    pub status: EventStatus,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub max_seats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventListItem {
    pub fn is_open(&self) -> bool {
        self.status == EventStatus::Open
    }

    /// Venue, then location, then "Online".
    pub fn display_location(&self) -> &str {
        [&self.venue_location, &self.location]
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
            .find(|s| !s.trim().is_empty())
            .unwrap_or(ONLINE_LOCATION)
    }
}

impl fmt::Display for EventListItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Full record for a single event.
///
/// Everything the list carries, plus whatever else the backend sends for
/// the detail view, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: EventListItem,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl fmt::Display for EventDetail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.event)
    }
}

/// Event status.
///
/// Only the exact string `"OPEN"` makes an event eligible for the dashboard
/// buckets. Values other than `OPEN`/`CLOSED` are kept as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    Open,
    Closed,
    Other(String),
}

impl From<String> for EventStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OPEN" => EventStatus::Open,
            "CLOSED" => EventStatus::Closed,
            _ => EventStatus::Other(s),
        }
    }
}

impl From<EventStatus> for String {
    fn from(status: EventStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Open => write!(f, "OPEN"),
            EventStatus::Closed => write!(f, "CLOSED"),
            EventStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// An event's start time as sent by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum StartTime {
    /// Timestamp with an explicit offset (RFC 3339)
    Instant(DateTime<Utc>),
    /// Wall-clock time with no offset, read in the active timezone.
    /// A bare date is midnight.
    Floating(NaiveDateTime),
    /// Anything else. Never falls on a day, so it is never bucketed.
    Unparsed(String),
}

const FLOATING_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

impl StartTime {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return StartTime::Instant(dt.with_timezone(&Utc));
        }

        for format in FLOATING_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return StartTime::Floating(dt);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return StartTime::Floating(date.and_time(NaiveTime::MIN));
        }

        StartTime::Unparsed(s.to_string())
    }

    /// Resolve to a zoned timestamp in `tz`.
    ///
    /// Floating times that fall into a DST gap move forward by an hour.
    pub fn in_zone<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        match self {
            StartTime::Instant(dt) => Some(dt.with_timezone(tz)),
            StartTime::Floating(naive) => tz
                .from_local_datetime(naive)
                .earliest()
                .or_else(|| tz.from_local_datetime(&(*naive + Duration::hours(1))).earliest()),
            StartTime::Unparsed(_) => None,
        }
    }

    /// Calendar day of this start time in `tz`.
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.in_zone(tz).map(|dt| dt.date_naive())
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartTime::Instant(dt) => write!(f, "{}", dt.to_rfc3339()),
            StartTime::Floating(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            StartTime::Unparsed(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for StartTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StartTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(StartTime::parse(&raw))
    }
}

/// `null` seat counts read as 0.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};
    use serde_json::json;

    fn item(json: serde_json::Value) -> EventListItem {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn decodes_camel_case_fields() {
        let event = item(json!({
            "eventId": 7,
            "title": "Rust meetup",
            "startTime": "2024-06-12T09:00:00",
            "status": "OPEN",
            "maxSeats": 40,
            "bannerUrl": "https://cdn.example.com/b.png",
            "venueLocation": "Hall A"
        }));

        assert_eq!(event.event_id, 7);
        assert_eq!(event.max_seats, 40);
        assert!(event.is_open());
        assert_eq!(event.banner_url.as_deref(), Some("https://cdn.example.com/b.png"));
        assert_eq!(event.display_location(), "Hall A");
    }

    #[test]
    fn status_is_case_sensitive() {
        assert_eq!(EventStatus::from("OPEN".to_string()), EventStatus::Open);
        assert_eq!(EventStatus::from("CLOSED".to_string()), EventStatus::Closed);
        assert_eq!(
            EventStatus::from("open".to_string()),
            EventStatus::Other("open".to_string())
        );
        assert_eq!(
            EventStatus::from("Upcoming".to_string()),
            EventStatus::Other("Upcoming".to_string())
        );
    }

    #[test]
    fn location_falls_back_to_online() {
        let mut event = item(json!({
            "eventId": 1, "title": "t", "startTime": "2024-06-12", "status": "OPEN"
        }));
        assert_eq!(event.display_location(), ONLINE_LOCATION);

        event.location = Some("Room 2".into());
        assert_eq!(event.display_location(), "Room 2");

        event.venue_location = Some("".into());
        assert_eq!(event.display_location(), "Room 2");
    }

    #[test]
    fn parses_start_time_variants() {
        assert!(matches!(
            StartTime::parse("2024-06-12T09:00:00Z"),
            StartTime::Instant(_)
        ));
        assert!(matches!(
            StartTime::parse("2024-06-12T09:00:00+07:00"),
            StartTime::Instant(_)
        ));
        assert!(matches!(
            StartTime::parse("2024-06-12T09:00"),
            StartTime::Floating(_)
        ));
        assert!(matches!(
            StartTime::parse("2024-06-12T09:00:00.123"),
            StartTime::Floating(_)
        ));
        assert_eq!(
            StartTime::parse("2024-06-14"),
            StartTime::Floating(
                NaiveDate::from_ymd_opt(2024, 6, 14)
                    .unwrap()
                    .and_time(NaiveTime::MIN)
            )
        );
        assert_eq!(
            StartTime::parse("next tuesday"),
            StartTime::Unparsed("next tuesday".to_string())
        );
    }

    #[test]
    fn instant_day_depends_on_zone() {
        let start = StartTime::parse("2024-06-12T20:00:00Z");
        let utc_day = start.day_in(&Utc).unwrap();
        let plus7 = FixedOffset::east_opt(7 * 3600).unwrap();
        let local_day = start.day_in(&plus7).unwrap();

        assert_eq!(utc_day, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        assert_eq!(local_day, NaiveDate::from_ymd_opt(2024, 6, 13).unwrap());
    }

    #[test]
    fn floating_time_keeps_wall_clock() {
        let start = StartTime::parse("2024-06-12T23:30");
        let plus7 = FixedOffset::east_opt(7 * 3600).unwrap();
        let zoned = start.in_zone(&plus7).unwrap();

        assert_eq!(zoned.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        assert_eq!(zoned.hour(), 23);
    }

    #[test]
    fn unparsed_start_has_no_day() {
        assert_eq!(StartTime::parse("garbage").day_in(&Utc), None);
    }

    #[test]
    fn null_max_seats_reads_as_zero() {
        let listed = item(json!({
            "eventId": 4,
            "title": "Open mic",
            "startTime": "2024-06-20T18:00:00Z",
            "status": "OPEN",
            "maxSeats": null
        }));
        assert_eq!(listed.max_seats, 0);

        let detail: EventDetail = serde_json::from_value(json!({
            "eventId": 4,
            "title": "Open mic",
            "startTime": "2024-06-20T18:00:00Z",
            "status": "OPEN",
            "maxSeats": null,
            "organizer": "Music Club"
        }))
        .unwrap();
        assert_eq!(detail.event.max_seats, 0);
        assert_eq!(detail.extra.get("organizer"), Some(&json!("Music Club")));
    }

    #[test]
    fn detail_keeps_extra_fields() {
        let detail: EventDetail = serde_json::from_value(json!({
            "eventId": 3,
            "title": "Workshop",
            "startTime": "2024-06-20T10:00:00Z",
            "status": "OPEN",
            "maxSeats": 12,
            "organizer": "CS Club",
            "registeredCount": 5
        }))
        .unwrap();

        assert_eq!(detail.event.event_id, 3);
        assert_eq!(detail.event.title, "Workshop");
        assert_eq!(detail.extra.get("organizer"), Some(&json!("CS Club")));
        assert_eq!(detail.extra.get("registeredCount"), Some(&json!(5)));
    }
}
