//! Sorting events into today / this week / upcoming.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::date_range::WeekWindow;
use crate::event::EventListItem;

/// One of the three dashboard groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Today,
    ThisWeek,
    Upcoming,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Today, Bucket::ThisWeek, Bucket::Upcoming];

    /// First match wins, so today never lands in this week.
    pub fn for_day(day: NaiveDate, window: &WeekWindow) -> Option<Bucket> {
        if day < window.today {
            None
        } else if day == window.today {
            Some(Bucket::Today)
        } else if window.is_rest_of_week(day) {
            Some(Bucket::ThisWeek)
        } else {
            Some(Bucket::Upcoming)
        }
    }
}

/// Open events grouped by how soon they start, each group in start order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedEvents {
    pub today: Vec<EventListItem>,
    pub this_week: Vec<EventListItem>,
    pub upcoming: Vec<EventListItem>,
}

impl CategorizedEvents {
    pub fn bucket(&self, bucket: Bucket) -> &[EventListItem] {
        match bucket {
            Bucket::Today => &self.today,
            Bucket::ThisWeek => &self.this_week,
            Bucket::Upcoming => &self.upcoming,
        }
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.this_week.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `events` relative to the day `reference` falls on.
///
/// Only `OPEN` events starting today or later are kept. Days are computed in
/// the reference's timezone. Ties keep their input order.
pub fn categorize<Tz: TimeZone>(
    events: &[EventListItem],
    reference: &DateTime<Tz>,
) -> CategorizedEvents {
    let tz = reference.timezone();
    let window = WeekWindow::at(reference);

    let mut today = Vec::new();
    let mut this_week = Vec::new();
    let mut upcoming = Vec::new();

    for event in events {
        if !event.is_open() {
            continue;
        }

        let Some(start) = event.start_time.in_zone(&tz) else {
            continue;
        };

        let target = match Bucket::for_day(start.date_naive(), &window) {
            Some(Bucket::Today) => &mut today,
            Some(Bucket::ThisWeek) => &mut this_week,
            Some(Bucket::Upcoming) => &mut upcoming,
            None => continue,
        };
        target.push((start.with_timezone(&Utc), event.clone()));
    }

    CategorizedEvents {
        today: sorted(today),
        this_week: sorted(this_week),
        upcoming: sorted(upcoming),
    }
}

fn sorted(mut keyed: Vec<(DateTime<Utc>, EventListItem)>) -> Vec<EventListItem> {
    // sort_by is stable
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, event)| event).collect()
}

/// Memoized categorization keyed on (list generation, reference day).
#[derive(Debug, Default)]
pub struct CategoryCache {
    key: Option<(u64, NaiveDate)>,
    value: CategorizedEvents,
}

impl CategoryCache {
    pub fn is_fresh(&self, generation: u64, day: NaiveDate) -> bool {
        self.key == Some((generation, day))
    }

    /// Return the cached buckets, recomputing when the list generation or
    /// the reference day changed.
    pub fn get_or_compute<Tz: TimeZone>(
        &mut self,
        generation: u64,
        events: &[EventListItem],
        reference: &DateTime<Tz>,
    ) -> &CategorizedEvents {
        let day = reference.date_naive();
        if !self.is_fresh(generation, day) {
            self.value = categorize(events, reference);
            self.key = Some((generation, day));
        }
        &self.value
    }
}
