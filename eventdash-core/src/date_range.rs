//! The Monday-to-Sunday week around a reference day.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};

/// Day bounds used to bucket events.
/// Weeks start on Monday; `week_end` is the Sunday, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub today: NaiveDate,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

impl WeekWindow {
    pub fn containing(today: NaiveDate) -> Self {
        let offset = today.weekday().num_days_from_monday() as u64;
        // Clamped at the ends of the representable calendar.
        let week_start = today
            .checked_sub_days(Days::new(offset))
            .unwrap_or(NaiveDate::MIN);
        let week_end = week_start
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX);

        WeekWindow {
            today,
            week_start,
            week_end,
        }
    }

    /// Window for the day `reference` falls on in its own timezone.
    pub fn at<Tz: TimeZone>(reference: &DateTime<Tz>) -> Self {
        Self::containing(reference.date_naive())
    }

    /// Whether `day` lies in `[today, week_end]`.
    pub fn is_rest_of_week(&self, day: NaiveDate) -> bool {
        day >= self.today && day <= self.week_end
    }
}

/// Parse YYYY-MM-DD
pub fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}
