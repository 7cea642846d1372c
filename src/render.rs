//! Terminal rendering for the dashboard.
//!
//! Colors come from owo_colors; plain text is kept intact inside the ANSI
//! codes so output stays greppable.

use chrono::NaiveDate;
use chrono_tz::Tz;
use eventdash_core::categorize::{Bucket, CategorizedEvents};
use eventdash_core::date_range::WeekWindow;
use eventdash_core::{EventDetail, EventListItem};
use owo_colors::OwoColorize;

/// Short day label, e.g. "12/06".
pub fn day_label(day: NaiveDate) -> String {
    day.format("%d/%m").to_string()
}

/// Section header for a bucket.
pub fn bucket_title(bucket: Bucket, window: &WeekWindow) -> String {
    match bucket {
        Bucket::Today => format!("Today ({})", day_label(window.today)),
        Bucket::ThisWeek => format!(
            "This week ({} - {})",
            day_label(window.week_start),
            day_label(window.week_end)
        ),
        Bucket::Upcoming => "Register early for upcoming events".to_string(),
    }
}

fn empty_message(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Today => "No events today",
        Bucket::ThisWeek => "No more events this week",
        Bucket::Upcoming => "No events scheduled yet",
    }
}

/// Start time in the dashboard's long form, e.g. "12/06/2024 • Wednesday • 9:00 AM".
pub fn format_start(event: &EventListItem, tz: &Tz) -> String {
    match event.start_time.in_zone(tz) {
        Some(dt) => dt.format("%d/%m/%Y • %A • %-I:%M %p").to_string(),
        None => event.start_time.to_string(),
    }
}

/// One event in a bucket. Today's events are highlighted.
fn render_card(event: &EventListItem, tz: &Tz, highlight: bool) -> Vec<String> {
    let id = format!("#{}", event.event_id);
    let title = if highlight {
        format!("{} {}", event.title.red().bold(), "TODAY".on_red())
    } else {
        event.title.bold().to_string()
    };

    vec![
        format!("  {} {}", id.dimmed(), title),
        format!("      {}", format_start(event, tz)),
        format!("      {}", event.display_location().dimmed()),
    ]
}

/// All three buckets with headers, in dashboard order.
pub fn render_dashboard(buckets: &CategorizedEvents, window: &WeekWindow, tz: &Tz) -> String {
    let mut lines = Vec::new();

    for (i, bucket) in Bucket::ALL.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(bucket_title(bucket, window).bold().to_string());

        let events = buckets.bucket(bucket);
        if events.is_empty() {
            lines.push(format!("  {}", empty_message(bucket).dimmed()));
            continue;
        }

        for event in events {
            lines.extend(render_card(event, tz, bucket == Bucket::Today));
        }
    }

    lines.join("\n")
}

/// Full detail view for one event.
pub fn render_detail(detail: &EventDetail, tz: &Tz) -> String {
    let event = &detail.event;
    let mut lines = vec![
        event.title.bold().to_string(),
        format!("  {:<10} {}", "Status", event.status),
        format!("  {:<10} {}", "Starts", format_start(event, tz)),
        format!("  {:<10} {}", "Where", event.display_location()),
        format!("  {:<10} {}", "Seats", event.max_seats),
    ];

    if let Some(url) = &event.banner_url {
        lines.push(format!("  {:<10} {}", "Banner", url.dimmed()));
    }

    for (key, value) in &detail.extra {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(format!("  {:<10} {}", key, value));
    }

    if let Some(description) = event.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(String::new());
        lines.push(description.to_string());
    }

    lines.join("\n")
}
