use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use eventdash_core::board::EventBoard;
use eventdash_core::date_range::WeekWindow;
use owo_colors::OwoColorize;

use super::Session;
use crate::render::render_dashboard;
use crate::utils::tui::create_spinner;

pub async fn run(session: &Session, date: Option<NaiveDate>) -> Result<()> {
    let tz = session.timezone;
    let reference = match date {
        Some(day) => day
            .and_hms_opt(12, 0, 0)
            .and_then(|noon| tz.from_local_datetime(&noon).earliest())
            .with_context(|| format!("Cannot place {} in timezone {}", day, tz))?,
        None => Utc::now().with_timezone(&tz),
    };

    let mut board = EventBoard::new();
    let spinner = create_spinner("Loading events");
    board.load(&session.client, session.credential.as_ref()).await;
    spinner.finish_and_clear();

    if let Some(error) = board.error() {
        println!("{}\n", format!("Error: {}", error).red());
    }
    if let Some(notice) = board.notice() {
        println!("{}\n", notice.yellow());
    }

    let window = WeekWindow::at(&reference);
    let buckets = board.categorized(&reference);
    println!("{}", render_dashboard(buckets, &window, &tz));

    Ok(())
}
