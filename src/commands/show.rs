use anyhow::Result;
use eventdash_core::detail::DetailModal;
use owo_colors::OwoColorize;

use super::Session;
use crate::render::render_detail;
use crate::utils::tui::create_spinner;

pub async fn run(session: &Session, event_id: i64) -> Result<()> {
    let mut modal = DetailModal::new();

    let spinner = create_spinner(&format!("Loading event #{}", event_id));
    modal
        .open(&session.client, session.credential.as_ref(), event_id)
        .await;
    spinner.finish_and_clear();

    if !modal.is_open() {
        println!(
            "{}",
            "Not logged in. Run `eventdash login <token>` first.".red()
        );
        return Ok(());
    }

    if let Some(detail) = modal.selected() {
        println!("{}", render_detail(detail, &session.timezone));
    } else if let Some(error) = modal.error() {
        println!("{}", error.red());
    }

    modal.close();
    Ok(())
}
