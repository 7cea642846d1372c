mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventdash_core::date_range::parse_day;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::commands::Session;

#[derive(Parser)]
#[command(name = "eventdash")]
#[command(about = "Upcoming events at a glance: today, this week and later")]
struct Cli {
    /// API token (takes precedence over EVENTDASH_TOKEN and the stored token)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Events API base URL (overrides config and EVENTDASH_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List open events grouped into today, this week and upcoming
    Events {
        /// Group relative to this day instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the full record of one event
    Show { event_id: i64 },
    /// Store an API token for later commands
    Login { token: String },
    /// Forget the stored API token
    Logout,
    /// Banner image helpers
    Banner {
        #[command(subcommand)]
        action: BannerAction,
    },
    /// Show config paths, creating a commented default config if missing
    Config,
}

#[derive(Subcommand)]
enum BannerAction {
    /// Check that a file is an acceptable banner image
    Check {
        path: PathBuf,

        /// Largest accepted size in MB (defaults to config)
        #[arg(long)]
        max_mb: Option<u64>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Events { date } => {
            let date = date
                .as_deref()
                .map(parse_day)
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            let session = Session::load(cli.token.as_deref(), cli.api_url.as_deref())?;
            commands::events::run(&session, date).await
        }
        Commands::Show { event_id } => {
            let session = Session::load(cli.token.as_deref(), cli.api_url.as_deref())?;
            commands::show::run(&session, event_id).await
        }
        Commands::Login { token } => commands::auth::login(&token),
        Commands::Logout => commands::auth::logout(),
        Commands::Banner { action } => match action {
            BannerAction::Check { path, max_mb } => commands::banner::check(&path, max_mb),
        },
        Commands::Config => commands::config::run(),
    }
}
