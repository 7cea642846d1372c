pub mod auth;
pub mod banner;
pub mod config;
pub mod events;
pub mod show;

use anyhow::Result;
use chrono_tz::Tz;
use eventdash_core::client::EventClient;
use eventdash_core::config::DashConfig;
use eventdash_core::credential::{Credential, CredentialFile, resolve_credential};

/// Everything a command needs to talk to the API.
pub struct Session {
    pub client: EventClient,
    pub credential: Option<Credential>,
    pub timezone: Tz,
}

impl Session {
    pub fn load(token_flag: Option<&str>, api_url_flag: Option<&str>) -> Result<Self> {
        let mut config = DashConfig::load()?;
        config.apply_api_url_override(api_url_flag);

        let file = CredentialFile::load(&CredentialFile::default_path()?)?;
        let env_token = std::env::var("EVENTDASH_TOKEN").ok();
        let credential = resolve_credential(token_flag, env_token.as_deref(), &file);

        tracing::debug!(
            api_url = %config.api_url,
            authenticated = credential.is_some(),
            "session"
        );

        Ok(Session {
            client: EventClient::from_config(&config)?,
            credential,
            timezone: config.timezone()?,
        })
    }
}
