use anyhow::Result;
use eventdash_core::config::DashConfig;
use eventdash_core::credential::CredentialFile;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = DashConfig::config_path()?;
    if !config_path.exists() {
        DashConfig::create_default_config(&config_path)?;
        println!("Created {}\n", config_path.display());
    }

    let config = DashConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:       {}", config_path.display());
    println!("  Credentials:  {}", CredentialFile::default_path()?.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  API URL:      {}", config.api_url);
    println!("  Timezone:     {}", config.timezone()?);
    println!("  Timeout:      {}s", config.request_timeout_secs);
    println!("  Banner limit: {} MB", config.max_banner_mb);

    Ok(())
}
