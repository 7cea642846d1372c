use anyhow::Result;
use eventdash_core::banner::{ImageFile, validate_image_file};
use eventdash_core::config::DashConfig;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn check(path: &Path, max_mb: Option<u64>) -> Result<()> {
    let max_mb = match max_mb {
        Some(mb) => mb,
        None => DashConfig::load()?.max_banner_mb,
    };

    let file = ImageFile::from_path(path)?;
    let summary = format!("{} ({:.2} MB, {})", file.name, file.size_mb(), file.mime_type);

    match validate_image_file(&file, max_mb) {
        Ok(()) => println!("{} {}", "ok".green(), summary),
        Err(e) => {
            println!("{} {}", "rejected".red(), summary);
            anyhow::bail!(e);
        }
    }

    Ok(())
}
