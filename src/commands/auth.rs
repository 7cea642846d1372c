use anyhow::Result;
use eventdash_core::credential::CredentialFile;

pub fn login(token: &str) -> Result<()> {
    let path = CredentialFile::default_path()?;
    CredentialFile::store(&path, token)?;

    println!("Token saved to {}", path.display());
    println!("\nRun `eventdash events` to see what's coming up.");
    Ok(())
}

pub fn logout() -> Result<()> {
    let path = CredentialFile::default_path()?;

    if CredentialFile::clear(&path)? {
        println!("Logged out.");
    } else {
        println!("No stored token.");
    }
    Ok(())
}
