use anyhow::{bail, Result};

use bannerloop_core::AppConfig;

pub fn run(config: &AppConfig, write: bool) -> Result<()> {
    if !write {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let path = AppConfig::config_path();
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }

    config.save()?;
    println!("Wrote configuration to {}", path.display());

    Ok(())
}
