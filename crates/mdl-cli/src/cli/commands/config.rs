//! `mdl config` – show where the config file lives.

use anyhow::Result;
use mdl_core::config;

pub fn run_config() -> Result<()> {
    config::load_or_init()?;
    let path = config::config_path()?;
    println!("The config file is located at: {}", path.display());
    Ok(())
}
