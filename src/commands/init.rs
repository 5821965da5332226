//! The `init` command: write a starter `.mulemap.toml`.

use crate::config::{default_config_toml, CONFIG_FILE_NAME};
use crate::errors::MulemapError;
use anyhow::Result;
use std::path::Path;

pub fn init_config(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(MulemapError::Config(format!(
            "{CONFIG_FILE_NAME} already exists. Use --force to overwrite."
        ))
        .into());
    }

    std::fs::write(path, default_config_toml())?;
    println!("Created {CONFIG_FILE_NAME} with the default connector weight table.");
    Ok(())
}
