use crate::{configuration, storage};
use anyhow::{Context, Result};

pub fn init_data_dir(config: &configuration::Configuration) -> Result<()> {
    let data_dir = std::path::PathBuf::from(&config.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    Ok(())
}

pub fn init_storage(config: &configuration::Configuration) -> Result<storage::SqliteStorage> {
    let sqlite = storage::SqliteStorage::new(config.db_path());
    if config.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;
    Ok(sqlite)
}
