//! Storage Layer
//!
//! Persists card records in an embedded SQLite database.

pub mod database;

use anyhow::Result;
use std::path::PathBuf;
use thiserror::Error;

pub use database::CardStore;

/// Record store failure taxonomy. `Duplicate` is reported to the user as
/// "already exists" and is not treated as fatal; everything else surfaces
/// the underlying error text.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("card data for '{0}' already exists")]
    Duplicate(String),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Get the application data directory
pub fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "cardscan", "CardScan")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

    let data_dir = proj_dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "cardscan", "CardScan")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Default database path inside the data directory.
pub fn default_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("cards.db"))
}
