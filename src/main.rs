//! CardScan - Business card data extraction
//!
//! Extracts structured contact fields from a photographed business card
//! using OCR, and lets the user persist, edit, and delete the extracted
//! records in an embedded SQLite store through a form-based dashboard.

mod classify;
mod config;
mod dashboard;
mod ocr;
mod overlay;
mod pipeline;
mod shared;
mod storage;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use parking_lot::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::ocr::OcrPipeline;
use crate::shared::SharedAppState;
use crate::storage::{CardStore, StoreError};

/// CardScan - business card data extraction
#[derive(Parser, Debug)]
#[command(name = "cardscan")]
#[command(about = "Extract business card fields with OCR and manage them in a local store")]
struct Args {
    /// Override the database file path
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract fields from a card image and print them
    Extract {
        /// Path to the card image (PNG/JPEG)
        image: PathBuf,
        /// Also insert the extracted record into the database
        #[arg(long)]
        save: bool,
    },
    /// List stored cardholder names
    List,
    /// Delete a stored card by holder name
    Delete {
        /// Cardholder name of the record to remove
        holder: String,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut config = load_or_create_config();
    if args.db.is_some() {
        config.storage.db_path = args.db;
    }

    match args.command {
        None => run_with_dashboard(config),
        Some(Command::Extract { image, save }) => run_extract(config, &image, save),
        Some(Command::List) => run_list(config),
        Some(Command::Delete { holder }) => run_delete(config, &holder),
    }
}

/// Load configuration from file or create default
fn load_or_create_config() -> AppConfig {
    if let Ok(config_dir) = storage::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                info!("Loaded configuration from {:?}", config_path);
                return config;
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

fn open_store(config: &AppConfig) -> Result<CardStore> {
    let path = match &config.storage.db_path {
        Some(path) => path.clone(),
        None => storage::default_db_path()?,
    };
    Ok(CardStore::open(&path)?)
}

/// Run the dashboard (default mode, blocking)
fn run_with_dashboard(config: AppConfig) -> Result<()> {
    info!("CardScan starting in dashboard mode");

    let shared_state = Arc::new(RwLock::new(SharedAppState::new(config)));
    if let Err(e) = dashboard::app::run_dashboard(shared_state) {
        tracing::error!("Dashboard error: {}", e);
    }

    info!("CardScan shutdown complete");
    Ok(())
}

/// Headless extraction: print the classified fields, optionally save.
fn run_extract(config: AppConfig, image: &Path, save: bool) -> Result<()> {
    let ocr = OcrPipeline::new(config.ocr.clone());
    let extraction = pipeline::extract(
        image,
        &ocr,
        config.classifier.variant,
        &config.overlay,
    )?;

    println!("Detected {} text fragments", extraction.fragments.len());
    for (label, value) in extraction.record.fields() {
        println!("{label:<14} {value}");
    }

    if save {
        let store = open_store(&config)?;
        match store.insert(&extraction.record) {
            Ok(id) => println!("Saved as record {id}"),
            Err(StoreError::Duplicate(name)) => {
                println!("Card data for '{name}' already exists");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn run_list(config: AppConfig) -> Result<()> {
    let store = open_store(&config)?;
    let names = store.list_holder_names()?;
    if names.is_empty() {
        println!("No cards stored");
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

fn run_delete(config: AppConfig, holder: &str) -> Result<()> {
    let store = open_store(&config)?;
    store.delete_by_holder(holder)?;
    println!("Deleted '{holder}' (no-op if it did not exist)");
    Ok(())
}
