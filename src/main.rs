//! Billed main entry point

use billed_api::start_server;
use billed_config::{Config, ConfigError};
use billed_core::{MemoryStore, StoreSeed};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "billed")]
#[command(version = "0.1.0")]
#[command(about = "Expense reports front-end: employee bills and admin validations", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(path: &Path) -> anyhow::Result<(Config, Option<String>)> {
    match Config::load(path) {
        Ok(config) => Ok((config, None)),
        Err(ConfigError::FileNotFound { path }) => Ok((
            Config::default(),
            Some(format!("Config file {} not found, using defaults", path)),
        )),
        Err(e) => {
            let hints = e.suggestions().join("; ");
            Err(anyhow::anyhow!("{} ({})", e, hints))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, warning) = load_config(&args.config)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }

    let store = match &config.store.seed_file {
        Some(path) => {
            let seed = StoreSeed::load(path).map_err(|e| anyhow::anyhow!("{}", e.label()))?;
            log::info!(
                "Store seeded from {}: {} users, {} bills",
                path.display(),
                seed.users.len(),
                seed.bills.len()
            );
            MemoryStore::new(seed)
        }
        None => {
            log::warn!("No store seed file configured, starting with an empty store");
            MemoryStore::empty()
        }
    };

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, Arc::new(store)))
}
