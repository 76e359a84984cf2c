//! Expensebook main entry point

use anyhow::Context;
use expensebook_api::start_server;
use expensebook_config::Config;
use expensebook_store::{SqliteStore, StoreRef};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "expensebook")]
#[command(author = "Expensebook Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A small personal-finance backend with PDF expense reports", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match Config::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            env_logger::init();
            log::error!("{}", e.to_details());
            return Err(e).context("Failed to load configuration");
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!(
        "Config loaded: bind={}, database={}",
        config.bind_address(),
        config.data.database_path.display()
    );

    let store: StoreRef = Arc::new(
        SqliteStore::open(&config.data.database_path)
            .context("Failed to open expense database")?,
    );

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, store))
        .context("Server error")?;

    Ok(())
}
