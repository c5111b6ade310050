//! Command-line interface definitions.

pub mod batch;
pub mod calculate;
pub mod check;
pub mod item;
pub mod output;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::cache::MemoryPriceCache;
use crate::calculator::ChestCalculator;
use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::error::Result;
use crate::pricing::PriceResolver;
use crate::refresh::SnapshotRefresher;

/// Chestworth - dungeon chest profit calculator.
#[derive(Parser, Debug)]
#[command(name = "chestworth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Bazaar snapshot file (overrides config)
    #[arg(long, global = true)]
    pub bazaar: Option<PathBuf>,

    /// Auction snapshot file (overrides config)
    #[arg(long, global = true)]
    pub auctions: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Value a chest request file
    Calculate(RequestArg),

    /// Show both markets' view of one item
    Item(ItemArgs),

    /// Resolve unit prices for several items
    Batch(BatchArgs),

    /// Re-value a chest whenever snapshots refresh
    Watch(RequestArg),

    /// Validate configuration file
    CheckConfig,
}

/// Shared argument for commands that value a chest request.
#[derive(Parser, Debug)]
pub struct RequestArg {
    /// Path to a JSON chest request
    #[arg(short, long)]
    pub request: PathBuf,
}

/// Arguments for the `item` subcommand.
#[derive(Parser, Debug)]
pub struct ItemArgs {
    /// Item name, in any spelling
    #[arg(value_parser = parse_item_name)]
    pub name: String,

    /// Number of units to value
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub quantity: u64,
}

/// Arguments for the `batch` subcommand.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Item names
    #[arg(required = true, value_parser = parse_item_name)]
    pub names: Vec<String>,
}

fn parse_item_name(raw: &str) -> std::result::Result<String, String> {
    if raw.trim().is_empty() {
        return Err("item name must not be blank".to_string());
    }
    Ok(raw.to_string())
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    ///
    /// A missing file at the default path means built-in defaults; an
    /// explicitly named file must exist.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = if self.config == Path::new(DEFAULT_CONFIG_PATH) {
            Config::load_or_default(&self.config)?
        } else {
            Config::load(&self.config)?
        };

        if let Some(path) = &self.bazaar {
            config.snapshots.bazaar_path = Some(path.clone());
        }
        if let Some(path) = &self.auctions {
            config.snapshots.auction_path = Some(path.clone());
        }
        Ok(config)
    }
}

/// Run the parsed command.
pub async fn run(cli: &Cli, config: Config) -> Result<()> {
    match &cli.command {
        Commands::Calculate(args) => {
            let session = Session::open(&config)?;
            calculate::execute(&session, &args.request, cli.json)
        }
        Commands::Item(args) => {
            let session = Session::open(&config)?;
            item::execute(&session, &args.name, args.quantity, cli.json)
        }
        Commands::Batch(args) => {
            let session = Session::open(&config)?;
            batch::execute(&session, &args.names, cli.json)
        }
        Commands::Watch(args) => {
            let session = Session::open(&config)?;
            watch::execute(session, &args.request, cli.json).await
        }
        Commands::CheckConfig => check::execute(&cli.config, &config, cli.json),
    }
}

/// Loaded snapshots plus the calculator reading them.
pub struct Session {
    pub refresher: SnapshotRefresher,
    pub calculator: ChestCalculator,
}

impl Session {
    /// Load every configured snapshot once and wire up the calculator.
    pub fn open(config: &Config) -> Result<Self> {
        let cache = Arc::new(MemoryPriceCache::new());
        let refresher = SnapshotRefresher::new(Arc::clone(&cache), config.snapshots.clone());
        refresher.load_once()?;

        let resolver =
            PriceResolver::new(cache).with_staleness(config.pricing.staleness_policy());
        Ok(Self {
            refresher,
            calculator: ChestCalculator::new(resolver),
        })
    }
}
