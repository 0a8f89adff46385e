//! Car Price Bot CLI
//!
//! Runs the Telegram bot, or scrapes once for inspection.

use std::path::PathBuf;
use std::sync::Arc;

use car_price_bot::{
    bot,
    error::Result,
    handler::{PriceHandler, Reply},
    models::{Config, ConversationId},
    pipeline::CallbackAction,
    services::{PriceFetcher, PriceSource},
    storage::MemorySessionStore,
};
use clap::{Parser, Subcommand};

/// Car price bot - mashinbank.com prices on Telegram
#[derive(Parser, Debug)]
#[command(name = "car-price-bot", version, about = "Telegram bot for car prices")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Start the bot (default)
    Run,

    /// Scrape once and print the result
    Fetch {
        /// Zero-based page to render
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// Print every record as JSON instead of a rendered page
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            config.validate()?;
            bot::run(&config).await?;
        }

        Command::Fetch { page, json } => {
            let fetcher = PriceFetcher::new(&config.scraper)?;

            if json {
                let list = fetcher.fetch().await?;
                println!("{}", serde_json::to_string_pretty(&list)?);
                return Ok(());
            }

            let handler = PriceHandler::from_config(
                &config,
                Arc::new(fetcher),
                Arc::new(MemorySessionStore::new()),
            );
            let cli_session = ConversationId(0);
            let mut reply = handler.show_prices(cli_session).await;
            if page > 0 && matches!(reply, Reply::Page(_)) {
                reply = handler
                    .handle_action(cli_session, CallbackAction::GoToPage(page))
                    .await;
            }
            println!("{}", reply.text());
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            match config.bot.token() {
                Ok(_) => log::info!("✓ Bot token found in ${}", config.bot.token_env),
                Err(e) => log::warn!("{}", e),
            }
        }
    }

    Ok(())
}
