//! bojweekly CLI
//!
//! Picks this week's problem set and posts it to the configured Discord
//! webhook. Designed for unattended scheduled execution: failures are
//! logged to stdout and the process still exits 0, so schedulers detect
//! problems by scraping the log rather than the exit code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use bojweekly::{
    error::Result,
    models::Config,
    pipeline,
    services::{CatalogClient, DiscordNotifier},
    storage::UsedProblemStore,
    utils::http,
};

/// bojweekly - Weekly Baekjoon problem digest
#[derive(Parser, Debug)]
#[command(
    name = "bojweekly",
    version,
    about = "Weekly Baekjoon problem digest for Discord"
)]
struct Cli {
    /// Path to data directory with config.toml and the used-problem record
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Path to the .env file holding DISCORD_WEBHOOK_URL
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select this week's problems and post them to the webhook
    Run {
        /// Print the message instead of delivering and persisting
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration and webhook settings
    Validate,

    /// Show the used-problem record status
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        // Scheduled runs scrape stdout, so errors belong there too
        .target(env_logger::Target::Stdout)
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Missing or malformed .env is fine; the process environment wins anyway
    let _ = dotenv::from_path(&cli.env_file);

    let config_path = cli.data_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    let store = UsedProblemStore::new(cli.data_dir.join("used_problems.json"));

    let outcome = match cli.command {
        Command::Run { dry_run } => run(&config, &store, dry_run).await,
        Command::Validate => validate(&config),
        Command::Info => info(&config, &store).await,
    };

    // Always exit 0; failure detection is out of band (log scraping)
    if let Err(e) = outcome {
        log::error!("{}", e);
    }
}

/// Execute the weekly digest pipeline.
async fn run(config: &Config, store: &UsedProblemStore, dry_run: bool) -> Result<()> {
    config.validate()?;

    let client = http::create_client(&config.http)?;
    let catalog = CatalogClient::new(client.clone(), config.catalog.clone());
    let notifier = DiscordNotifier::from_env(client)?;
    let mut rng = StdRng::from_entropy();

    let report = pipeline::run_weekly(config, &catalog, &notifier, store, &mut rng, dry_run).await?;

    if dry_run {
        println!("{}", report.message);
    }

    log::info!(
        "Done! selected={} used_total={} delivered={}",
        report.selected,
        report.used_total,
        report.delivered
    );
    Ok(())
}

/// Check configuration and webhook settings without touching the network.
fn validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    config.validate()?;
    log::info!("✓ Config OK ({} problems per week)", config.selection.total_count());

    let client = http::create_client(&config.http)?;
    DiscordNotifier::from_env(client)?;
    log::info!("✓ Webhook URL OK");

    log::info!("All validations passed!");
    Ok(())
}

/// Show the current used-problem record status.
async fn info(config: &Config, store: &UsedProblemStore) -> Result<()> {
    log::info!("Record file: {}", store.path().display());

    if store.path().exists() {
        let used = store.load().await;
        log::info!("Used problems recorded: {}", used.len());
    } else {
        log::info!("No used-problem record yet.");
    }

    log::info!(
        "Distribution: {}",
        config
            .selection
            .distribution
            .iter()
            .map(|q| format!("{}={}", q.tier, q.count))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
