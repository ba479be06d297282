//! Souk-Harvest main entry point
//!
//! Command-line interface for the rental-listing harvester.

use anyhow::Context;
use clap::Parser;
use souk_harvest::config::{load_config_with_hash, Config};
use souk_harvest::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Souk-Harvest: a rental-listing harvester
///
/// Crawls a classifieds catalog for one city, follows listing pages to
/// property detail pages, and streams normalized records to a JSON Lines
/// file.
#[derive(Parser, Debug)]
#[command(name = "souk-harvest")]
#[command(version)]
#[command(about = "Harvest rental listings from a classifieds catalog", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    crawl(config).await.context("crawl failed")?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("souk_harvest=info,warn"),
            1 => EnvFilter::new("souk_harvest=debug,info"),
            2 => EnvFilter::new("souk_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the run plan
fn handle_dry_run(config: &Config) {
    println!("=== Souk-Harvest Dry Run ===\n");

    println!("Target:");
    println!("  Start URL: {}", config.site.start_url());
    println!("  City: {}", config.site.city);
    println!("  Currency: {}", config.site.currency);

    println!("\nCrawler:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Per-host delay: {}ms", config.crawler.per_host_delay);
    println!(
        "  Retry: {} times, {}ms apart, on {:?}",
        config.crawler.retry_times, config.crawler.retry_delay, config.crawler.retry_status_codes
    );

    println!("\nOutput:");
    println!("  Records: {}", config.output.records_path);

    println!("\n✓ Configuration is valid");
}
