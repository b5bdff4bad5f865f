//! Rental-Harvest main entry point
//!
//! Command-line interface for the rental-listing crawler.

use clap::Parser;
use rental_harvest::config::load_config;
use rental_harvest::crawler::harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rental-Harvest: a rental-listing dataset builder
///
/// Walks the paginated search results of a rental-listing site, follows
/// each ad to its detail page, and writes one CSV row per listing. All
/// requests pass through a single rate governor, so a full run is
/// expected to take hours; failed pages and listings are logged and
/// skipped, never fatal.
#[derive(Parser, Debug)]
#[command(name = "rental-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A rental-listing dataset builder", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Crawl pages 1..=N (overrides start-page/end-page from the config)
    #[arg(long, value_name = "N", conflicts_with_all = ["start_page", "end_page"])]
    pages: Option<u32>,

    /// Override the first page to crawl
    #[arg(long, value_name = "N")]
    start_page: Option<u32>,

    /// Override the last page to crawl
    #[arg(long, value_name = "N")]
    end_page: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output, including the progress bar
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // CLI page-range overrides
    if let Some(pages) = cli.pages {
        config.crawl.start_page = 1;
        config.crawl.end_page = pages;
    }
    if let Some(start) = cli.start_page {
        config.crawl.start_page = start;
    }
    if let Some(end) = cli.end_page {
        config.crawl.end_page = end;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // Setup failures (unwritable paths, bad patterns) are the only
    // non-zero exits; per-page and per-listing failures are logged and
    // the process still exits 0.
    let summary = harvest(config, !cli.quiet).await?;

    tracing::info!(
        "Done: {} pages visited, {} listings collected{}",
        summary.pages_visited,
        summary.listings_collected,
        if summary.interrupted {
            " (interrupted)"
        } else {
            ""
        }
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rental_harvest=info,warn"),
            1 => EnvFilter::new("rental_harvest=debug,info"),
            2 => EnvFilter::new("rental_harvest=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the plan
fn handle_dry_run(config: &rental_harvest::config::Config) {
    println!("=== Rental-Harvest Dry Run ===\n");

    let pages = if config.crawl.end_page < config.crawl.start_page {
        0
    } else {
        config.crawl.end_page - config.crawl.start_page + 1
    };

    println!("Crawl:");
    println!(
        "  Pages: {}..={} ({} pages)",
        config.crawl.start_page, config.crawl.end_page, pages
    );
    println!(
        "  Request interval: {}s",
        config.crawl.request_interval_seconds
    );
    println!("  User agent: {}", config.crawl.user_agent);
    println!("  URL template: {}", config.crawl.listing_url_template);

    println!("\nOutput:");
    println!("  Dataset: {}", config.output.dataset_path);
    println!("  Request log: {}", config.output.request_log_path);
    println!("  Error log: {}", config.output.error_log_path);

    println!("\nDetail patterns:");
    println!("  bedrooms = {}", config.patterns.bedrooms);
    println!("  bathrooms = {}", config.patterns.bathrooms);
    println!("  sqft = {}", config.patterns.sqft);
    println!("  description-text = {}", config.patterns.description_text);
    println!("  year-built = {}", config.patterns.year_built);
    println!("  parking-spots = {}", config.patterns.parking_spots);

    println!("\n✓ Configuration is valid");
    // Rough lower bound: ~11 requests per page at one per interval
    let est_secs = u64::from(pages) * 11 * config.crawl.request_interval_seconds;
    println!(
        "✓ Would issue at least {} page requests (~{:.1}h at the configured rate)",
        pages,
        est_secs as f64 / 3600.0
    );
}
