//! Sitemapper main entry point
//!
//! This is the command-line interface for the sitemap crawler.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sitemapper::config::{load_config_with_hash, Config};
use sitemapper::crawler::{crawl_with_stats, HttpFetcher};
use sitemapper::output::{print_statistics, write_json, write_text};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Sitemapper: crawl one site and print its sitemap
///
/// Starting from URL, every page whose address begins with URL is fetched and
/// the anchors and images on it are listed. Images and pages outside URL are
/// listed but never fetched.
#[derive(Parser, Debug)]
#[command(name = "sitemapper")]
#[command(version)]
#[command(about = "Crawl a single site and print its sitemap", long_about = None)]
struct Cli {
    /// Seed URL; also the prefix every crawled page must start with
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of fetches in flight (overrides the config file)
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<usize>,

    /// Output format for the sitemap
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print crawl statistics to stderr when done
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    let Some(url) = cli.url.clone() else {
        eprintln!("Missing URL to crawl");
        return ExitCode::from(1);
    };

    match run(&cli, &url).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemapper=info,warn"),
            1 => EnvFilter::new("sitemapper=debug,info"),
            2 => EnvFilter::new("sitemapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads configuration, applying command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }

    Ok(config)
}

/// Handles the main crawl operation
async fn run(cli: &Cli, url: &str) -> anyhow::Result<()> {
    let config = load_settings(cli)?;

    let fetcher = HttpFetcher::new(&config.user_agent, &config.http)?;

    tracing::info!(
        "Crawling {} with {} fetch slots",
        url,
        config.crawler.max_concurrent_fetches
    );
    let outcome = crawl_with_stats(url, Arc::new(fetcher), &config.crawler).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => write_text(&outcome.sitemap, url, &mut out)?,
        OutputFormat::Json => write_json(&outcome.sitemap, url, &mut out)?,
    }
    out.flush()?;

    if cli.stats {
        print_statistics(&outcome.stats);
    }

    Ok(())
}
