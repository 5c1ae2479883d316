//! Kinoport main entry point
//!
//! This is the command-line interface for exporting and importing the
//! watched list of a Kinopoisk profile.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use kinoport::config::{load_config_with_hash, validate_user_id, Config};
use kinoport::harvest::{build_http_client, Harvester, HttpPageSource};
use kinoport::pacing::SleepPacer;
use kinoport::replay::{replay, GraphqlClient};
use kinoport::storage::{load_records, save_records};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Kinoport: watched-list export and import for Kinopoisk profiles
///
/// With --output the "watched" listing of a profile is harvested into a
/// semicolon-separated file. With --input every record of such a file is
/// marked watched on the site. The session cookie has to be copied from a
/// logged-in browser.
#[derive(Parser, Debug)]
#[command(name = "kinoport")]
#[command(version)]
#[command(about = "Watched-list export and import for Kinopoisk profiles", long_about = None)]
struct Cli {
    /// Harvest the watched listing into this file
    #[arg(short = 'o', long, value_name = "PATH", conflicts_with = "input", requires_all = ["user", "cookie"])]
    output: Option<PathBuf>,

    /// Mark every record of this file watched
    #[arg(short = 'i', long, value_name = "PATH", requires = "cookie")]
    input: Option<PathBuf>,

    /// Profile id whose listing is harvested
    #[arg(short = 'u', long, value_name = "ID")]
    user: Option<String>,

    /// Cookie header copied from the browser
    #[arg(short = 'c', long, value_name = "COOKIE")]
    cookie: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Give up on a page after this many attempts (default: retry forever)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_settings(cli.config.as_deref())?;
    if let Some(max_attempts) = cli.max_attempts {
        config.pacing.max_attempts = Some(max_attempts);
    }

    if let Some(output) = &cli.output {
        let user = cli.user.as_deref().context("--user is required for export")?;
        let cookie = cli.cookie.as_deref().context("--cookie is required")?;
        handle_harvest(&config, user, cookie, output).await?;
    } else if let Some(input) = &cli.input {
        let cookie = cli.cookie.as_deref().context("--cookie is required")?;
        handle_replay(&config, cookie, input).await?;
    } else {
        Cli::command().print_help()?;
        println!();
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kinoport=info,warn"),
            1 => EnvFilter::new("kinoport=debug,info"),
            2 => EnvFilter::new("kinoport=trace,debug"),
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

/// Loads the configuration file if one was given, defaults otherwise
fn load_settings(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles --output: harvests the profile listing into a record file
async fn handle_harvest(
    config: &Config,
    user: &str,
    cookie: &str,
    output: &Path,
) -> anyhow::Result<()> {
    validate_user_id(user)?;

    let client = build_http_client(&config.source.user_agent, cookie)?;
    let source = HttpPageSource::new(client);
    let pacer = SleepPacer;

    match config.pacing.max_attempts {
        Some(n) => tracing::info!("Harvesting profile {} (at most {} attempts per page)", user, n),
        None => tracing::info!("Harvesting profile {}", user),
    }

    let outcome = Harvester::new(&source, &pacer, config, user)?.run().await?;

    save_records(output, &outcome.store)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let report = &outcome.report;
    println!();
    println!("Watched items count: {}", report.paging.total_items);
    println!("Page size: {}", report.paging.page_size);
    println!("Pages count: {}", report.paging.page_count);
    println!("Watched items parsed: {}", report.parsed_items);
    println!("Items dumped count: {}", report.stored_items);
    println!("✓ Records written to: {}", output.display());

    Ok(())
}

/// Handles --input: marks every record of a file watched
async fn handle_replay(config: &Config, cookie: &str, input: &Path) -> anyhow::Result<()> {
    let records = load_records(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    tracing::info!("Loaded {} records from {}", records.len(), input.display());

    let client = build_http_client(&config.source.user_agent, cookie)?;
    let client = GraphqlClient::new(client, &config.source)?;

    replay(&records, &client, &SleepPacer, config.pacing.replay_delay()).await?;

    Ok(())
}
