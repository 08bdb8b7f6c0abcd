//! Thin presentation layer over the search pipeline.
//!
//! The pipeline runs on one background task per search; this binary polls
//! the progress channel on a fixed interval (so the interactive side never
//! blocks) and renders the final ranked list when the task completes. One
//! search at a time by construction.

use std::time::Duration;

use clap::{Parser, Subcommand};

use kainos_core::{AppConfig, ProductRecord, SearchRequest, PRESET_QUERIES};
use kainos_scraper::{progress_channel, run_search};

const PROGRESS_POLL_MS: u64 = 100;

#[derive(Debug, Parser)]
#[command(name = "kainos")]
#[command(about = "Search nine Lithuanian computer stores and rank the results by price")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a search across all stores.
    Search {
        /// Free-text query, five characters minimum.
        query: Option<String>,
        /// Use one of the canned queries instead (1-based, see `presets`).
        #[arg(long, conflicts_with = "query")]
        preset: Option<usize>,
        /// Disable the price band restriction (on by default).
        #[arg(long)]
        no_range_filter: bool,
        /// Print the final list as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List the canned queries.
    Presets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = kainos_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Presets => {
            for (index, query) in PRESET_QUERIES.iter().enumerate() {
                println!("{}. {query}", index + 1);
            }
            Ok(())
        }
        Commands::Search {
            query,
            preset,
            no_range_filter,
            json,
        } => {
            let apply_range_filter = !no_range_filter;
            let request = match (query, preset) {
                (_, Some(index)) => SearchRequest::preset(index, apply_range_filter)?,
                (Some(text), None) => SearchRequest::free_text(text, apply_range_filter)?,
                (None, None) => anyhow::bail!("provide a query or --preset <N>"),
            };
            run(config, request, json).await
        }
    }
}

async fn run(config: AppConfig, request: SearchRequest, json: bool) -> anyhow::Result<()> {
    let search_query = request.query.clone();
    let (progress, mut progress_rx) = progress_channel();

    // The whole fetch-extract-aggregate pipeline runs on this one task;
    // only progress strings cross back until the final list does.
    let worker =
        tokio::spawn(async move { run_search(&config, &request, &progress).await });

    let mut poll = tokio::time::interval(Duration::from_millis(PROGRESS_POLL_MS));
    while !worker.is_finished() {
        poll.tick().await;
        for message in progress_rx.drain() {
            println!("{message}");
        }
    }
    for message in progress_rx.drain() {
        println!("{message}");
    }

    let results = worker.await??;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&search_query, &results);
    }
    Ok(())
}

fn print_results(query: &str, results: &[ProductRecord]) {
    println!();
    println!("SEARCH RESULTS FOR: {query}");
    println!();
    if results.is_empty() {
        println!("No results in the configured price range.");
        return;
    }
    for record in results {
        println!("{}", record.description);
        println!("    {:.2} €", record.price);
        println!("{}", record.link);
        println!();
    }
}
