use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use namesake_ratio::document::Source;
use namesake_ratio::location::cache::DEFAULT_CAPACITY;
use namesake_ratio::location::providers::NOMINATIM_SEARCH_URL;
use namesake_ratio::location::{CoordinateCache, RetryPolicy};
use namesake_ratio::pipeline::{self, RunConfig, DEFAULT_OUTPUT, DEFAULT_SOURCE_URL, DEFAULT_USER_AGENT};
use namesake_ratio::report;
use tracing_subscriber::EnvFilter;

/// Finds the two U.S. namesake places that are closest together relative to
/// the distance between the places they were named after.
///
/// Examples:
///   namesakes
///   namesakes --input saved_page.html --output pairs.csv
///   namesakes --persist-cache
///   RUST_LOG=info namesakes --max-attempts 20
#[derive(Parser)]
#[command(name = "namesakes", version, about, long_about = None)]
struct Cli {
    /// Page listing the namesakes.
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    url: String,

    /// Read the page from a local HTML file instead of fetching it.
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// CSV file for the resolved table.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Maximum number of geocoding results kept in memory.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    cache_capacity: usize,

    /// Persist geocoding results to this JSON file between runs.
    #[arg(long, conflicts_with = "persist_cache")]
    cache_file: Option<PathBuf>,

    /// Persist geocoding results in the user cache directory.
    #[arg(long)]
    persist_cache: bool,

    /// User-Agent sent to the page host and the geocoder.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Nominatim-compatible search endpoint.
    #[arg(long, default_value = NOMINATIM_SEARCH_URL)]
    geocoder_url: String,

    /// Extra seconds to wait after each consecutive geocoder outage.
    #[arg(long, default_value_t = 1)]
    retry_increment_secs: u64,

    /// Give up on a name after this many failed attempts (default: never).
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        let source = match self.input {
            Some(path) => Source::File(path),
            None => Source::Url(self.url),
        };
        let cache_file = match (self.cache_file, self.persist_cache) {
            (Some(path), _) => Some(path),
            (None, true) => Some(CoordinateCache::default_path()),
            (None, false) => None,
        };
        let retry = RetryPolicy {
            increment: Duration::from_secs(self.retry_increment_secs),
            max_attempts: self.max_attempts,
            ..RetryPolicy::default()
        };

        RunConfig {
            source,
            output: self.output,
            cache_capacity: self.cache_capacity,
            cache_file,
            user_agent: self.user_agent,
            geocoder_endpoint: self.geocoder_url,
            request_timeout: Duration::from_secs(self.timeout_secs),
            retry,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config();

    match pipeline::run(&config) {
        Ok(Some(best)) => println!("{}", report::summary_lines(&best)),
        Ok(None) => println!("No pair of namesakes with distinct locations was found."),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
