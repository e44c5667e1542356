//! End-to-end run: document → pairs → coordinates → CSV → ratio search.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::document::{self, Source};
use crate::extract::extract_pairs;
use crate::location::cache::DEFAULT_CAPACITY;
use crate::location::providers::NOMINATIM_SEARCH_URL;
use crate::location::{CoordinateCache, CoordinateResolver, GeocodeError, Geocoder, Nominatim, RetryPolicy};
use crate::record::{NamePair, ResolvedRecord};
use crate::report;
use crate::search::{find_minimum_ratio, MinimumRatio};

pub const DEFAULT_SOURCE_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_U.S._places_named_after_non-U.S._places";
pub const DEFAULT_OUTPUT: &str = "namesake_cities.csv";
pub const DEFAULT_USER_AGENT: &str = "namesake-ratio/0.1";

/// Everything a run needs; defaults reproduce the stock behaviour.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: Source,
    pub output: PathBuf,
    pub cache_capacity: usize,
    pub cache_file: Option<PathBuf>,
    pub user_agent: String,
    pub geocoder_endpoint: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source: Source::Url(DEFAULT_SOURCE_URL.to_string()),
            output: PathBuf::from(DEFAULT_OUTPUT),
            cache_capacity: DEFAULT_CAPACITY,
            cache_file: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geocoder_endpoint: NOMINATIM_SEARCH_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

impl RunConfig {
    fn cache(&self) -> CoordinateCache {
        match &self.cache_file {
            Some(path) => CoordinateCache::load_from(path.clone(), self.cache_capacity),
            None => CoordinateCache::in_memory(self.cache_capacity),
        }
    }
}

/// Resolve both names of every pair, printing one progress line per pair.
pub fn resolve_records<G: Geocoder>(
    resolver: &mut CoordinateResolver<G>,
    pairs: Vec<NamePair>,
) -> Result<Vec<ResolvedRecord>, GeocodeError> {
    let total = pairs.len();
    let mut records = Vec::with_capacity(total);
    for (i, pair) in pairs.into_iter().enumerate() {
        let namesake_coord = resolver.resolve(&pair.namesake)?;
        let original_coord = resolver.resolve(&pair.original)?;
        println!("{}", report::progress_line(i + 1, total, &pair.namesake, &pair.original));
        records.push(ResolvedRecord::new(pair, namesake_coord, original_coord));
    }
    Ok(records)
}

/// Print each improvement and return the overall best pair.
pub fn search_and_report(records: &[ResolvedRecord]) -> Option<MinimumRatio> {
    find_minimum_ratio(records, |best| println!("{}", report::improvement_lines(best)))
}

pub fn run(config: &RunConfig) -> Result<Option<MinimumRatio>> {
    let html = document::load(&config.source, &config.user_agent)?;
    let elements = document::parse(&html);
    let pairs = extract_pairs(&elements);
    tracing::info!(elements = elements.len(), pairs = pairs.len(), "document parsed");

    let geocoder = Nominatim::with_endpoint(
        &config.geocoder_endpoint,
        &config.user_agent,
        config.request_timeout,
    );
    let mut resolver = CoordinateResolver::new(geocoder, config.cache(), config.retry.clone());
    let records = resolve_records(&mut resolver, pairs).context("Failed to resolve coordinates")?;
    tracing::info!(
        records = records.len(),
        lookups = resolver.lookups(),
        cached = resolver.cache().len(),
        "coordinates resolved"
    );

    report::write_csv(&config.output, &records)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    Ok(search_and_report(&records))
}
