//! Client code for chorus.
//!
//! This crate provides the HTML fetch, the search/lyrics extractors, and the
//! scrape orchestration shared by the scraper binary and tests.

pub mod extract;
pub mod fetch;
pub mod scrape;

pub use extract::{SearchCandidate, extract_candidates, extract_lyrics};
pub use fetch::{FetchClient, FetchConfig, FetchError, Fetcher};
pub use scrape::{FixedProxy, JsonLinesSink, MemorySink, ProxyProvider, RecordSink, ScrapeParams};
