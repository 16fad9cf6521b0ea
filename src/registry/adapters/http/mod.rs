//! HTTP adapters.

mod fetcher;

pub use fetcher::{HttpCardFetcher, HttpCardFetcherConfig};
