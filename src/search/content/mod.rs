//! Content fetching for search results
//!
//! Turns a search result URL into bounded plain text for summarization.
//!
//! ## Architecture
//!
//! ```text
//! Search Result (URL) → HttpContentFetcher → HTML → extract_text → RetrievedContent
//!                              ↓ (any failure)
//!                            None (logged)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let fetcher = HttpContentFetcher::new(ContentFetchConfig::from_env())?;
//! if let Some(content) = fetcher.fetch("https://example.com", 50_000).await {
//!     println!("{}", content.text);
//! }
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;

pub use config::ContentFetchConfig;
pub use extractor::{collapse_whitespace, extract_text, truncate_chars};
pub use fetcher::{ContentFetcher, FetchError, HttpContentFetcher, RetrievedContent};
