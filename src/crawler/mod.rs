//! Crawler module for the two-stage listing harvest
//!
//! This module contains the core crawling logic, including:
//! - The global request rate governor
//! - Governed, logged HTTP fetching
//! - Listing-page walking and JSON-LD summary extraction
//! - Detail-page field mining via configurable patterns
//! - Overall harvest coordination and cancellation

mod coordinator;
mod extractor;
mod fetcher;
mod governor;
mod walker;

pub use coordinator::{run_harvest, Coordinator, RunSummary};
pub use extractor::DetailPatterns;
pub use fetcher::{FetchOutcome, FetchStatus, Fetcher};
pub use governor::RateGovernor;
pub use walker::{page_url, parse_listing_page};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete harvest operation
///
/// This is the main entry point for starting a harvest. It will:
/// 1. Open the request logs and verify the dataset path is writable
/// 2. Compile the detail-field patterns
/// 3. Build the HTTP client behind the rate governor
/// 4. Walk the page range, following each listing to its detail page
/// 5. Flush the assembled records as a CSV dataset
///
/// # Arguments
///
/// * `config` - The harvest configuration
/// * `progress_enabled` - Whether to print per-URL progress lines
///
/// # Returns
///
/// * `Ok(RunSummary)` - Harvest finished (individual failures are logged, not fatal)
/// * `Err(HarvestError)` - Setup or final dataset write failed
pub async fn harvest(config: Config, progress_enabled: bool) -> Result<RunSummary, HarvestError> {
    run_harvest(config, progress_enabled).await
}
