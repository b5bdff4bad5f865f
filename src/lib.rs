//! Rental-Harvest: a listing-site crawler for rental ads
//!
//! This crate implements a two-stage crawler that walks the paginated
//! search results of a rental-listing site, follows each ad to its own
//! detail page, and materializes one CSV row per listing. All outbound
//! requests are spaced by a single global rate governor.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Rental-Harvest operations
///
/// Individual page or listing failures never surface here; they are
/// logged and skipped. These variants cover setup failures and the
/// final dataset write only.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid field pattern '{name}': {source}")]
    InvalidPattern { name: String, source: regex::Error },
}

/// Result type alias for Rental-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{assemble, DetailFields, ListingRecord, ListingSummary, SummaryFields};
