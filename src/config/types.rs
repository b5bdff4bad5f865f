use serde::Deserialize;

/// Main configuration structure for Rental-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub patterns: PatternConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// First listing page to visit (1-based)
    #[serde(rename = "start-page", default = "default_start_page")]
    pub start_page: u32,

    /// Last listing page to visit, inclusive
    #[serde(rename = "end-page")]
    pub end_page: u32,

    /// Minimum spacing between any two outbound requests, in seconds
    #[serde(rename = "request-interval-seconds", default = "default_interval")]
    pub request_interval_seconds: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Search-results URL template; `{page}` is replaced by the page number
    #[serde(rename = "listing-url-template")]
    pub listing_url_template: String,
}

/// Output path configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV dataset written at the end of the run
    #[serde(rename = "dataset-path")]
    pub dataset_path: String,

    /// Append-only log of every request attempt
    #[serde(rename = "request-log-path")]
    pub request_log_path: String,

    /// Append-only log of failed request attempts only
    #[serde(rename = "error-log-path")]
    pub error_log_path: String,
}

/// Text patterns mined from the detail page's client-state payload
///
/// The payload schema is an undocumented, versioned artifact of the
/// source site, so the patterns are configuration rather than
/// constants. Each captures its field value in group 1.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub bedrooms: String,
    pub bathrooms: String,
    pub sqft: String,
    #[serde(rename = "description-text")]
    pub description_text: String,
    #[serde(rename = "year-built")]
    pub year_built: String,
    #[serde(rename = "parking-spots")]
    pub parking_spots: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            bedrooms: r#""beds": ([0-9]\.0)"#.to_string(),
            bathrooms: r#""baths": ([0-9]\.0)"#.to_string(),
            sqft: r#""dimensions": ([0-9]*\.0)"#.to_string(),
            description_text: r#""description_text": "(.*)", "description_blurb""#.to_string(),
            year_built: r#""answer": ([0-9]+), "answer_label": "Year Built""#.to_string(),
            parking_spots: r#""answer": "(.+)", "answer_label": "Parking Spots""#.to_string(),
        }
    }
}

fn default_start_page() -> u32 {
    1
}

fn default_interval() -> u64 {
    5
}

fn default_user_agent() -> String {
    // Impersonates a common desktop browser; the site serves crawlers
    // differently otherwise.
    "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/41.0.2228.0 Safari/537.36"
        .to_string()
}
