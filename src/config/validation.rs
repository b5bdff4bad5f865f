use crate::config::types::{Config, CrawlConfig, OutputConfig, PatternConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_output_config(&config.output)?;
    validate_patterns(&config.patterns)?;
    Ok(())
}

/// Validates crawl configuration
///
/// A reversed page range (end < start) is deliberately accepted: it
/// produces an empty walk and a header-only dataset, not an error.
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start-page must be >= 1, got {}",
            config.start_page
        )));
    }

    if config.request_interval_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "request-interval-seconds must be >= 1, got {}",
            config.request_interval_seconds
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if !config.listing_url_template.contains("{page}") {
        return Err(ConfigError::Validation(format!(
            "listing-url-template must contain a {{page}} placeholder, got '{}'",
            config.listing_url_template
        )));
    }

    // The template must yield a well-formed URL once substituted
    let sample = config.listing_url_template.replace("{page}", "1");
    Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing-url-template: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dataset_path.is_empty() {
        return Err(ConfigError::Validation(
            "dataset-path cannot be empty".to_string(),
        ));
    }

    if config.request_log_path.is_empty() {
        return Err(ConfigError::Validation(
            "request-log-path cannot be empty".to_string(),
        ));
    }

    if config.error_log_path.is_empty() {
        return Err(ConfigError::Validation(
            "error-log-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every detail-field pattern compiles
fn validate_patterns(config: &PatternConfig) -> Result<(), ConfigError> {
    let fields = [
        ("bedrooms", &config.bedrooms),
        ("bathrooms", &config.bathrooms),
        ("sqft", &config.sqft),
        ("description-text", &config.description_text),
        ("year-built", &config.year_built),
        ("parking-spots", &config.parking_spots),
    ];

    for (name, pattern) in fields {
        regex::Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            name: name.to_string(),
            source,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            crawl: CrawlConfig {
                start_page: 1,
                end_page: 10,
                request_interval_seconds: 5,
                user_agent: "TestAgent/1.0".to_string(),
                listing_url_template: "https://rentals.example.com/search?p={page}".to_string(),
            },
            output: OutputConfig {
                dataset_path: "./data/rentals.csv".to_string(),
                request_log_path: "./logs/requests.log".to_string(),
                error_log_path: "./logs/requests_errors.log".to_string(),
            },
            patterns: PatternConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = valid_config();
        config.crawl.request_interval_seconds = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = valid_config();
        config.crawl.user_agent = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut config = valid_config();
        config.crawl.listing_url_template = "https://rentals.example.com/search".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_template_not_a_url_rejected() {
        let mut config = valid_config();
        config.crawl.listing_url_template = "not a url {page}".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_output_path_rejected() {
        let mut config = valid_config();
        config.output.dataset_path = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let mut config = valid_config();
        config.patterns.sqft = "([unclosed".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_reversed_range_accepted() {
        let mut config = valid_config();
        config.crawl.start_page = 9;
        config.crawl.end_page = 3;
        assert!(validate(&config).is_ok());
    }
}
