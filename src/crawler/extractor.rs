//! Detail-page field extraction
//!
//! A listing's own page carries a client-state payload in its second
//! `text/javascript` script block. Six fields are mined from it, each
//! by its own pattern, each independently: a pattern that fails to
//! match leaves its field absent and touches nothing else. The payload
//! schema is an undocumented artifact of the source site and breaks
//! silently on site changes, which is why the patterns live in
//! configuration.

use crate::config::PatternConfig;
use crate::record::DetailFields;
use crate::ConfigError;
use regex::Regex;
use scraper::{Html, Selector};
use std::str::FromStr;

/// Compiled detail-field patterns
pub struct DetailPatterns {
    bedrooms: Regex,
    bathrooms: Regex,
    sqft: Regex,
    description_text: Regex,
    year_built: Regex,
    parking_spots: Regex,
}

impl DetailPatterns {
    /// Compiles the configured patterns
    ///
    /// A pattern that does not compile is a setup failure; nothing has
    /// been fetched yet at that point.
    pub fn compile(config: &PatternConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            bedrooms: compile_one("bedrooms", &config.bedrooms)?,
            bathrooms: compile_one("bathrooms", &config.bathrooms)?,
            sqft: compile_one("sqft", &config.sqft)?,
            description_text: compile_one("description-text", &config.description_text)?,
            year_built: compile_one("year-built", &config.year_built)?,
            parking_spots: compile_one("parking-spots", &config.parking_spots)?,
        })
    }

    /// Mines the detail fields out of a detail-page body
    ///
    /// Missing second script block, malformed payload, or any subset of
    /// non-matching patterns all degrade to absent fields, never to an
    /// error.
    pub fn extract(&self, body: &str) -> DetailFields {
        let Some(payload) = client_payload(body) else {
            return DetailFields::default();
        };

        DetailFields {
            bedrooms: capture_parsed(&self.bedrooms, &payload),
            bathrooms: capture_parsed(&self.bathrooms, &payload),
            sqft: capture_parsed(&self.sqft, &payload),
            description_text: capture(&self.description_text, &payload),
            year_built: capture_parsed(&self.year_built, &payload),
            parking_spots: capture(&self.parking_spots, &payload),
        }
    }
}

fn capture_parsed<T: FromStr>(pattern: &Regex, payload: &str) -> Option<T> {
    capture(pattern, payload)?.parse().ok()
}

fn compile_one(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        name: name.to_string(),
        source,
    })
}

fn capture(pattern: &Regex, payload: &str) -> Option<String> {
    pattern
        .captures(payload)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

// The client-state payload is the second text/javascript block; the
// first holds unrelated bootstrap code.
fn client_payload(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse(r#"script[type="text/javascript"]"#).ok()?;

    document
        .select(&selector)
        .nth(1)
        .map(|element| element.text().collect::<String>().replace('\n', "").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> DetailPatterns {
        DetailPatterns::compile(&PatternConfig::default()).unwrap()
    }

    fn detail_page(payload: &str) -> String {
        format!(
            r#"<html><body>
            <script type="text/javascript">var bootstrap = true;</script>
            <script type="text/javascript">{}</script>
            </body></html>"#,
            payload
        )
    }

    const FULL_PAYLOAD: &str = r#"var App = {"beds": 2.0, "baths": 1.0,
        "dimensions": 850.0,
        "description_text": "Bright corner unit", "description_blurb": "Bright...",
        "questions": [{"answer": 1998, "answer_label": "Year Built"},
                      {"answer": "1 underground", "answer_label": "Parking Spots"}]};"#;

    #[test]
    fn test_extract_all_fields() {
        let fields = patterns().extract(&detail_page(FULL_PAYLOAD));
        assert_eq!(fields.bedrooms, Some(2.0));
        assert_eq!(fields.bathrooms, Some(1.0));
        assert_eq!(fields.sqft, Some(850.0));
        assert_eq!(fields.description_text.as_deref(), Some("Bright corner unit"));
        assert_eq!(fields.year_built, Some(1998));
        assert_eq!(fields.parking_spots.as_deref(), Some("1 underground"));
    }

    #[test]
    fn test_missing_field_leaves_others_intact() {
        let payload = FULL_PAYLOAD.replace(r#""beds": 2.0, "#, "");
        let fields = patterns().extract(&detail_page(&payload));
        assert_eq!(fields.bedrooms, None);
        assert_eq!(fields.bathrooms, Some(1.0));
        assert_eq!(fields.sqft, Some(850.0));
        assert_eq!(fields.year_built, Some(1998));
    }

    #[test]
    fn test_no_second_script_block_yields_empty() {
        let body = r#"<html><body>
            <script type="text/javascript">var bootstrap = true;</script>
            </body></html>"#;
        assert_eq!(patterns().extract(body), DetailFields::default());
    }

    #[test]
    fn test_no_script_blocks_yields_empty() {
        let body = "<html><body><p>Nothing embedded</p></body></html>";
        assert_eq!(patterns().extract(body), DetailFields::default());
    }

    #[test]
    fn test_malformed_payload_yields_empty_fields() {
        let fields = patterns().extract(&detail_page("window.x = 1;"));
        assert_eq!(fields, DetailFields::default());
    }

    #[test]
    fn test_payload_with_newlines_still_matches() {
        let payload = FULL_PAYLOAD.replace(", ", ",\n");
        // The description pattern spans the comma-separated pair, so
        // only check the single-key fields here.
        let fields = patterns().extract(&detail_page(&payload));
        assert_eq!(fields.bedrooms, Some(2.0));
        assert_eq!(fields.sqft, Some(850.0));
    }

    #[test]
    fn test_bad_pattern_is_setup_error() {
        let mut config = PatternConfig::default();
        config.year_built = "([unclosed".to_string();
        assert!(matches!(
            DetailPatterns::compile(&config),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
