//! Listing-page walking and JSON-LD extraction
//!
//! Each search-results page embeds one `application/ld+json` block per
//! rental ad, alongside unrelated page-level SEO blocks. Blocks without
//! a `url` key are the latter and are discarded. Summary fields sit at
//! the end of one nested lookup chain, so they are extracted
//! all-or-nothing; the detail-page `url` survives either way.

use crate::record::{ListingSummary, SummaryFields};
use scraper::{Html, Selector};
use serde_json::Value;

/// Builds the search-results URL for a page number
///
/// The template's `{page}` placeholder is validated at config load.
pub fn page_url(template: &str, page: u32) -> String {
    template.replace("{page}", &page.to_string())
}

/// Parses one search-results page body into listing summaries
///
/// Malformed JSON and blocks without a `url` key are expected noise in
/// third-party markup and are dropped silently. A body with zero valid
/// blocks yields an empty vec, never an error.
pub fn parse_listing_page(body: &str) -> Vec<ListingSummary> {
    let document = Html::parse_document(body);

    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    let mut summaries = Vec::new();

    for element in document.select(&selector) {
        let text = element.text().collect::<String>();
        let text = text.trim().replace('\n', "");

        let Ok(value) = serde_json::from_str::<Value>(&text) else {
            continue;
        };

        let Some(url) = value.get("url").and_then(Value::as_str) else {
            continue;
        };

        summaries.push(ListingSummary {
            url: url.to_string(),
            fields: summary_fields(&value),
        });
    }

    summaries
}

// All-or-nothing over the nested chain: the first missing key bails out
// and the whole group is reported absent.
fn summary_fields(value: &Value) -> Option<SummaryFields> {
    let street_address = value.get("name")?.as_str()?.to_string();
    let city = value.pointer("/containedInPlace/name")?.as_str()?.to_string();
    let postal_code = value.pointer("/address/postalCode")?.as_str()?.to_string();
    let price = json_number(value.pointer(
        "/containsPlace/0/potentialAction/priceSpecification/price",
    )?)?;
    let longitude = json_number(value.pointer("/geo/longitude")?)?;
    let latitude = json_number(value.pointer("/geo/latitude")?)?;
    let rental_type = value.pointer("/containsPlace/0/@type")?.as_str()?.to_string();

    Some(SummaryFields {
        street_address,
        city,
        postal_code,
        price,
        longitude,
        latitude,
        rental_type,
    })
}

// The site emits numerics inconsistently as JSON numbers or strings.
fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
