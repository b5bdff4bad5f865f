//! Data model for harvested listings
//!
//! A listing's fields arrive from two sources: the JSON-LD block on the
//! search-results page (summary fields) and the client-state payload on
//! the ad's own page (detail fields). The two occupy disjoint slots of
//! the final [`ListingRecord`]; `None` is the explicit missing marker,
//! kept distinct from any observed zero or empty string.

/// Summary fields extracted from a listing's JSON-LD block
///
/// The source representation is a single nested lookup chain, so these
/// are extracted all-or-nothing: one missing key discards the whole
/// group (see [`crate::crawler::parse_listing_page`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryFields {
    pub street_address: String,
    pub city: String,
    pub postal_code: String,
    pub price: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub rental_type: String,
}

/// One listing discovered on a search-results page
///
/// The detail-page URL is kept even when the summary-field chain broke,
/// so the detail fetch can still proceed.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSummary {
    pub url: String,
    pub fields: Option<SummaryFields>,
}

/// Fields mined from a listing's detail-page payload
///
/// Each field is matched by its own pattern, independently of the
/// others; a miss leaves that slot `None` and nothing else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFields {
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub sqft: Option<f64>,
    pub description_text: Option<String>,
    pub year_built: Option<i32>,
    /// Free text on the source site, not guaranteed numeric
    pub parking_spots: Option<String>,
}

/// One row of the output dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRecord {
    pub price: Option<f64>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub rental_type: Option<String>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub sqft: Option<f64>,
    pub year_built: Option<i32>,
    pub parking_spots: Option<String>,
    pub description_text: Option<String>,
}

/// Merges summary and detail fields into one record
///
/// Pure and total: any combination of present and absent fields yields
/// a record with all thirteen slots, each either a value or `None`.
pub fn assemble(summary: ListingSummary, detail: DetailFields) -> ListingRecord {
    let mut record = ListingRecord {
        bedrooms: detail.bedrooms,
        bathrooms: detail.bathrooms,
        sqft: detail.sqft,
        description_text: detail.description_text,
        year_built: detail.year_built,
        parking_spots: detail.parking_spots,
        ..Default::default()
    };

    if let Some(fields) = summary.fields {
        record.price = Some(fields.price);
        record.street_address = Some(fields.street_address);
        record.city = Some(fields.city);
        record.postal_code = Some(fields.postal_code);
        record.longitude = Some(fields.longitude);
        record.latitude = Some(fields.latitude);
        record.rental_type = Some(fields.rental_type);
    }

    record
}
