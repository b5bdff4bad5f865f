//! CSV dataset sink
//!
//! Records accumulate in memory for the whole run and are written once
//! at the end, one row per listing, missing fields as empty cells. The
//! csv writer handles quoting of values that contain the delimiter.

use crate::record::ListingRecord;
use crate::HarvestError;
use std::path::Path;

/// Column order of the output dataset; fixed and deterministic
pub const COLUMNS: [&str; 13] = [
    "price",
    "street_address",
    "city",
    "postal_code",
    "longitude",
    "latitude",
    "rental_type",
    "bedrooms",
    "bathrooms",
    "sqft",
    "year_built",
    "parking_spots",
    "description_text",
];

/// In-memory accumulator for the run's output rows
#[derive(Default)]
pub struct DatasetSink {
    records: Vec<ListingRecord>,
}

impl DatasetSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers one assembled record
    pub fn append(&mut self, record: ListingRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes all accumulated records to `path`
    ///
    /// Called exactly once per run, including after an interrupt. Zero
    /// records still produce a header-only file.
    pub fn flush(&self, path: &Path) -> Result<(), HarvestError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(COLUMNS)?;
        for record in &self.records {
            writer.write_record(fields(record))?;
        }
        writer.flush()?;

        Ok(())
    }
}

// Missing marker renders as an empty cell, distinct from "0" or '""'.
fn fields(record: &ListingRecord) -> [String; 13] {
    [
        opt_num(record.price),
        opt_text(&record.street_address),
        opt_text(&record.city),
        opt_text(&record.postal_code),
        opt_num(record.longitude),
        opt_num(record.latitude),
        opt_text(&record.rental_type),
        opt_num(record.bedrooms),
        opt_num(record.bathrooms),
        opt_num(record.sqft),
        record.year_built.map(|y| y.to_string()).unwrap_or_default(),
        opt_text(&record.parking_spots),
        opt_text(&record.description_text),
    ]
}

fn opt_num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn opt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
