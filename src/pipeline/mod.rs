//! Record normalization and validation
//!
//! Every extracted record passes through here exactly once before emission:
//! text fields are trimmed, required identity fields are checked (absence
//! is a warning, never a rejection), the scrape timestamp is stamped, and
//! the per-run counter is incremented.

mod stats;

pub use stats::{RunStats, StatsSnapshot};

use crate::record::ListingRecord;
use chrono::Utc;
use std::sync::Arc;

/// Fields whose absence degrades record quality enough to warn about
const REQUIRED_FIELDS: [&str; 4] = ["listing_id", "title", "price", "city"];

/// Normalization/validation stage shared by all page handlers
pub struct Pipeline {
    stats: Arc<RunStats>,
}

impl Pipeline {
    pub fn new(stats: Arc<RunStats>) -> Self {
        Self { stats }
    }

    /// Finalizes one record in place
    ///
    /// The record is always kept; validation only logs. `scraped_date` is
    /// stamped here, at processing time, not at fetch time.
    pub fn process(&self, record: &mut ListingRecord) {
        trim_text_fields(record);

        for field in missing_required_fields(record) {
            let context = if record.url.is_empty() {
                "unknown URL"
            } else {
                record.url.as_str()
            };
            tracing::warn!("Record missing required field '{}': {}", field, context);
            self.stats.validation_warning();
        }

        record.scraped_date = Some(Utc::now());
        self.stats.record_processed();
    }
}

/// Trims leading/trailing whitespace on every text field of the record
///
/// The field list is explicit; numeric and boolean fields are untouched.
pub fn trim_text_fields(record: &mut ListingRecord) {
    trim_string(&mut record.url);
    trim_string(&mut record.price_currency);
    trim_string(&mut record.city);
    trim_string(&mut record.description);
    trim_opt(&mut record.listing_id);
    trim_opt(&mut record.title);
    trim_opt(&mut record.district);
    trim_opt(&mut record.property_type);
    trim_opt(&mut record.floor);
    trim_opt(&mut record.seller_name);
    trim_opt(&mut record.posted_date);
}

/// Returns the names of required fields that are falsy on this record
///
/// Falsy means absent, empty after trimming, or zero; mirrors the quality
/// bar of the required set {listing_id, title, price, city}.
pub fn missing_required_fields(record: &ListingRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();

    let absent = [
        record.listing_id.as_deref().map_or(true, str::is_empty),
        record.title.as_deref().map_or(true, str::is_empty),
        record.price.map_or(true, |price| price == 0),
        record.city.is_empty(),
    ];

    for (field, is_missing) in REQUIRED_FIELDS.iter().zip(absent) {
        if is_missing {
            missing.push(*field);
        }
    }

    missing
}

fn trim_string(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn trim_opt(value: &mut Option<String>) {
    if let Some(inner) = value {
        trim_string(inner);
    }
}
