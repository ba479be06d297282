//! The listing record: the crate's sole unit of output
//!
//! One record is built per detail page visited, populated in a single pass,
//! and handed to the output sink immediately. There is no in-memory
//! persistence and no cross-record joining.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether a listing was posted by an agency or a private party
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SellerType {
    Professional,
    #[default]
    Individual,
}

/// A single rental-property listing scraped from a detail page
///
/// Optional fields are `None` when the source page simply doesn't carry the
/// element; that is an expected outcome, not an error. `scraped_date` stays
/// `None` until the normalization pipeline stamps it.
#[derive(Debug, Clone, Serialize)]
pub struct ListingRecord {
    // Identity
    pub listing_id: Option<String>,
    pub url: String,

    // Basic information
    pub title: Option<String>,
    pub price: Option<i64>,
    pub price_currency: String,

    // Location
    pub city: String,
    pub district: Option<String>,

    // Property details
    pub property_type: Option<String>,
    pub surface_area: Option<u32>,
    pub num_rooms: Option<u32>,
    pub num_bathrooms: Option<u32>,
    pub floor: Option<String>,
    pub furnished: Option<bool>,

    // Free-form content
    pub features: Vec<String>,
    pub description: String,
    pub images: Vec<String>,

    // Seller
    pub seller_name: Option<String>,
    pub seller_type: SellerType,

    // Dates
    pub posted_date: Option<String>,
    pub scraped_date: Option<DateTime<Utc>>,
}

impl ListingRecord {
    /// Creates an empty record for the given detail-page URL
    ///
    /// City and currency are fixed per crawl run; everything else starts at
    /// its absent default and is filled in by the extractor.
    pub fn new(url: String, city: String, currency: String) -> Self {
        Self {
            listing_id: None,
            url,
            title: None,
            price: None,
            price_currency: currency,
            city,
            district: None,
            property_type: None,
            surface_area: None,
            num_rooms: None,
            num_bathrooms: None,
            floor: None,
            furnished: None,
            features: Vec::new(),
            description: String::new(),
            images: Vec::new(),
            seller_name: None,
            seller_type: SellerType::default(),
            posted_date: None,
            scraped_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = ListingRecord::new(
            "https://example.com/listing-1".to_string(),
            "Casablanca".to_string(),
            "DH".to_string(),
        );

        assert_eq!(record.url, "https://example.com/listing-1");
        assert_eq!(record.city, "Casablanca");
        assert_eq!(record.price_currency, "DH");
        assert!(record.listing_id.is_none());
        assert!(record.price.is_none());
        assert!(record.features.is_empty());
        assert!(record.images.is_empty());
        assert_eq!(record.description, "");
        assert_eq!(record.seller_type, SellerType::Individual);
        assert!(record.scraped_date.is_none());
    }

    #[test]
    fn test_seller_type_default_is_individual() {
        assert_eq!(SellerType::default(), SellerType::Individual);
    }

    #[test]
    fn test_record_serializes_to_json() {
        let mut record = ListingRecord::new(
            "https://example.com/listing-42".to_string(),
            "Casablanca".to_string(),
            "DH".to_string(),
        );
        record.listing_id = Some("42".to_string());
        record.price = Some(4500);
        record.seller_type = SellerType::Professional;

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["listing_id"], "42");
        assert_eq!(json["price"], 4500);
        assert_eq!(json["seller_type"], "Professional");
        assert_eq!(json["title"], serde_json::Value::Null);
        assert!(json["images"].as_array().unwrap().is_empty());
    }
}
