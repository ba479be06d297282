//! Field extraction from property detail pages
//!
//! `extract_listing` turns a parsed detail-page document into a
//! [`ListingRecord`]. It never fails: every field is attempted
//! independently, and a selector that matches nothing simply leaves the
//! field at its absent default. Field semantics:
//!
//! - identity comes from the URL, not the page body
//! - price and images each have a primary and a fallback selector
//! - typed property details come from a label/value scan over the details
//!   list, classified by keyword (French and English synonyms)
//! - seller type is a binary classification with Individual as the default

pub mod dom;
pub mod text;

use crate::config::SiteConfig;
use crate::record::{ListingRecord, SellerType};
use scraper::Html;

const TITLE_SELECTOR: &str = "h1";
const PRICE_SELECTORS: [&str; 2] = ["span.sc-1x0vz2r-0", r#"[class*="price"]"#];
const DISTRICT_SELECTOR: &str = r#"[class*="location"] span"#;
const DETAIL_ROW_SELECTOR: &str = r#"[class*="details"] li"#;
const DESCRIPTION_SELECTOR: &str = r#"[class*="description"] p"#;
const FEATURES_SELECTOR: &str = r#"[class*="features"] li"#;
const IMAGE_SELECTORS: [&str; 2] = [r#"[class*="gallery"] img"#, r#"img[class*="image"]"#];
const SELLER_NAME_SELECTOR: &str = r#"[class*="seller"] [class*="name"]"#;
const SELLER_TYPE_SELECTOR: &str = r#"[class*="seller"] [class*="type"]"#;
const POSTED_DATE_SELECTOR: &str = r#"[class*="date"]"#;

/// Typed fields fed by the label/value scan
enum LabeledField {
    PropertyType,
    SurfaceArea,
    Rooms,
    Bathrooms,
    Floor,
    Furnished,
}

/// Extracts a listing record from a detail-page document
///
/// Pure with respect to the document: the only inputs are the parsed page,
/// the detail-page URL, and the per-run site constants (city, currency).
/// `scraped_date` is left unset; the pipeline stamps it.
pub fn extract_listing(document: &Html, url: &str, site: &SiteConfig) -> ListingRecord {
    let mut record = ListingRecord::new(
        url.to_string(),
        site.city.clone(),
        site.currency.clone(),
    );

    record.listing_id = listing_id_from_url(url);
    record.title = dom::first_text(document, TITLE_SELECTOR);
    record.price =
        dom::first_text_of_any(document, &PRICE_SELECTORS).and_then(|t| text::clean_price(&t));
    record.district = dom::first_text(document, DISTRICT_SELECTOR);

    scan_detail_rows(document, &mut record);

    record.description = dom::all_texts(document, DESCRIPTION_SELECTOR).join(" ");
    record.features = dom::all_texts(document, FEATURES_SELECTOR);
    record.images = dom::all_attrs_of_any(document, &IMAGE_SELECTORS, "src");

    record.seller_name = dom::first_text(document, SELLER_NAME_SELECTOR);
    record.seller_type = classify_seller(dom::first_text(document, SELLER_TYPE_SELECTOR));
    record.posted_date = dom::first_text(document, POSTED_DATE_SELECTOR);

    record
}

/// Derives the listing id from the detail-page URL
///
/// The id is the final `-`-separated token of the last path segment, the
/// site's URL convention for ad identifiers. An empty token yields `None`.
fn listing_id_from_url(url: &str) -> Option<String> {
    let last_segment = url.rsplit('/').next().unwrap_or("");
    let token = last_segment.rsplit('-').next().unwrap_or("");
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Walks the details list and routes each label/value pair to its field
///
/// Labels are lower-cased and matched on keyword substrings, so multiple
/// site phrasings land on one target field. Unrecognized labels are ignored.
fn scan_detail_rows(document: &Html, record: &mut ListingRecord) {
    for row in dom::elements(document, DETAIL_ROW_SELECTOR) {
        let label = dom::first_text_in(&row, "span:first-child");
        let value = dom::first_text_in(&row, "span:last-child");

        let (label, value) = match (label, value) {
            (Some(label), Some(value)) => (label, value),
            _ => continue,
        };

        match classify_label(&label) {
            Some(LabeledField::PropertyType) => record.property_type = Some(value),
            Some(LabeledField::SurfaceArea) => record.surface_area = text::extract_number(&value),
            Some(LabeledField::Rooms) => record.num_rooms = text::extract_number(&value),
            Some(LabeledField::Bathrooms) => record.num_bathrooms = text::extract_number(&value),
            Some(LabeledField::Floor) => record.floor = Some(value),
            Some(LabeledField::Furnished) => {
                let value = value.to_lowercase();
                record.furnished = Some(value.contains("oui") || value.contains("yes"));
            }
            None => {}
        }
    }
}

/// Maps a detail-row label to the field its value belongs to
///
/// Keyword sets carry both accented and unaccented variants, so markup that
/// drops diacritics still classifies.
fn classify_label(label: &str) -> Option<LabeledField> {
    let label = label.to_lowercase();

    if label.contains("type") || label.contains("catégorie") || label.contains("categorie") {
        Some(LabeledField::PropertyType)
    } else if label.contains("surface") || label.contains("superficie") {
        Some(LabeledField::SurfaceArea)
    } else if label.contains("pièce") || label.contains("piece") || label.contains("chambre") {
        Some(LabeledField::Rooms)
    } else if (label.contains("salle") && label.contains("bain")) || label.contains("bathroom") {
        Some(LabeledField::Bathrooms)
    } else if label.contains("étage") || label.contains("etage") || label.contains("floor") {
        Some(LabeledField::Floor)
    } else if label.contains("meublé") || label.contains("meuble") || label.contains("furnished") {
        Some(LabeledField::Furnished)
    } else {
        None
    }
}

/// Professional iff the seller-type text contains "pro", case-insensitively
///
/// No text at all means Individual; that is the default, not a missing value.
fn classify_seller(text: Option<String>) -> SellerType {
    match text {
        Some(text) if text.to_lowercase().contains("pro") => SellerType::Professional,
        _ => SellerType::Individual,
    }
}
