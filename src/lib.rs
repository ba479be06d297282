//! Souk-Harvest: a rental-listing harvester for classifieds sites
//!
//! This crate crawls a classifieds catalog one city at a time, follows
//! listing index pages to property detail pages, extracts structured fields
//! from the markup, and streams normalized records to an output sink.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod record;

use thiserror::Error;

/// Main error type for Souk-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Output sink error: {0}")]
    Sink(#[from] output::SinkError),

    #[error("Page processing error for {url}: {message}")]
    PageProcessing { url: String, message: String },

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
}

/// Result type alias for Souk-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{ListingRecord, SellerType};
