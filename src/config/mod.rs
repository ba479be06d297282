//! Configuration loading and validation
//!
//! Run parameters live in a TOML file: the crawl target (`[site]`), fetch
//! behavior (`[crawler]`), and the records destination (`[output]`). The
//! file is validated up front so a bad configuration fails before any
//! request is made.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, OutputConfig, SiteConfig};
pub use validation::validate;
