use serde::Deserialize;

/// Main configuration structure for Souk-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Crawl-target configuration
///
/// One configuration describes one catalog and one city; a crawl run never
/// mixes cities or currencies.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base catalog URL for the property category being harvested
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Query string appended to the base URL to filter the catalog to one
    /// city (e.g. "cities=3")
    #[serde(rename = "city-filter", default)]
    pub city_filter: String,

    /// Human-readable city name stamped on every record
    pub city: String,

    /// Currency code stamped on every record
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl SiteConfig {
    /// The URL of listing page 1, with the city filter applied
    pub fn start_url(&self) -> String {
        if self.city_filter.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}?{}", self.base_url, self.city_filter)
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent in-flight fetches
    #[serde(rename = "max-concurrent-fetches", default = "default_max_concurrent")]
    pub max_concurrent_fetches: u32,

    /// Minimum time between requests to the same host (milliseconds)
    #[serde(rename = "per-host-delay", default = "default_per_host_delay")]
    pub per_host_delay: u64,

    /// How many times a retryable response is re-requested
    #[serde(rename = "retry-times", default = "default_retry_times")]
    pub retry_times: u32,

    /// Delay between retry attempts (milliseconds)
    #[serde(rename = "retry-delay", default = "default_retry_delay")]
    pub retry_delay: u64,

    /// HTTP status codes that trigger a retry
    #[serde(rename = "retry-status-codes", default = "default_retry_status_codes")]
    pub retry_status_codes: Vec<u16>,

    /// User-agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON Lines file records are streamed to
    #[serde(rename = "records-path")]
    pub records_path: String,
}

fn default_currency() -> String {
    "DH".to_string()
}

fn default_max_concurrent() -> u32 {
    8
}

fn default_per_host_delay() -> u64 {
    2000
}

fn default_retry_times() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    5000
}

fn default_retry_status_codes() -> Vec<u16> {
    vec![500, 502, 503, 504, 522, 524, 408, 429]
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}
