use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl-target configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.city.trim().is_empty() {
        return Err(ConfigError::Validation("city cannot be empty".to_string()));
    }

    if config.currency.trim().is_empty() {
        return Err(ConfigError::Validation(
            "currency cannot be empty".to_string(),
        ));
    }

    // The filter is appended verbatim as a query string; a stray '?' would
    // produce a malformed URL.
    if config.city_filter.contains('?') {
        return Err(ConfigError::Validation(format!(
            "city-filter must be a bare query string without '?', got '{}'",
            config.city_filter
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.retry_times > 10 {
        return Err(ConfigError::Validation(format!(
            "retry_times must be <= 10, got {}",
            config.retry_times
        )));
    }

    for code in &config.retry_status_codes {
        if *code < 100 || *code > 599 {
            return Err(ConfigError::Validation(format!(
                "retry-status-codes entries must be valid HTTP statuses, got {}",
                code
            )));
        }
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.records_path.is_empty() {
        return Err(ConfigError::Validation(
            "records_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            site: SiteConfig {
                base_url: "https://classifieds.example/fr/rentals".to_string(),
                city_filter: "cities=3".to_string(),
                city: "Casablanca".to_string(),
                currency: "DH".to_string(),
            },
            crawler: CrawlerConfig {
                max_concurrent_fetches: 8,
                per_host_delay: 2000,
                retry_times: 3,
                retry_delay: 5000,
                retry_status_codes: vec![500, 502, 503, 504, 408, 429],
                user_agent: "TestAgent/1.0".to_string(),
            },
            output: OutputConfig {
                records_path: "./listings.jsonl".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = valid_config();
        config.site.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = valid_config();
        config.site.base_url = "ftp://classifieds.example/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_city_rejected() {
        let mut config = valid_config();
        config.site.city = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_city_filter_with_question_mark_rejected() {
        let mut config = valid_config();
        config.site.city_filter = "?cities=3".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = valid_config();
        config.crawler.max_concurrent_fetches = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bogus_retry_code_rejected() {
        let mut config = valid_config();
        config.crawler.retry_status_codes.push(9000);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_records_path_rejected() {
        let mut config = valid_config();
        config.output.records_path = String::new();
        assert!(validate(&config).is_err());
    }
}
