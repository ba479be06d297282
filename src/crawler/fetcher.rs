//! HTTP fetcher
//!
//! All transport policy lives here: client construction, timeouts, retry on
//! configured status codes, and the 403/429 "possibly blocked" warning. The
//! rest of the crawler only ever sees a [`FetchResult`] and never branches
//! on retry behavior.

use crate::config::CrawlerConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status (after any retries)
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network-level failure (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with the configured user agent and fixed timeouts
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying configured status codes and timeouts
///
/// Statuses listed in `retry-status-codes` are re-requested up to
/// `retry-times` with `retry-delay` between attempts. 403 and 429 are
/// additionally logged as a possible block signal; that logging is
/// observability only and changes nothing about control flow.
pub async fn fetch_page(client: &Client, url: &str, config: &CrawlerConfig) -> FetchResult {
    let mut attempt = 0;

    loop {
        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                let status_code = status.as_u16();

                if status_code == 403 || status_code == 429 {
                    tracing::warn!(
                        "Received status {} for {}. May be blocked or rate limited.",
                        status_code,
                        url
                    );
                }

                if config.retry_status_codes.contains(&status_code) && attempt < config.retry_times
                {
                    attempt += 1;
                    tracing::debug!(
                        "Retrying {} after HTTP {} (attempt {}/{})",
                        url,
                        status_code,
                        attempt,
                        config.retry_times
                    );
                    tokio::time::sleep(Duration::from_millis(config.retry_delay)).await;
                    continue;
                }

                if !status.is_success() {
                    return FetchResult::HttpError { status_code };
                }

                let final_url = response.url().to_string();
                return match response.text().await {
                    Ok(body) => FetchResult::Success {
                        final_url,
                        status_code,
                        body,
                    },
                    Err(e) => FetchResult::NetworkError {
                        error: e.to_string(),
                    },
                };
            }
            Err(e) => {
                if e.is_timeout() && attempt < config.retry_times {
                    attempt += 1;
                    tracing::debug!(
                        "Retrying {} after timeout (attempt {}/{})",
                        url,
                        attempt,
                        config.retry_times
                    );
                    tokio::time::sleep(Duration::from_millis(config.retry_delay)).await;
                    continue;
                }

                let error = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    "Connection refused".to_string()
                } else {
                    e.to_string()
                };

                return FetchResult::NetworkError { error };
            }
        }
    }
}
