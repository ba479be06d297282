//! Crawl coordinator
//!
//! Drives the whole traversal: seeds listing page 1, keeps a bounded set of
//! fetches in flight, and routes each completed fetch by page kind.
//! Listing pages produce new work (detail fetches, the next listing page);
//! detail pages produce records through the extractor, the pipeline, and
//! the sink. Every enqueue passes a visited-URL guard, so duplicate links
//! and cyclic pagination cannot loop the crawl.
//!
//! Page-level problems never stop the run; they are logged against the URL
//! and the remaining work continues.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::parser::discover_links;
use crate::crawler::scheduler::{NextFetch, PageKind, QueuedFetch, Scheduler};
use crate::extract::extract_listing;
use crate::output::{JsonLinesSink, RecordSink};
use crate::pipeline::{Pipeline, RunStats};
use crate::{HarvestError, Result};
use reqwest::Client;
use scraper::Html;
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{JoinError, JoinSet};
use url::Url;

/// Fallback poll interval when the scheduler reports no precise wait
const IDLE_POLL: Duration = Duration::from_millis(50);

/// A completed fetch, handed back from a worker task
struct FetchedPage {
    fetch: QueuedFetch,
    result: FetchResult,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    scheduler: Scheduler,
    visited: HashSet<String>,
    sink: Box<dyn RecordSink>,
    pipeline: Pipeline,
    stats: Arc<RunStats>,
    shutdown: Arc<AtomicBool>,
}

impl Coordinator {
    /// Creates a coordinator writing records to the configured JSONL path
    pub fn new(config: Config) -> Result<Self> {
        let sink = JsonLinesSink::create(Path::new(&config.output.records_path))
            .map_err(HarvestError::Sink)?;
        Self::with_sink(config, Box::new(sink))
    }

    /// Creates a coordinator with a caller-supplied record sink
    pub fn with_sink(config: Config, sink: Box<dyn RecordSink>) -> Result<Self> {
        let client = build_http_client(&config.crawler)?;
        let scheduler = Scheduler::new(Duration::from_millis(config.crawler.per_host_delay));
        let stats = Arc::new(RunStats::new());
        let pipeline = Pipeline::new(Arc::clone(&stats));

        let mut coordinator = Self {
            config: Arc::new(config),
            client,
            scheduler,
            visited: HashSet::new(),
            sink,
            pipeline,
            stats,
            shutdown: Arc::new(AtomicBool::new(false)),
        };

        let start = Url::parse(&coordinator.config.site.start_url())?;
        coordinator.schedule(QueuedFetch {
            url: start,
            kind: PageKind::Listing,
            page_number: 1,
        });

        Ok(coordinator)
    }

    /// Handle that aborts the run when set
    ///
    /// Setting the flag stops new fetches from being issued; fetches already
    /// in flight drain normally and their records are still emitted.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Snapshot of the run counters
    pub fn stats(&self) -> Arc<RunStats> {
        Arc::clone(&self.stats)
    }

    /// Runs the crawl to completion
    ///
    /// Terminates when the frontier is empty and no fetch is in flight, or
    /// when a shutdown was requested and the in-flight fetches have drained.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(
            "Starting crawl of {} ({})",
            self.config.site.start_url(),
            self.config.site.city
        );

        let started = Instant::now();
        let mut tasks: JoinSet<FetchedPage> = JoinSet::new();
        let cap = self.config.crawler.max_concurrent_fetches as usize;

        loop {
            let mut wait = None;

            if !self.shutdown_requested() {
                while tasks.len() < cap {
                    match self.scheduler.next_ready(Instant::now()) {
                        NextFetch::Ready(fetch) => self.spawn_fetch(&mut tasks, fetch),
                        NextFetch::Wait(duration) => {
                            wait = Some(duration);
                            break;
                        }
                        NextFetch::Empty => break,
                    }
                }
            }

            if tasks.is_empty() {
                if self.shutdown_requested() || self.scheduler.is_empty() {
                    break;
                }
                // Work is queued but its host is cooling down.
                tokio::time::sleep(wait.unwrap_or(IDLE_POLL)).await;
                continue;
            }

            // Wake on the next completion, or once the politeness clock
            // frees another slot.
            let can_spawn_more =
                !self.shutdown_requested() && tasks.len() < cap && !self.scheduler.is_empty();
            if can_spawn_more {
                let sleep_for = wait.unwrap_or(IDLE_POLL);
                tokio::select! {
                    joined = tasks.join_next() => self.handle_joined(joined),
                    _ = tokio::time::sleep(sleep_for) => {}
                }
            } else {
                let joined = tasks.join_next().await;
                self.handle_joined(joined);
            }
        }

        self.sink.finalize().map_err(HarvestError::Sink)?;

        if self.shutdown_requested() {
            tracing::info!("Crawl aborted after {:?}", started.elapsed());
        } else {
            tracing::info!("Crawl completed in {:?}", started.elapsed());
        }
        self.stats.snapshot().log_report();

        Ok(())
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Enqueues a fetch unless its URL was already seen this run
    fn schedule(&mut self, fetch: QueuedFetch) {
        if self.visited.insert(fetch.url.to_string()) {
            self.scheduler.enqueue(fetch);
        } else {
            tracing::debug!("Skipping already-visited URL {}", fetch.url);
        }
    }

    fn spawn_fetch(&self, tasks: &mut JoinSet<FetchedPage>, fetch: QueuedFetch) {
        tracing::debug!("Fetching {:?} page {}", fetch.kind, fetch.url);
        let client = self.client.clone();
        let config = Arc::clone(&self.config);
        tasks.spawn(async move {
            let result = fetch_page(&client, fetch.url.as_str(), &config.crawler).await;
            FetchedPage { fetch, result }
        });
    }

    fn handle_joined(&mut self, joined: Option<std::result::Result<FetchedPage, JoinError>>) {
        match joined {
            None => {}
            Some(Err(e)) => tracing::error!("Fetch task failed: {}", e),
            Some(Ok(page)) => {
                let url = page.fetch.url.clone();
                if let Err(e) = self.process_page(page) {
                    tracing::error!("Error processing {}: {}", url, e);
                }
            }
        }
    }

    /// Routes one completed fetch by page kind
    fn process_page(&mut self, page: FetchedPage) -> Result<()> {
        match page.result {
            FetchResult::Success {
                final_url, body, ..
            } => {
                self.stats.page_fetched();
                match page.fetch.kind {
                    PageKind::Listing => self.process_listing(&page.fetch, &final_url, &body),
                    PageKind::Detail => self.process_detail(&page.fetch, &body)?,
                }
            }
            FetchResult::HttpError { status_code } => {
                self.stats.fetch_failure();
                if status_code == 403 || status_code == 429 {
                    self.stats.blocked_response();
                }
                tracing::warn!("Fetch of {} failed with HTTP {}", page.fetch.url, status_code);
            }
            FetchResult::NetworkError { error } => {
                self.stats.fetch_failure();
                tracing::warn!("Network error fetching {}: {}", page.fetch.url, error);
            }
        }

        Ok(())
    }

    /// Listing page: discover detail links and the next page
    fn process_listing(&mut self, fetch: &QueuedFetch, final_url: &str, body: &str) {
        let base = Url::parse(final_url).unwrap_or_else(|_| fetch.url.clone());
        let links = discover_links(body, &base);

        if links.detail_urls.is_empty() {
            tracing::warn!(
                "No detail links found on listing page {} (page {})",
                fetch.url,
                fetch.page_number
            );
        } else {
            tracing::info!(
                "Listing page {} yielded {} detail links",
                fetch.page_number,
                links.detail_urls.len()
            );
        }

        for url in links.detail_urls {
            self.schedule(QueuedFetch {
                url,
                kind: PageKind::Detail,
                page_number: fetch.page_number,
            });
        }

        if let Some(next) = links.next_page {
            self.schedule(QueuedFetch {
                url: next,
                kind: PageKind::Listing,
                page_number: fetch.page_number + 1,
            });
        }
    }

    /// Detail page: extract, normalize, emit
    fn process_detail(&mut self, fetch: &QueuedFetch, body: &str) -> Result<()> {
        let document = Html::parse_document(body);
        let mut record = extract_listing(&document, fetch.url.as_str(), &self.config.site);
        self.pipeline.process(&mut record);
        self.sink.emit(&record).map_err(HarvestError::Sink)?;
        tracing::debug!(
            "Emitted record {} ({})",
            record.listing_id.as_deref().unwrap_or("?"),
            fetch.url
        );
        Ok(())
    }
}

/// Runs a crawl with Ctrl-C wired to a graceful abort
pub async fn run_crawl(config: Config) -> Result<()> {
    let mut coordinator = Coordinator::new(config)?;

    let shutdown = coordinator.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing in-flight fetches");
            shutdown.store(true, Ordering::SeqCst);
        }
    });

    coordinator.run().await
}
