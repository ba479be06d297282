//! Frontier queue and per-host politeness
//!
//! The scheduler owns two things: the priority-ordered frontier of fetches
//! waiting to be dispatched, and the per-host request timing that keeps the
//! crawl polite. Detail pages are dispatched before further listing pages
//! so discovered work drains instead of piling up behind pagination.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};
use url::Url;

/// The two page kinds the traversal distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A catalog index page: link discovery only
    Listing,
    /// A property detail page: field extraction
    Detail,
}

/// A fetch waiting in the frontier
///
/// `page_number` is the listing-page index this fetch belongs to; detail
/// fetches inherit the number of the page they were discovered on.
#[derive(Debug, Clone)]
pub struct QueuedFetch {
    pub url: Url,
    pub kind: PageKind,
    pub page_number: u32,
}

impl QueuedFetch {
    /// Lower values dispatch first
    fn priority(&self) -> u32 {
        match self.kind {
            PageKind::Detail => 0,
            PageKind::Listing => 10,
        }
    }
}

// Lower priority values are popped first from the BinaryHeap; ties break on
// the URL string so ordering is deterministic.
impl Ord for QueuedFetch {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority()
            .cmp(&self.priority())
            .then_with(|| other.url.as_str().cmp(self.url.as_str()))
    }
}

impl PartialOrd for QueuedFetch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedFetch {
    fn eq(&self, other: &Self) -> bool {
        self.priority() == other.priority() && self.url == other.url
    }
}

impl Eq for QueuedFetch {}

/// Request timing for one host
#[derive(Debug, Clone, Default)]
struct HostState {
    request_count: u32,
    last_request_time: Option<Instant>,
}

impl HostState {
    fn can_request(&self, delay: Duration, now: Instant) -> bool {
        match self.last_request_time {
            Some(last) => now.duration_since(last) >= delay,
            None => true,
        }
    }

    fn time_until_ready(&self, delay: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.duration_since(last);
        if elapsed < delay {
            Some(delay - elapsed)
        } else {
            None
        }
    }

    fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(now);
    }
}

/// Outcome of asking the scheduler for work
#[derive(Debug)]
pub enum NextFetch {
    /// A fetch whose host is ready now; it counts as dispatched
    Ready(QueuedFetch),
    /// Work exists but every host needs this much more cooldown
    Wait(Duration),
    /// The frontier is empty
    Empty,
}

/// Frontier queue with per-host politeness
pub struct Scheduler {
    frontier: BinaryHeap<QueuedFetch>,
    hosts: HashMap<String, HostState>,
    per_host_delay: Duration,
}

impl Scheduler {
    pub fn new(per_host_delay: Duration) -> Self {
        Self {
            frontier: BinaryHeap::new(),
            hosts: HashMap::new(),
            per_host_delay,
        }
    }

    /// Adds a fetch to the frontier
    pub fn enqueue(&mut self, fetch: QueuedFetch) {
        self.frontier.push(fetch);
    }

    /// Hands out the highest-priority fetch whose host is ready
    ///
    /// A returned `Ready` fetch is recorded against its host immediately, so
    /// the politeness clock starts at hand-out time. When no host is ready
    /// the caller gets the minimum wait before one will be.
    pub fn next_ready(&mut self, now: Instant) -> NextFetch {
        if self.frontier.is_empty() {
            return NextFetch::Empty;
        }

        let mut not_ready = Vec::new();
        let mut found = None;

        while let Some(fetch) = self.frontier.pop() {
            let host = host_of(&fetch.url);
            let state = self.hosts.entry(host).or_default();

            if state.can_request(self.per_host_delay, now) {
                state.record_request(now);
                found = Some(fetch);
                break;
            }
            not_ready.push(fetch);
        }

        for fetch in not_ready {
            self.frontier.push(fetch);
        }

        match found {
            Some(fetch) => NextFetch::Ready(fetch),
            None => NextFetch::Wait(self.minimum_wait(now)),
        }
    }

    /// Minimum cooldown remaining across the hosts in the frontier
    fn minimum_wait(&self, now: Instant) -> Duration {
        let mut min_wait = self.per_host_delay;

        for fetch in self.frontier.iter() {
            match self.hosts.get(&host_of(&fetch.url)) {
                Some(state) => {
                    if let Some(wait) = state.time_until_ready(self.per_host_delay, now) {
                        if wait < min_wait {
                            min_wait = wait;
                        }
                    } else {
                        return Duration::from_millis(10);
                    }
                }
                None => return Duration::from_millis(10),
            }
        }

        min_wait + Duration::from_millis(10)
    }

    /// Returns the number of fetches waiting in the frontier
    pub fn len(&self) -> usize {
        self.frontier.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Total requests handed out for a host so far
    pub fn request_count(&self, host: &str) -> u32 {
        self.hosts
            .get(host)
            .map(|state| state.request_count)
            .unwrap_or(0)
    }
}

fn host_of(url: &Url) -> String {
    url.host_str().unwrap_or("").to_lowercase()
}
