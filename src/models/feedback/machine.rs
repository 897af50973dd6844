use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::{Duration, Instant};

use super::cache::{DEFAULT_CACHE_PAGES, PageCache};
use super::query::{
    DEFAULT_PAGE_SIZE, FeedbackQuery, ListFeedbackParams, QueryError, RatingFilter, RequestKey,
    last_page, validate_page_size,
};
use super::types::FeedbackPage;

/// A fetch that never came back (client hung up mid-request) stops blocking
/// its tuple after this long.
pub const DEFAULT_ABANDON_AFTER: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Fetching,
    Success,
    /// Last fetch for the current tuple failed; the message may be empty.
    Error(String),
}

/// Permission to perform one fetch. Hand it back through [`FeedbackBrowser::resolve`].
#[derive(Debug)]
pub struct FetchTicket {
    seq: u64,
    key: RequestKey,
}

impl FetchTicket {
    pub fn key(&self) -> &RequestKey {
        &self.key
    }

    pub fn params(&self) -> ListFeedbackParams {
        self.key.params()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result belongs to the current tuple and is now displayed.
    Applied,
    /// The user moved on; a successful result was cached but not displayed.
    Stale,
    /// A newer fetch for the same tuple was issued; the result was dropped.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub page_size: u32,
    pub cache_pages: usize,
    pub abandon_after: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cache_pages: DEFAULT_CACHE_PAGES,
            abandon_after: DEFAULT_ABANDON_AFTER,
        }
    }
}

#[derive(Debug, Clone)]
struct InFlight {
    seq: u64,
    started: Instant,
}

/// Everything a page render needs, copied out of the browser.
#[derive(Debug, Clone)]
pub struct FeedbackSnapshot {
    pub query: FeedbackQuery,
    pub status: FetchStatus,
    pub page: Option<FeedbackPage>,
}

/// Query state machine behind the feedback list.
///
/// Mutations return a [`FetchTicket`] when the caller has to hit the chat
/// service. Results are only displayed if their tuple still matches the
/// current query; the previously displayed page survives errors.
#[derive(Debug)]
pub struct FeedbackBrowser {
    query: FeedbackQuery,
    cache: PageCache,
    in_flight: HashMap<RequestKey, InFlight>,
    next_seq: u64,
    shown: Option<FeedbackPage>,
    status: FetchStatus,
    abandon_after: Duration,
}

impl Default for FeedbackBrowser {
    fn default() -> Self {
        Self::new(&BrowserSettings::default())
    }
}

impl FeedbackBrowser {
    pub fn new(settings: &BrowserSettings) -> Self {
        Self {
            query: FeedbackQuery::new(settings.page_size),
            cache: PageCache::new(settings.cache_pages),
            in_flight: HashMap::new(),
            next_seq: 0,
            shown: None,
            status: FetchStatus::Idle,
            abandon_after: settings.abandon_after,
        }
    }

    pub fn query(&self) -> &FeedbackQuery {
        &self.query
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// The page currently on screen, which may belong to an older tuple
    /// while a fetch is running or after one failed.
    pub fn page(&self) -> Option<&FeedbackPage> {
        self.shown.as_ref()
    }

    pub fn snapshot(&self) -> FeedbackSnapshot {
        FeedbackSnapshot {
            query: self.query.clone(),
            status: self.status.clone(),
            page: self.shown.clone(),
        }
    }

    /// Make sure the current tuple is displayed or being fetched.
    ///
    /// A failed tuple keeps its error on re-render; `refresh` or a query
    /// change retries it.
    pub fn load(&mut self) -> Option<FetchTicket> {
        if matches!(self.status, FetchStatus::Error(_)) {
            return None;
        }
        self.request()
    }

    pub fn search(&mut self, keywords: &str) -> Option<FetchTicket> {
        self.query.set_keywords(keywords);
        self.request()
    }

    pub fn set_rating_filter(&mut self, rating: Option<RatingFilter>) -> Option<FetchTicket> {
        self.query.set_rating(rating);
        self.request()
    }

    pub fn set_page(&mut self, page: u32) -> Result<Option<FetchTicket>, QueryError> {
        self.query.set_page(page)?;
        Ok(self.request())
    }

    /// Changing the page size keeps the current page number unless the last
    /// known total no longer reaches it.
    pub fn set_page_size(&mut self, size: u32) -> Result<Option<FetchTicket>, QueryError> {
        self.query.set_page_size(size)?;
        self.clamp_page_to_known_total();
        Ok(self.request())
    }

    /// Pagination control change: new page and optionally a new size.
    /// Both are validated before either is applied.
    pub fn set_pagination(
        &mut self,
        page: u32,
        size: Option<u32>,
    ) -> Result<Option<FetchTicket>, QueryError> {
        if page == 0 {
            return Err(QueryError::InvalidPage(page));
        }
        if let Some(size) = size {
            validate_page_size(size)?;
            self.query.set_page_size(size)?;
        }
        self.query.set_page(page)?;
        if size.is_some() {
            self.clamp_page_to_known_total();
        }
        Ok(self.request())
    }

    /// Re-fetch the current tuple, bypassing the cache.
    pub fn refresh(&mut self) -> FetchTicket {
        let key = self.query.key();
        self.issue(key)
    }

    /// Feed a finished fetch back in. `Ok(None)` means the service answered
    /// without a payload and becomes an empty page.
    pub fn resolve<E: fmt::Display>(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Option<FeedbackPage>, E>,
    ) -> Resolution {
        let latest = self.in_flight.get(&ticket.key).map(|f| f.seq);
        if latest != Some(ticket.seq) {
            log::debug!("Dropping superseded feedback fetch #{}", ticket.seq);
            return Resolution::Superseded;
        }
        self.in_flight.remove(&ticket.key);

        let current = ticket.key == self.query.key();
        match outcome {
            Ok(data) => {
                let page = normalize(&ticket.key, data);
                self.cache.insert(ticket.key, page.clone());
                if current {
                    self.shown = Some(page);
                    self.status = FetchStatus::Success;
                    Resolution::Applied
                } else {
                    log::debug!("Feedback fetch #{} finished for a stale query", ticket.seq);
                    Resolution::Stale
                }
            }
            Err(e) => {
                if current {
                    log::warn!("Feedback fetch #{} failed: {e}", ticket.seq);
                    self.status = FetchStatus::Error(e.to_string());
                    Resolution::Applied
                } else {
                    log::debug!("Ignoring failure of stale feedback fetch #{}: {e}", ticket.seq);
                    Resolution::Stale
                }
            }
        }
    }

    fn clamp_page_to_known_total(&mut self) {
        let Some(total) = self.shown.as_ref().map(|p| p.total) else {
            return;
        };
        let last = last_page(total, self.query.page_size());
        if self.query.page() > last {
            log::debug!("Page {} is past the last page {last}", self.query.page());
            if let Err(e) = self.query.set_page(last) {
                log::warn!("Could not move to the last page: {e}");
            }
        }
    }

    fn request(&mut self) -> Option<FetchTicket> {
        self.sweep_abandoned();
        let key = self.query.key();
        if let Some(page) = self.cache.get(&key) {
            self.shown = Some(page.clone());
            self.status = FetchStatus::Success;
            return None;
        }
        if self.in_flight.contains_key(&key) {
            self.status = FetchStatus::Fetching;
            return None;
        }
        Some(self.issue(key))
    }

    /// Forget fetches that never came back so they stop blocking their tuple
    /// and do not pile up.
    fn sweep_abandoned(&mut self) {
        let abandon_after = self.abandon_after;
        let before = self.in_flight.len();
        self.in_flight.retain(|_, f| f.started.elapsed() < abandon_after);
        let swept = before - self.in_flight.len();
        if swept > 0 {
            log::warn!("Forgot {swept} feedback fetches that never completed");
        }
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    fn issue(&mut self, key: RequestKey) -> FetchTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight.insert(key.clone(), InFlight { seq, started: Instant::now() });
        self.status = FetchStatus::Fetching;
        log::debug!("Feedback fetch #{seq} issued for {key:?}");
        FetchTicket { seq, key }
    }
}

fn normalize(key: &RequestKey, data: Option<FeedbackPage>) -> FeedbackPage {
    let Some(mut page) = data else {
        return FeedbackPage::empty(key.page_size);
    };
    if page.page == 0 {
        page.page = key.page;
    }
    if page.page_size == 0 {
        page.page_size = key.page_size;
    }

    let mut seen = HashSet::new();
    let before = page.items.len();
    page.items.retain(|item| seen.insert(item.message_id.clone()));
    if page.items.len() != before {
        log::warn!(
            "Dropped {} feedback rows with duplicate message ids",
            before - page.items.len()
        );
    }
    page
}
