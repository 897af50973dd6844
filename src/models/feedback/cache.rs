use std::num::NonZeroUsize;

use lru::LruCache;

use super::query::RequestKey;
use super::types::FeedbackPage;

pub const DEFAULT_CACHE_PAGES: usize = 32;

/// Least-recently-used store of fetched pages, keyed by request tuple.
#[derive(Debug)]
pub struct PageCache {
    pages: LruCache<RequestKey, FeedbackPage>,
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_PAGES)
    }
}

impl PageCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { pages: LruCache::new(capacity) }
    }

    /// A hit marks the tuple as most recently used.
    pub fn get(&mut self, key: &RequestKey) -> Option<&FeedbackPage> {
        self.pages.get(key)
    }

    pub fn insert(&mut self, key: RequestKey, page: FeedbackPage) {
        self.pages.put(key, page);
    }

    pub fn contains(&self, key: &RequestKey) -> bool {
        self.pages.contains(key)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
