// SPDX-License-Identifier: MPL-2.0
//! URL-keyed LRU cache of downloaded renditions.
//!
//! Entries are created as `Pending` when a download starts so the same URL is
//! never requested twice concurrently. Failed downloads are remembered until
//! evicted; the gallery shows a placeholder for them instead of retrying.

use super::Rendition;
use crate::error::Error;
use lru::LruCache;
use std::num::NonZeroUsize;

/// State of one cached URL.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    /// Download in progress.
    Pending,
    /// Decoded and ready to display.
    Ready(Rendition),
    /// Download or decoding failed.
    Failed(Error),
}

/// LRU cache of renditions keyed by URL.
pub struct RenditionCache {
    cache: LruCache<String, CacheEntry>,
}

impl std::fmt::Debug for RenditionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenditionCache")
            .field("len", &self.cache.len())
            .field("capacity", &self.cache.cap())
            .finish()
    }
}

impl RenditionCache {
    /// Creates a cache holding at most `capacity` URLs (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Looks up `url` without changing LRU order.
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<&CacheEntry> {
        self.cache.peek(url)
    }

    /// Returns the decoded rendition for `url`, if ready.
    #[must_use]
    pub fn ready(&self, url: &str) -> Option<&Rendition> {
        match self.peek(url) {
            Some(CacheEntry::Ready(rendition)) => Some(rendition),
            _ => None,
        }
    }

    /// Whether `url` has never been requested (or was evicted).
    #[must_use]
    pub fn needs_fetch(&self, url: &str) -> bool {
        !self.cache.contains(url)
    }

    /// Marks `url` as most recently used.
    pub fn touch(&mut self, url: &str) {
        let _ = self.cache.get(url);
    }

    /// Records that a download for `url` has started.
    pub fn mark_pending(&mut self, url: impl Into<String>) {
        self.cache.put(url.into(), CacheEntry::Pending);
    }

    /// Stores the outcome of a download.
    pub fn insert_result(&mut self, url: impl Into<String>, result: Result<Rendition, Error>) {
        let url = url.into();
        let entry = match result {
            Ok(rendition) => CacheEntry::Ready(rendition),
            Err(err) => {
                log::debug!("rendition {} failed: {}", url, err);
                CacheEntry::Failed(err)
            }
        };
        self.cache.put(url, entry);
    }

    /// Raises the capacity to at least `min_capacity`. Never shrinks.
    pub fn grow_to(&mut self, min_capacity: usize) {
        let Some(wanted) = NonZeroUsize::new(min_capacity) else {
            return;
        };
        if wanted > self.cache.cap() {
            log::debug!(
                "rendition cache grows from {} to {}",
                self.cache.cap(),
                wanted
            );
            self.cache.resize(wanted);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::decode_rendition;
    use image_rs::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn rendition() -> Rendition {
        let image = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image_rs::ImageFormat::Png)
            .unwrap();
        decode_rendition(&bytes).unwrap()
    }

    #[test]
    fn unknown_url_needs_fetch() {
        let cache = RenditionCache::new(4);
        assert!(cache.needs_fetch("a"));
        assert!(cache.peek("a").is_none());
    }

    #[test]
    fn pending_url_is_not_fetched_again() {
        let mut cache = RenditionCache::new(4);
        cache.mark_pending("a");

        assert!(!cache.needs_fetch("a"));
        assert!(matches!(cache.peek("a"), Some(CacheEntry::Pending)));
        assert!(cache.ready("a").is_none());
    }

    #[test]
    fn ready_result_is_exposed() {
        let mut cache = RenditionCache::new(4);
        cache.mark_pending("a");
        cache.insert_result("a", Ok(rendition()));

        assert!(cache.ready("a").is_some());
    }

    #[test]
    fn failures_are_remembered() {
        let mut cache = RenditionCache::new(4);
        cache.insert_result("a", Err(Error::Decode("bad".into())));

        assert!(!cache.needs_fetch("a"));
        assert!(matches!(cache.peek("a"), Some(CacheEntry::Failed(_))));
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let mut cache = RenditionCache::new(2);
        cache.mark_pending("a");
        cache.mark_pending("b");
        cache.touch("a");
        cache.mark_pending("c");

        assert!(!cache.needs_fetch("a"));
        assert!(cache.needs_fetch("b"));
        assert!(!cache.needs_fetch("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn grow_to_keeps_entries_and_never_shrinks() {
        let mut cache = RenditionCache::new(2);
        cache.mark_pending("a");
        cache.mark_pending("b");

        cache.grow_to(3);
        cache.mark_pending("c");
        assert_eq!(cache.capacity(), 3);
        assert!(!cache.needs_fetch("a"));

        cache.grow_to(1);
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let cache = RenditionCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }
}
