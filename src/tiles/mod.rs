// SPDX-License-Identifier: MPL-2.0
//! Tile image loading and caching.
//!
//! Tiles are fetched over HTTP and kept in a bounded LRU cache keyed by
//! [`TileKey`]. A failed tile stays marked as failed for the lifetime of the
//! cache so a broken endpoint is not hammered on every redraw.

use crate::error::{Error, Result};
pub use crate::map::TileKey;
use iced::widget::image;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default number of tiles kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

const USER_AGENT: &str = concat!("IcedAtlas/", env!("CARGO_PKG_VERSION"));

/// Load state of one tile.
#[derive(Debug, Clone)]
pub enum TileState {
    Loading,
    Ready(image::Handle),
    Failed,
}

/// Cache statistics, mostly useful in logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Returns the hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

pub struct TileCache {
    cache: LruCache<TileKey, TileState>,
    stats: CacheStats,
}

impl std::fmt::Debug for TileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileCache")
            .field("len", &self.cache.len())
            .field("capacity", &self.cache.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl TileCache {
    /// Creates a cache holding at most `capacity` tiles. Zero falls back to
    /// the default capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or_else(|| NonZeroUsize::new(DEFAULT_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Looks a tile up, refreshing its LRU position.
    pub fn get(&mut self, key: &TileKey) -> Option<&TileState> {
        let found = self.cache.get(key);
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        found
    }

    /// Looks a tile up without touching LRU order or statistics.
    #[must_use]
    pub fn peek(&self, key: &TileKey) -> Option<&TileState> {
        self.cache.peek(key)
    }

    #[must_use]
    pub fn contains(&self, key: &TileKey) -> bool {
        self.cache.contains(key)
    }

    /// Marks `key` as loading. Returns `false` if the tile is already known,
    /// in which case no fetch should be started.
    pub fn begin_loading(&mut self, key: TileKey) -> bool {
        if self.cache.contains(&key) {
            return false;
        }
        self.put(key, TileState::Loading);
        true
    }

    pub fn finish(&mut self, key: TileKey, handle: image::Handle) {
        self.put(key, TileState::Ready(handle));
    }

    pub fn fail(&mut self, key: TileKey) {
        self.put(key, TileState::Failed);
    }

    fn put(&mut self, key: TileKey, state: TileState) {
        if let Some((evicted, _)) = self.cache.push(key, state) {
            if evicted != key {
                self.stats.evictions += 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.cache.clear();
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

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

/// Builds the HTTP client shared by all tile requests.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()
        .map_err(Error::from)
}

/// Downloads one tile image.
pub async fn fetch_tile(client: reqwest::Client, url: String) -> Result<image::Handle> {
    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Tile(format!(
            "HTTP status {} for {url}",
            response.status()
        )));
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(Error::Tile(format!("empty body for {url}")));
    }
    Ok(image::Handle::from_bytes(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(x: u32) -> TileKey {
        TileKey { z: 3, x, y: 1 }
    }

    fn handle() -> image::Handle {
        image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn begin_loading_only_once() {
        let mut cache = TileCache::new(4);
        assert!(cache.begin_loading(key(0)));
        assert!(!cache.begin_loading(key(0)));
        assert!(matches!(cache.peek(&key(0)), Some(TileState::Loading)));
    }

    #[test]
    fn failed_tiles_are_not_requested_again() {
        let mut cache = TileCache::new(4);
        cache.begin_loading(key(1));
        cache.fail(key(1));
        assert!(!cache.begin_loading(key(1)));
        assert!(matches!(cache.peek(&key(1)), Some(TileState::Failed)));
    }

    #[test]
    fn least_recently_used_tile_is_evicted() {
        let mut cache = TileCache::new(2);
        cache.finish(key(0), handle());
        cache.finish(key(1), handle());
        cache.get(&key(0));
        cache.finish(key(2), handle());

        assert!(cache.contains(&key(0)));
        assert!(!cache.contains(&key(1)));
        assert!(cache.contains(&key(2)));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn zero_capacity_uses_default() {
        assert_eq!(TileCache::new(0).capacity(), DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn hit_rate_counts_lookups() {
        let mut cache = TileCache::new(2);
        cache.finish(key(0), handle());
        cache.get(&key(0));
        cache.get(&key(5));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert!((cache.stats().hit_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_tile_error() {
        let client = build_client().expect("client");
        let result = fetch_tile(client, "http://127.0.0.1:9/0/0/0.png".into()).await;
        assert!(matches!(result, Err(Error::Tile(_))));
    }
}
