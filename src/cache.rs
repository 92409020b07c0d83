// Room lookup cache.
//
// The catalog and detail views request the same rooms over and over; this
// cache keeps recently fetched rooms for a bounded time so a detail view
// opened from the catalog does not hit the network again. Entries expire
// after a TTL and the cache evicts its oldest entry once full.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::client::BookingBackend;
use crate::model::Room;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            default_ttl: Duration::from_secs(300),
        }
    }
}

/// Point-in-time snapshot of the cache counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
    pub expirations: usize,
}

#[derive(Debug, Default)]
struct CacheCounters {
    hits: AtomicUsize,
    misses: AtomicUsize,
    evictions: AtomicUsize,
    expirations: AtomicUsize,
}

struct CacheEntry {
    room: Room,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() > self.ttl
    }
}

pub struct RoomCache {
    entries: DashMap<String, CacheEntry>,
    config: RwLock<CacheConfig>,
    counters: CacheCounters,
}

impl RoomCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config: RwLock::new(config),
            counters: CacheCounters::default(),
        }
    }

    pub fn insert(&self, room: Room) {
        let ttl = self.config.read().default_ttl;
        self.insert_with_ttl(room, ttl);
    }

    pub fn insert_with_ttl(&self, room: Room, ttl: Duration) {
        let max_entries = self.config.read().max_entries;
        if self.entries.len() >= max_entries && !self.entries.contains_key(&room.id) {
            self.evict_oldest();
        }

        self.entries.insert(
            room.id.clone(),
            CacheEntry {
                room,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Returns the cached room if present and not expired. An expired entry
    /// is removed on the spot and counts as both an expiration and a miss.
    pub fn get(&self, room_id: &str) -> Option<Room> {
        let expired = match self.entries.get(room_id) {
            Some(entry) => {
                if !entry.is_expired() {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.room.clone());
                }
                true
            }
            None => false,
        };

        if expired {
            // Guard dropped above; safe to remove now.
            self.entries.remove(room_id);
            self.counters.expirations.fetch_add(1, Ordering::Relaxed);
            debug!(%room_id, "cached room expired");
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Looks the room up in the cache first and falls back to the backend,
    /// caching what it fetched.
    pub async fn fetch_room_cached<B>(
        &self,
        backend: &B,
        room_id: &str,
    ) -> Result<Room, crate::client::ApiError>
    where
        B: BookingBackend + ?Sized,
    {
        if let Some(room) = self.get(room_id) {
            return Ok(room);
        }
        let room = backend.fetch_room(room_id).await?;
        self.insert(room.clone());
        Ok(room)
    }

    /// Fetches the given rooms concurrently and caches every one that
    /// arrives. Returns how many were cached; individual failures are
    /// logged and skipped.
    pub async fn warm<B>(&self, backend: &B, room_ids: &[String]) -> usize
    where
        B: BookingBackend + ?Sized,
    {
        let fetches = room_ids.iter().map(|id| backend.fetch_room(id));
        let results = futures::future::join_all(fetches).await;

        let mut cached = 0;
        for result in results {
            match result {
                Ok(room) => {
                    self.insert(room);
                    cached += 1;
                }
                Err(error) => debug!(%error, "warm-up fetch failed"),
            }
        }
        cached
    }

    /// Drops the entry for one room, or every entry when `room_id` is
    /// `None`. Returns the number of entries removed.
    pub fn invalidate(&self, room_id: Option<&str>) -> usize {
        match room_id {
            Some(id) => usize::from(self.entries.remove(id).is_some()),
            None => {
                let removed = self.entries.len();
                self.entries.clear();
                removed
            }
        }
    }

    /// Removes every expired entry, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let purged = before - self.entries.len();
        self.counters
            .expirations
            .fetch_add(purged, Ordering::Relaxed);
        purged
    }

    pub fn set_default_ttl(&self, ttl: Duration) {
        self.config.write().default_ttl = ttl;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
            expirations: self.counters.expirations.load(Ordering::Relaxed),
        }
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().stored_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            if self.entries.remove(&key).is_some() {
                self.counters.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(room_id = %key, "evicted oldest cached room");
            }
        }
    }
}
