//! In-memory expiring cache.
//!
//! Uses `DashMap` so concurrent request handlers only contend when they
//! touch the same shard. Expiry is checked on read; a background sweeper
//! reclaims entries nobody reads again.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Stand-in expiry for TTLs too large to add to the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// A cached value with its absolute expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe key/value cache with per-entry time-to-live.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
}

impl<V: Clone> ExpiringCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert or overwrite `key`. A zero `ttl` stores an already-expired entry.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .unwrap_or_else(|| now + FAR_FUTURE);
        self.entries
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Return the value for `key` if present and not yet expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(Instant::now()) {
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Evict every expired entry. Returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for ExpiringCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `cleanup` every `interval` until `shutdown` turns true or its sender drops.
pub fn spawn_sweeper<V>(
    cache: Arc<ExpiringCache<V>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing can be expired yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let evicted = cache.cleanup();
                    if evicted > 0 {
                        debug!("Cache sweep evicted {} entries ({} remain)", evicted, cache.len());
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Cache sweeper stopping");
                        break;
                    }
                }
            }
        }
    })
}
