//! In-memory TTL cache with an optional background sweeper.
//!
//! Expiry is checked lazily on every read. The sweeper additionally purges
//! expired entries on a fixed interval so unread keys do not accumulate.
//! The sweeper has an explicit `start`/`stop` lifecycle owned by whoever
//! constructs the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time;

use crate::ports::Cache;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) > self.ttl
    }
}

struct Sweeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Process-lifetime cache shared by every source fetcher.
#[derive(Clone)]
pub struct InMemoryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    sweeper: Arc<Mutex<Option<Sweeper>>>,
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCache {
    /// Creates an empty cache. No background work runs until [`start`](Self::start).
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            sweeper: Arc::new(Mutex::new(None)),
        }
    }

    /// Removes every expired entry, returning how many were purged.
    pub async fn sweep(&self) -> usize {
        Self::purge_expired(&self.entries).await
    }

    async fn purge_expired(entries: &RwLock<HashMap<String, CacheEntry>>) -> usize {
        let now = Instant::now();
        let mut entries = entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Starts the periodic sweeper. Calling it while running is a no-op.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, interval: Duration) {
        let mut slot = self.sweeper.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_some() {
            return;
        }

        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let entries = Arc::clone(&self.entries);
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            return;
                        }
                    }
                    _ = ticker.tick() => {
                        let purged = Self::purge_expired(&entries).await;
                        if purged > 0 {
                            tracing::debug!(purged, "Cache sweep removed expired entries");
                        }
                    }
                }
            }
        });

        tracing::debug!(interval_secs = interval.as_secs(), "Cache sweeper started");
        *slot = Some(Sweeper { shutdown, handle });
    }

    pub fn is_running(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Stops the sweeper and waits for its task to finish.
    pub async fn stop(&self) {
        let sweeper = self
            .sweeper
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(sweeper) = sweeper {
            let _ = sweeper.shutdown.send(true);
            if let Err(e) = sweeper.handle.await {
                tracing::warn!(error = %e, "Cache sweeper task ended abnormally");
            }
            tracing::debug!("Cache sweeper stopped");
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        None
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) {
        let entry = CacheEntry {
            value,
            stored_at: Instant::now(),
            ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    async fn has(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::with_cache;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let cache = InMemoryCache::new();
        cache.set("k", json!({"aqi": 120}), Duration::from_secs(60)).await;

        assert_eq!(cache.get("k").await, Some(json!({"aqi": 120})));
        assert!(cache.has("k").await);
        assert_eq!(cache.get("missing").await, None);
    }

    #[tokio::test]
    async fn expired_entries_are_purged_on_read() {
        let cache = InMemoryCache::new();
        cache.set("k", json!(1), Duration::from_millis(30)).await;
        assert!(cache.has("k").await);

        time::sleep(Duration::from_millis(60)).await;

        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn delete_and_clear() {
        let cache = InMemoryCache::new();
        cache.set("a", json!(1), Duration::from_secs(60)).await;
        cache.set("b", json!(2), Duration::from_secs(60)).await;

        assert!(cache.delete("a").await);
        assert!(!cache.delete("a").await);
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn sweep_removes_only_expired_entries() {
        let cache = InMemoryCache::new();
        cache.set("short", json!(1), Duration::from_millis(10)).await;
        cache.set("long", json!(2), Duration::from_secs(60)).await;

        time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.sweep().await, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.has("long").await);
    }

    #[tokio::test]
    async fn background_sweeper_purges_and_stops() {
        let cache = InMemoryCache::new();
        cache.set("short", json!(1), Duration::from_millis(10)).await;

        cache.start(Duration::from_millis(20));
        cache.start(Duration::from_millis(20));
        assert!(cache.is_running());

        time::sleep(Duration::from_millis(80)).await;
        assert_eq!(cache.len().await, 0);

        cache.stop().await;
        assert!(!cache.is_running());
        // Stopping twice is harmless.
        cache.stop().await;
    }

    #[tokio::test]
    async fn with_cache_invokes_producer_once_while_fresh() {
        let cache = InMemoryCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<u32, String> =
                with_cache(&cache, "answer", Duration::from_secs(60), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                })
                .await;
            assert_eq!(value, Ok(42));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn with_cache_does_not_store_errors() {
        let cache = InMemoryCache::new();
        let failed: Result<u32, String> =
            with_cache(&cache, "flaky", Duration::from_secs(60), || async {
                Err("down".to_string())
            })
            .await;
        assert!(failed.is_err());
        assert!(!cache.has("flaky").await);

        let recovered: Result<u32, String> =
            with_cache(&cache, "flaky", Duration::from_secs(60), || async { Ok(7) }).await;
        assert_eq!(recovered, Ok(7));
        assert!(cache.has("flaky").await);
    }

    #[tokio::test]
    async fn with_cache_treats_undecodable_entry_as_miss() {
        let cache = InMemoryCache::new();
        cache.set("typed", json!("not a number"), Duration::from_secs(60)).await;

        let value: Result<u32, String> =
            with_cache(&cache, "typed", Duration::from_secs(60), || async { Ok(5) }).await;
        assert_eq!(value, Ok(5));
        assert_eq!(cache.get("typed").await, Some(json!(5)));
    }
}
