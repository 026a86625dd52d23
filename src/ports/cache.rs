//! Cache port - key/value storage with per-entry TTL.
//!
//! Values are stored as `serde_json::Value` so one cache instance can hold
//! every kind of source reading. [`with_cache`] adds typed read-through
//! semantics on top.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Process-lifetime cache with lazy expiry.
///
/// Implementations must not return an entry once `now - stored_at > ttl`.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the value if present and unexpired.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Stores a value, replacing any previous entry for the key.
    async fn set(&self, key: &str, value: Value, ttl: Duration);

    async fn has(&self, key: &str) -> bool;

    /// Removes an entry. Returns true if one was present.
    async fn delete(&self, key: &str) -> bool;

    async fn clear(&self);
}

/// Builds a cache key from a name and its parameters.
///
/// Parameters are sorted so their order never creates a distinct key.
pub fn cache_key(name: &str, params: &[(&str, String)]) -> String {
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    pairs.sort();
    format!("{}:{}", name, pairs.join("&"))
}

/// Returns the cached value for `key`, or runs `producer` and caches its result.
///
/// Only `Ok` results are stored. An entry that no longer deserializes as `T`
/// is treated as a miss. Concurrent misses on the same key may both run the
/// producer.
pub async fn with_cache<T, E, F, Fut>(
    cache: &dyn Cache,
    key: &str,
    ttl: Duration,
    producer: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Some(cached) = cache.get(key).await {
        match serde_json::from_value::<T>(cached) {
            Ok(value) => {
                tracing::trace!(key = %key, "Cache hit");
                return Ok(value);
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Discarding undecodable cache entry");
            }
        }
    } else {
        tracing::debug!(key = %key, "Cache miss");
    }

    let value = producer().await?;
    match serde_json::to_value(&value) {
        Ok(json) => cache.set(key, json, ttl).await,
        Err(e) => tracing::warn!(key = %key, error = %e, "Value not cacheable"),
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_ignores_parameter_order() {
        let a = cache_key("death_rate", &[("city", "delhi".into()), ("age", "65".into())]);
        let b = cache_key("death_rate", &[("age", "65".into()), ("city", "delhi".into())]);
        assert_eq!(a, b);
        assert_eq!(a, "death_rate:age=65&city=delhi");
    }

    #[test]
    fn cache_key_distinguishes_names() {
        let params = [("city", "pune".to_string())];
        assert_ne!(cache_key("weather", &params), cache_key("crime", &params));
    }
}
