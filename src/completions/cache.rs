//! Explicit, time-limited memory of successful completions.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    prompt: String,
    temperature_bits: u32,
}

impl CacheKey {
    fn new(prompt: &str, temperature: f32) -> Self {
        Self {
            prompt: prompt.to_string(),
            temperature_bits: temperature.to_bits(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedResponse {
    text: String,
    stored_at: Instant,
}

/// Completions keyed on `(prompt, temperature)`.
///
/// Entries expire after `ttl`. A zero `ttl` disables the cache entirely.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CachedResponse>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Look up a live entry, evicting it if it has expired.
    pub fn get(&mut self, prompt: &str, temperature: f32) -> Option<String> {
        self.get_at(prompt, temperature, Instant::now())
    }

    pub fn insert(&mut self, prompt: &str, temperature: f32, text: String) {
        self.insert_at(prompt, temperature, text, Instant::now());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every expired entry and return how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_at(&mut self, prompt: &str, temperature: f32, now: Instant) -> Option<String> {
        let key = CacheKey::new(prompt, temperature);
        let entry = self.entries.get(&key)?;

        if self.is_expired(entry, now) {
            self.entries.remove(&key);
            return None;
        }

        Some(entry.text.clone())
    }

    fn insert_at(&mut self, prompt: &str, temperature: f32, text: String, now: Instant) {
        if !self.is_enabled() {
            return;
        }
        self.entries.insert(
            CacheKey::new(prompt, temperature),
            CachedResponse {
                text,
                stored_at: now,
            },
        );
    }

    fn purge_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.stored_at) < ttl);
        before - self.entries.len()
    }

    fn is_expired(&self, entry: &CachedResponse, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let mut cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("hello", 0.7, "world".to_string());
        assert_eq!(cache.get("hello", 0.7).as_deref(), Some("world"));
    }

    #[test]
    fn key_includes_temperature() {
        let mut cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("hello", 0.7, "world".to_string());
        assert!(cache.get("hello", 0.71).is_none());
        assert!(cache.get("hello!", 0.7).is_none());
    }

    #[test]
    fn expired_entries_are_evicted_on_lookup() {
        let mut cache = ResponseCache::new(Duration::from_secs(10));
        let start = Instant::now();
        cache.insert_at("p", 0.5, "old".to_string(), start);

        let later = start + Duration::from_secs(10);
        assert!(cache.get_at("p", 0.5, later).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn purge_removes_only_expired() {
        let mut cache = ResponseCache::new(Duration::from_secs(10));
        let start = Instant::now();
        cache.insert_at("old", 0.5, "a".to_string(), start);
        cache.insert_at("new", 0.5, "b".to_string(), start + Duration::from_secs(8));

        assert_eq!(cache.purge_expired_at(start + Duration::from_secs(12)), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache
                .get_at("new", 0.5, start + Duration::from_secs(12))
                .as_deref(),
            Some("b")
        );
    }

    #[test]
    fn zero_ttl_stores_nothing() {
        let mut cache = ResponseCache::disabled();
        cache.insert("hello", 0.7, "world".to_string());
        assert!(cache.is_empty());
        assert!(cache.get("hello", 0.7).is_none());
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("a", 0.1, "x".to_string());
        cache.insert("b", 0.1, "y".to_string());
        cache.clear();
        assert!(cache.is_empty());
    }
}
