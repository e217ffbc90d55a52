use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::metrics::CACHE_SIZE;

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

// Cache entry with timestamps
#[derive(Clone)]
pub struct CacheEntry {
    pub response: String,
    pub created_at: Instant,
    pub last_accessed: Instant,
}

impl CacheEntry {
    fn new(response: String) -> Self {
        let now = Instant::now();
        Self {
            response,
            created_at: now,
            last_accessed: now,
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

// Generated text keyed by the exact prompt it was produced from.
//
// Entries expire independently after `ttl`. When the cache is full, an
// insert drops expired entries first and then the least recently read one,
// so eviction is an approximate LRU/TTL combination.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    capacity: usize,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
            ttl,
        }
    }

    pub fn get(&self, prompt: &str) -> Option<String> {
        let hit = match self.entries.get_mut(prompt) {
            Some(mut entry) if !entry.is_expired(self.ttl) => {
                entry.last_accessed = Instant::now();
                return Some(entry.response.clone());
            }
            Some(_) => true,
            None => false,
        };
        // guard is released above, safe to remove now
        if hit {
            self.entries
                .remove_if(prompt, |_, entry| entry.is_expired(self.ttl));
            CACHE_SIZE.set(self.entries.len() as f64);
        }
        None
    }

    pub fn put(&self, prompt: &str, response: String) {
        if !self.entries.contains_key(prompt) && self.entries.len() >= self.capacity {
            self.purge_expired();
            while self.entries.len() >= self.capacity {
                if !self.evict_least_recent() {
                    break;
                }
            }
        }
        self.entries
            .insert(prompt.to_string(), CacheEntry::new(response));
        CACHE_SIZE.set(self.entries.len() as f64);
    }

    // Membership check that does not refresh recency
    pub fn contains(&self, prompt: &str) -> bool {
        self.entries
            .get(prompt)
            .map(|entry| !entry.is_expired(self.ttl))
            .unwrap_or(false)
    }

    pub fn purge_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired(self.ttl));
        CACHE_SIZE.set(self.entries.len() as f64);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_least_recent(&self) -> bool {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.last_accessed)
            .map(|entry| entry.key().clone());

        match oldest {
            Some(key) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    #[tokio::test(start_paused = true)]
    async fn returns_stored_text_until_ttl() {
        let cache = ResponseCache::new(10, Duration::from_secs(300));
        cache.put("prompt", "answer".to_string());

        assert_eq!(cache.get("prompt").as_deref(), Some("answer"));
        assert!(cache.contains("prompt"));

        time::advance(Duration::from_secs(299)).await;
        assert_eq!(cache.get("prompt").as_deref(), Some("answer"));

        time::advance(Duration::from_secs(2)).await;
        assert!(!cache.contains("prompt"));
        assert_eq!(cache.get("prompt"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn full_cache_evicts_least_recently_read() {
        let cache = ResponseCache::new(2, Duration::from_secs(300));
        cache.put("a", "1".to_string());
        time::advance(Duration::from_millis(10)).await;
        cache.put("b", "2".to_string());
        time::advance(Duration::from_millis(10)).await;

        // touching "a" makes "b" the eviction candidate
        assert!(cache.get("a").is_some());
        time::advance(Duration::from_millis(10)).await;
        cache.put("c", "3".to_string());

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[tokio::test(start_paused = true)]
    async fn full_cache_prefers_dropping_expired_entries() {
        let cache = ResponseCache::new(2, Duration::from_secs(5));
        cache.put("old", "1".to_string());
        time::advance(Duration::from_secs(4)).await;
        cache.put("fresh", "2".to_string());
        time::advance(Duration::from_secs(2)).await;

        cache.put("new", "3".to_string());
        assert!(cache.contains("fresh"));
        assert!(cache.contains("new"));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn overwriting_a_key_does_not_evict() {
        let cache = ResponseCache::new(1, Duration::from_secs(60));
        cache.put("k", "first".to_string());
        cache.put("k", "second".to_string());
        assert_eq!(cache.get("k").as_deref(), Some("second"));
        assert_eq!(cache.len(), 1);
    }
}
