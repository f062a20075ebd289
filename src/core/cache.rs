//! Time-boxed commander cache keyed by filter fingerprint.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::domain::Commander;

struct Entry {
    value: Commander,
    inserted_at: Instant,
}

/// In-memory cache with read-triggered expiry and an insert-triggered sweep.
///
/// There is no background timer: an entry past its TTL is evicted the next
/// time it is read, and inserts sweep all expired entries once the total
/// count exceeds the capacity bound.
pub struct CommanderCache {
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<String, Entry>>,
}

impl CommanderCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry. An expired one is removed and reported absent.
    pub fn get(&self, key: &str) -> Option<Commander> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: String, value: Commander) {
        let mut entries = self.entries.lock();
        entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
        if entries.len() > self.capacity {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        }
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Commander;

    fn commander(name: &str) -> Commander {
        Commander {
            name: name.to_string(),
            colors: Vec::new(),
            mana_value: 3.0,
            type_line: "Legendary Creature".to_string(),
            image_url: String::new(),
            source_id: "id".to_string(),
            oracle_text: String::new(),
            explanation: String::new(),
            deck_suggestions: None,
            partner: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn entry_is_fresh_just_before_ttl() {
        let cache = CommanderCache::new(Duration::from_secs(600), 100);
        cache.put("k".into(), commander("Kinnan"));

        tokio::time::advance(Duration::from_secs(599)).await;
        assert!(cache.get("k").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = CommanderCache::new(Duration::from_secs(600), 100);
        cache.put("k".into(), commander("Kinnan"));

        tokio::time::advance(Duration::from_secs(601)).await;
        assert!(cache.get("k").is_none());
        // Read-triggered expiry actually removed the entry.
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_runs_once_over_capacity() {
        let cache = CommanderCache::new(Duration::from_secs(60), 3);
        cache.put("a".into(), commander("A"));
        cache.put("b".into(), commander("B"));
        cache.put("c".into(), commander("C"));

        tokio::time::advance(Duration::from_secs(61)).await;

        // Fourth insert crosses the capacity bound and sweeps the stale three.
        cache.put("d".into(), commander("D"));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("d").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_removes_entry() {
        let cache = CommanderCache::new(Duration::from_secs(600), 100);
        cache.put("k".into(), commander("Kinnan"));
        cache.invalidate("k");
        assert!(cache.get("k").is_none());
    }
}
