/// In-memory TTL cache for GET responses.
/// Keys are full request URLs including the query string; any successful
/// mutation clears the whole cache so the next read goes to the server.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheEntry {
    stored_at: Instant,
    body: Value,
}

pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        ResponseCache {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A zero TTL disables caching entirely.
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        if !self.is_enabled() {
            return None;
        }

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.body.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: String, body: Value) {
        if !self.is_enabled() {
            return;
        }

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                body,
            },
        );
    }

    pub fn invalidate_all(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if !entries.is_empty() {
            log::debug!("Invalidating {} cached responses", entries.len());
        }
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
