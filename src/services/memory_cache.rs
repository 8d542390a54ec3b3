use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::domain::ports::cache::PermissionCache;

/// In-process TTL cache behind the `PermissionCache` port.
///
/// Entries expire lazily on read. Keys are flat `"namespace:key"` strings so
/// a namespace can be evicted with one prefix sweep.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn full_key(namespace: &str, key: &str) -> String {
        format!("{}:{}", namespace, key)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionCache for MemoryCache {
    fn get(&self, namespace: &str, key: &str) -> Option<serde_json::Value> {
        let full_key = Self::full_key(namespace, key);

        {
            let entries = self.entries.read().expect("cache lock poisoned");
            match entries.get(&full_key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired entry, drop it on the way out.
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.remove(&full_key);
        None
    }

    fn put(&self, namespace: &str, key: &str, value: serde_json::Value, ttl: Duration) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(
            Self::full_key(namespace, key),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    fn invalidate_all(&self, namespace: &str) {
        let prefix = format!("{}:", namespace);
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.retain(|key, _| !key.starts_with(&prefix));
    }
}
