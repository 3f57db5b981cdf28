use chrono::{DateTime, Duration, Utc};
use review_feed_models::PageResponse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::clock::Clock;

/// Cache key for one assembled page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub page: u32,
    pub per_page: u32,
}

/// Keys enumerated by `clear_grid`. Entries outside this grid survive a
/// clear; a known limitation carried over from the reference behavior.
pub const CLEAR_GRID_MAX_PAGE: u32 = 10;
pub const CLEAR_GRID_PER_PAGE: [u32; 2] = [7, 30];

/// TTL store for assembled page payloads. The cache knows nothing about
/// providers or reviews; it maps `(page, per_page)` to whatever response
/// was computed for it.
pub trait ResponseCache: Send + Sync {
    fn get(&self, key: PageKey) -> Option<PageResponse>;
    fn set(&self, key: PageKey, value: PageResponse);
    fn remove(&self, key: PageKey);

    /// Remove the fixed grid of commonly requested keys.
    fn clear_grid(&self) {
        for page in 1..=CLEAR_GRID_MAX_PAGE {
            for per_page in CLEAR_GRID_PER_PAGE {
                self.remove(PageKey { page, per_page });
            }
        }
    }
}

struct Entry {
    value: PageResponse,
    expires_at: DateTime<Utc>,
}

/// In-memory TTL cache. Expiry is evaluated lazily on read against the
/// injected clock.
pub struct MemoryPageCache {
    entries: Mutex<HashMap<PageKey, Entry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl MemoryPageCache {
    pub fn new(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs as i64),
            clock,
        }
    }
}

impl ResponseCache for MemoryPageCache {
    fn get(&self, key: PageKey) -> Option<PageResponse> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(&key) {
            Some(entry) if entry.expires_at > self.clock.now() => {
                debug!("Cache hit: page {} per_page {}", key.page, key.per_page);
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(&key);
                debug!("Cache expired: page {} per_page {}", key.page, key.per_page);
                None
            }
            None => {
                debug!("Cache miss: page {} per_page {}", key.page, key.per_page);
                None
            }
        }
    }

    fn set(&self, key: PageKey, value: PageResponse) {
        // Concurrent misses for the same key may both land here; the last
        // write wins and both values were computed from the same cycle.
        let expires_at = self.clock.now() + self.ttl;
        self.entries
            .lock()
            .unwrap()
            .insert(key, Entry { value, expires_at });
    }

    fn remove(&self, key: PageKey) {
        self.entries.lock().unwrap().remove(&key);
    }
}
