use review_feed_models::PageResponse;
use review_feed_sources::ReviewProvider;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::aggregate::Aggregator;
use crate::assemble;
use crate::cache::{PageKey, ResponseCache};
use crate::clock::Clock;
use crate::fallback;
use crate::paginate::{self, normalize_page_params};

/// Orchestrates one page request: cache lookup, provider fan-out, merge,
/// sort, paginate, assemble, cache write. Upstream outages degrade the
/// payload (ultimately to the curated fallback set); they never surface as
/// errors to the caller.
pub struct ReviewService {
    aggregator: Aggregator,
    cache: Arc<dyn ResponseCache>,
    clock: Arc<dyn Clock>,
    sources_status: BTreeMap<String, bool>,
}

impl ReviewService {
    pub fn new(
        providers: Vec<Box<dyn ReviewProvider>>,
        sources_status: BTreeMap<String, bool>,
        cache: Arc<dyn ResponseCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            aggregator: Aggregator::new(providers),
            cache,
            clock,
            sources_status,
        }
    }

    /// Fetch one page of the merged review feed. Zero `page`/`per_page`
    /// fall back to the canonical defaults (page 1, 7 per page).
    pub async fn get_reviews(&self, page: u32, per_page: u32) -> PageResponse {
        let (page, per_page) = normalize_page_params(page, per_page);
        let key = PageKey { page, per_page };

        if let Some(cached) = self.cache.get(key) {
            info!("Reviews page {} loaded from cache", page);
            return cached;
        }

        let mut merged = self.aggregator.collect_all().await;

        if merged.is_empty() {
            info!("No upstream reviews available, serving fallback page {}", page);
            return fallback::fallback_page(page, per_page, self.clock.as_ref());
        }

        paginate::sort_reviews(&mut merged);
        let (slice, total, has_next) = paginate::paginate(&merged, page, per_page);

        let response = assemble::assemble(
            &slice,
            page,
            per_page,
            total,
            has_next,
            self.sources_status.clone(),
            self.clock.now(),
            false,
        );

        self.cache.set(key, response.clone());
        info!(
            "Reviews page {} fetched and cached with {} reviews",
            page,
            response.reviews.len()
        );
        response
    }

    /// Drop all cached pages across the known `(page, per_page)` grid.
    pub fn clear_cache(&self) {
        self.cache.clear_grid();
        info!("Review page cache cleared");
    }
}
