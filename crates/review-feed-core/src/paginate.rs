use review_feed_models::Review;

/// Canonical defaults applied when a caller passes zero for either value.
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 7;

/// Replace zero page parameters with the canonical defaults. Pages are
/// 1-indexed; zero cannot be requested.
pub fn normalize_page_params(page: u32, per_page: u32) -> (u32, u32) {
    let page = if page == 0 { DEFAULT_PAGE } else { page };
    let per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
    (page, per_page)
}

/// Sort merged reviews by recency, newest first. Ties break on review id so
/// the order is deterministic within a fetch cycle.
pub fn sort_reviews(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Slice one 1-indexed page out of a sorted review list.
///
/// Returns the page slice, the total size of the merged set, and whether a
/// further page exists. A page past the end yields an empty slice with
/// `has_next` false; it is not an error.
pub fn paginate(reviews: &[Review], page: u32, per_page: u32) -> (Vec<Review>, usize, bool) {
    let (page, per_page) = normalize_page_params(page, per_page);

    let total = reviews.len();
    let start = (page as usize - 1).saturating_mul(per_page as usize);
    let end = start.saturating_add(per_page as usize).min(total);

    let slice = if start >= total {
        Vec::new()
    } else {
        reviews[start..end].to_vec()
    };
    let has_next = (page as usize).saturating_mul(per_page as usize) < total;

    (slice, total, has_next)
}
