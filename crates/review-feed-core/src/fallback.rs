use chrono::{DateTime, Utc};
use review_feed_models::{PageResponse, Review, ReviewSource};
use std::collections::BTreeMap;

use crate::assemble;
use crate::clock::Clock;
use crate::paginate::{self, normalize_page_params};

const DAY_SECS: i64 = 86_400;

/// Curated reviews served when every upstream comes back empty.
///
/// Timestamps sit one to five days behind `now`, so the relative-time
/// labels always read as recent. These records never pass through the
/// normal cache path.
pub fn fallback_reviews(now: DateTime<Utc>) -> Vec<Review> {
    let base = now.timestamp();
    let entries: [(&str, &str, &str); 5] = [
        (
            "fallback_1",
            "Elena B.",
            "Our guide knew every corner of the lake and tailored the day to what \
             the group wanted to see. Travelling by local train and boat instead \
             of a bus made the whole trip feel effortless.",
        ),
        (
            "fallback_2",
            "James W.",
            "Small group, relaxed pace, and a guide who genuinely loves the \
             region. We got to linger in the villages we liked instead of being \
             rushed to the next stop.",
        ),
        (
            "fallback_3",
            "Priya N.",
            "Booking was simple and the meeting point instructions were spot on. \
             The viewpoints we hiked to were worth every step, and lunch at the \
             family-run trattoria was a highlight.",
        ),
        (
            "fallback_4",
            "Weekend Explorer",
            "A perfectly organized day trip. Comfortable connections, no queues, \
             and enough free time to wander on our own before heading back.",
        ),
        (
            "fallback_5",
            "Satisfied Guest",
            "Everything from the ferry crossing to the final stop ran on \
             schedule. Would happily book another tour with this team next time \
             we are in the area.",
        ),
    ];

    entries
        .iter()
        .enumerate()
        .map(|(idx, (id, author, text))| Review {
            id: (*id).to_string(),
            author_name: (*author).to_string(),
            author_photo_url: String::new(),
            rating: 5,
            text: (*text).to_string(),
            timestamp: base - DAY_SECS * (idx as i64 + 1),
            source: ReviewSource::Fallback,
            language: None,
            title: None,
        })
        .collect()
}

/// Assemble a fallback page. `sources_used` collapses to the fallback
/// marker; real provider status is irrelevant once this path is taken.
pub fn fallback_page(page: u32, per_page: u32, clock: &dyn Clock) -> PageResponse {
    let (page, per_page) = normalize_page_params(page, per_page);
    let now = clock.now();

    let reviews = fallback_reviews(now);
    let (slice, total, has_next) = paginate::paginate(&reviews, page, per_page);

    let mut sources_used = BTreeMap::new();
    sources_used.insert("fallback".to_string(), true);

    assemble::assemble(&slice, page, per_page, total, has_next, sources_used, now, true)
}
