use chrono::{DateTime, Utc};
use review_feed_models::{PageResponse, PageReview, Review};
use std::collections::BTreeMap;

use crate::relative_time::format_relative_time;

/// Flatten a canonical review into the wire shape used in page payloads.
pub fn to_page_review(review: &Review, now: DateTime<Utc>) -> PageReview {
    PageReview {
        review_id: review.id.clone(),
        author_name: review.author_name.clone(),
        author_photo_url: review.author_photo_url.clone(),
        rating: review.rating,
        text: review.text.clone(),
        relative_time_description: format_relative_time(review.timestamp, now),
        source: review.source.as_str().to_string(),
    }
}

/// Build the externally visible page payload. `fetched_at` is stamped here
/// and preserved verbatim by the cache, so repeated reads of one cached
/// entry are byte-identical.
pub fn assemble(
    reviews: &[Review],
    page: u32,
    per_page: u32,
    total_reviews: usize,
    has_next: bool,
    sources_used: BTreeMap<String, bool>,
    now: DateTime<Utc>,
    fallback: bool,
) -> PageResponse {
    PageResponse {
        reviews: reviews.iter().map(|r| to_page_review(r, now)).collect(),
        page,
        per_page,
        total_reviews,
        has_next,
        sources_used,
        fetched_at: now,
        fallback_mode: if fallback { Some(true) } else { None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use review_feed_models::ReviewSource;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn review() -> Review {
        Review {
            id: "ta_1".to_string(),
            author_name: "wanderer42".to_string(),
            author_photo_url: "https://media.example/a.jpg".to_string(),
            rating: 5,
            text: "Great trip".to_string(),
            timestamp: (fixed_now() - Duration::days(5)).timestamp(),
            source: ReviewSource::Tripadvisor,
            language: Some("en".to_string()),
            title: Some("Great".to_string()),
        }
    }

    #[test]
    fn test_to_page_review_maps_fields() {
        let page_review = to_page_review(&review(), fixed_now());
        assert_eq!(page_review.review_id, "ta_1");
        assert_eq!(page_review.author_name, "wanderer42");
        assert_eq!(page_review.rating, 5);
        assert_eq!(page_review.relative_time_description, "5 days ago");
        assert_eq!(page_review.source, "tripadvisor");
    }

    #[test]
    fn test_wire_field_names() {
        let mut sources_used = BTreeMap::new();
        sources_used.insert("google".to_string(), true);
        sources_used.insert("tripadvisor".to_string(), false);

        let response = assemble(&[review()], 1, 7, 1, false, sources_used, fixed_now(), false);
        let value = serde_json::to_value(&response).unwrap();

        for field in [
            "reviews",
            "page",
            "per_page",
            "total_reviews",
            "has_next",
            "sources_used",
            "fetched_at",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        // Only fallback responses carry the fallback marker.
        assert!(value.get("fallback_mode").is_none());

        let entry = &value["reviews"][0];
        for field in [
            "review_id",
            "author_name",
            "author_photo_url",
            "rating",
            "text",
            "relative_time_description",
            "source",
        ] {
            assert!(entry.get(field).is_some(), "missing review field {}", field);
        }

        assert_eq!(value["sources_used"]["google"], true);
        assert!(value["fetched_at"].as_str().unwrap().starts_with("2024-06-01T12:00:00"));
    }

    #[test]
    fn test_fallback_marker_is_serialized_when_set() {
        let response = assemble(&[], 1, 7, 0, false, BTreeMap::new(), fixed_now(), true);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["fallback_mode"], true);
    }
}
