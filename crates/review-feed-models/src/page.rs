use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One review as it appears in a page payload. Field names are part of the
/// external compatibility contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageReview {
    pub review_id: String,
    pub author_name: String,
    pub author_photo_url: String,
    pub rating: u8,
    pub text: String,
    pub relative_time_description: String,
    pub source: String,
}

/// The externally visible paginated payload.
///
/// `sources_used` reports which providers are configured, independent of
/// whether they contributed to this particular page. `fallback_mode` is
/// serialized only in fallback responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageResponse {
    pub reviews: Vec<PageReview>,
    pub page: u32,
    pub per_page: u32,
    pub total_reviews: usize,
    pub has_next: bool,
    pub sources_used: BTreeMap<String, bool>,
    pub fetched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_mode: Option<bool>,
}
