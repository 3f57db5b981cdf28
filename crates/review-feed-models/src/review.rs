use serde::{Deserialize, Serialize};

use crate::source::ReviewSource;

/// Canonical review record, immutable once normalized.
///
/// `id` is provider-namespaced so records from different upstreams cannot
/// collide within a fetch cycle. `timestamp` (epoch seconds) is the sole
/// sort key. `text` is never empty; records without usable text are dropped
/// during normalization and never reach this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub author_name: String,
    pub author_photo_url: String,
    pub rating: u8,
    pub text: String,
    pub timestamp: i64,
    pub source: ReviewSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
