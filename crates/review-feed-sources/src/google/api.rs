use chrono::{DateTime, Utc};
use reqwest::Client;
use review_feed_models::{Review, ReviewSource};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ProviderError;
use crate::normalize::{clean_text, coerce_rating, content_hash_id, value_as_epoch};

pub const SOURCE_NAME: &str = "google";

const PLACE_DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

/// Place Details envelope. Google signals errors in-band through `status`,
/// even on HTTP 200.
#[derive(Debug, Deserialize)]
pub struct GooglePlaceResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<GooglePlaceResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GooglePlaceResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub reviews: Vec<RawGoogleReview>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawGoogleReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub time: Option<Value>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Fetch the reviews attached to a place from the Place Details API.
pub async fn fetch_reviews(
    client: &Client,
    api_key: &str,
    place_id: &str,
) -> Result<Vec<RawGoogleReview>, ProviderError> {
    debug!(place_id, "Fetching Google reviews");

    let response = client
        .get(PLACE_DETAILS_URL)
        .query(&[
            ("place_id", place_id),
            ("fields", "reviews,rating,user_ratings_total,name,formatted_address"),
            ("key", api_key),
            ("language", "en"),
        ])
        .send()
        .await
        .map_err(|e| ProviderError::Transport {
            source_name: SOURCE_NAME,
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            source_name: SOURCE_NAME,
            status,
        });
    }

    let payload: GooglePlaceResponse =
        response.json().await.map_err(|e| ProviderError::Parse {
            source_name: SOURCE_NAME,
            detail: e.to_string(),
        })?;

    if payload.status != "OK" {
        return Err(ProviderError::Api {
            source_name: SOURCE_NAME,
            status: payload.status,
            message: payload
                .error_message
                .unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    let result = payload.result.unwrap_or_default();
    if let Some(name) = &result.name {
        debug!(
            business = %name,
            total_ratings = result.user_ratings_total.unwrap_or(0),
            "Google place matched"
        );
    }

    Ok(result.reviews)
}

/// Map one raw Google record into the canonical shape.
///
/// Google hides some reviewer names behind the "A Google User" sentinel;
/// both that and a missing name collapse to the "Google User" placeholder.
pub fn normalize(raw: &RawGoogleReview, now: DateTime<Utc>) -> Option<Review> {
    let text = clean_text(raw.text.as_deref().unwrap_or_default())?;
    let rating = coerce_rating(raw.rating.as_ref())?;

    let author_name = raw
        .author_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "A Google User")
        .map(str::to_string)
        .unwrap_or_else(|| "Google User".to_string());

    let id = match raw.time.as_ref().and_then(value_as_epoch) {
        Some(time) => format!("google_{}", time),
        None => format!("google_{}", content_hash_id(&text)),
    };

    let timestamp = parse_review_time(raw.time.as_ref(), now);

    Some(Review {
        id,
        author_name,
        author_photo_url: raw.profile_photo_url.clone().unwrap_or_default(),
        rating,
        text,
        timestamp,
        source: ReviewSource::Google,
        language: raw.language.clone(),
        title: None,
    })
}

/// Google review times are unix epoch seconds. Anything unreadable resolves
/// to `now` rather than failing the record.
pub fn parse_review_time(raw: Option<&Value>, now: DateTime<Utc>) -> i64 {
    raw.and_then(value_as_epoch)
        .unwrap_or_else(|| now.timestamp())
}
