use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::Client;
use review_feed_models::{Review, ReviewSource};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::normalize::{clean_text, coerce_rating, content_hash_id};

pub const SOURCE_NAME: &str = "tripadvisor";

const API_BASE: &str = "https://api.content.tripadvisor.com/api/v1";

#[derive(Debug, Deserialize)]
pub struct TripadvisorResponse {
    #[serde(default)]
    pub data: Vec<RawTripadvisorReview>,
}

/// One review as returned by the TripAdvisor Content API v1. Every field is
/// optional; normalization decides what is usable.
#[derive(Debug, Default, Deserialize)]
pub struct RawTripadvisorReview {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub user: Option<TripadvisorUser>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TripadvisorUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<TripadvisorAvatar>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TripadvisorAvatar {
    #[serde(default)]
    pub small: Option<String>,
}

/// Fetch the latest reviews for a location from the Content API.
pub async fn fetch_reviews(
    client: &Client,
    api_key: &str,
    location_id: &str,
) -> Result<Vec<RawTripadvisorReview>, ProviderError> {
    let url = format!("{}/location/{}/reviews", API_BASE, location_id);
    debug!(location_id, "Fetching TripAdvisor reviews");

    let response = client
        .get(&url)
        .query(&[("key", api_key), ("language", "en"), ("limit", "20")])
        .header("Accept", "application/json")
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

    let payload: TripadvisorResponse =
        response.json().await.map_err(|e| ProviderError::Parse {
            source_name: SOURCE_NAME,
            detail: e.to_string(),
        })?;

    Ok(payload.data)
}

/// Map one raw TripAdvisor record into the canonical shape.
///
/// Records without usable text, or with a non-numeric rating, are dropped.
pub fn normalize(raw: &RawTripadvisorReview, now: DateTime<Utc>) -> Option<Review> {
    let text = clean_text(raw.text.as_deref().unwrap_or_default())?;
    let rating = coerce_rating(raw.rating.as_ref())?;

    let user = raw.user.as_ref();
    let author_name = user
        .and_then(|u| u.username.clone())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "TripAdvisor User".to_string());
    let author_photo_url = user
        .and_then(|u| u.avatar.as_ref())
        .and_then(|avatar| avatar.small.clone())
        .unwrap_or_default();

    let id = match raw.id {
        Some(native) => format!("ta_{}", native),
        None => format!("ta_{}", content_hash_id(&text)),
    };

    let timestamp = raw
        .published_date
        .as_deref()
        .map(|date| parse_published_date(date, now))
        .unwrap_or_else(|| now.timestamp());

    Some(Review {
        id,
        author_name,
        author_photo_url,
        rating,
        text,
        timestamp,
        source: ReviewSource::Tripadvisor,
        language: raw.language.clone(),
        title: raw.title.clone().filter(|title| !title.is_empty()),
    })
}

/// Parse a `published_date`, trying each accepted format in order. An
/// unparseable date resolves to `now` rather than failing the record.
pub fn parse_published_date(date: &str, now: DateTime<Utc>) -> i64 {
    let trimmed = date.trim().trim_end_matches('Z');
    if trimmed.is_empty() {
        return now.timestamp();
    }

    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return parsed.and_utc().timestamp();
        }
    }

    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
            return midnight.and_utc().timestamp();
        }
    }

    warn!(date, "Unrecognized TripAdvisor date format");
    now.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn sample_payload() -> TripadvisorResponse {
        serde_json::from_str(
            r#"{
                "data": [
                    {
                        "id": 987654,
                        "user": {
                            "username": "wanderer42",
                            "avatar": {"small": "https://media.example/avatar_s.jpg"}
                        },
                        "rating": 5,
                        "text": "A wonderful day out with a knowledgeable guide.",
                        "published_date": "2024-05-14T10:30:00.000Z",
                        "title": "Wonderful day",
                        "language": "en"
                    },
                    {
                        "id": 987655,
                        "rating": 4,
                        "text": "   ",
                        "published_date": "2024-05-10"
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_maps_fields() {
        let payload = sample_payload();
        let review = normalize(&payload.data[0], fixed_now()).unwrap();

        assert_eq!(review.id, "ta_987654");
        assert_eq!(review.author_name, "wanderer42");
        assert_eq!(review.author_photo_url, "https://media.example/avatar_s.jpg");
        assert_eq!(review.rating, 5);
        assert_eq!(review.source, ReviewSource::Tripadvisor);
        assert_eq!(review.title.as_deref(), Some("Wonderful day"));
        assert_eq!(review.language.as_deref(), Some("en"));
        assert_eq!(
            review.timestamp,
            Utc.with_ymd_and_hms(2024, 5, 14, 10, 30, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_normalize_drops_empty_text() {
        let payload = sample_payload();
        assert!(normalize(&payload.data[1], fixed_now()).is_none());
    }

    #[test]
    fn test_normalize_drops_non_numeric_rating() {
        let raw = RawTripadvisorReview {
            rating: Some(serde_json::json!("abc")),
            text: Some("Readable text".to_string()),
            ..Default::default()
        };
        assert!(normalize(&raw, fixed_now()).is_none());
    }

    #[test]
    fn test_normalize_defaults_author_and_hashes_missing_id() {
        let raw = RawTripadvisorReview {
            rating: Some(serde_json::json!(6)),
            text: Some("Out of range rating still clamps".to_string()),
            ..Default::default()
        };
        let review = normalize(&raw, fixed_now()).unwrap();
        assert_eq!(review.author_name, "TripAdvisor User");
        assert_eq!(review.author_photo_url, "");
        assert_eq!(review.rating, 5);
        assert!(review.id.starts_with("ta_"));
        assert_eq!(review.timestamp, fixed_now().timestamp());
    }

    #[test]
    fn test_parse_published_date_formats() {
        let now = fixed_now();
        let with_fraction = parse_published_date("2024-05-14T10:30:00.250Z", now);
        let without_fraction = parse_published_date("2024-05-14T10:30:00Z", now);
        let date_only = parse_published_date("2024-05-14", now);
        let expected = Utc.with_ymd_and_hms(2024, 5, 14, 10, 30, 0).unwrap().timestamp();

        assert_eq!(with_fraction, expected);
        assert_eq!(without_fraction, expected);
        assert_eq!(
            date_only,
            Utc.with_ymd_and_hms(2024, 5, 14, 0, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_parse_published_date_falls_back_to_now() {
        let now = fixed_now();
        assert_eq!(parse_published_date("May 14, 2024", now), now.timestamp());
        assert_eq!(parse_published_date("", now), now.timestamp());
    }
}
