use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use review_feed_models::{Review, ReviewSource};
use tracing::{debug, info};

use crate::error::ProviderError;
use crate::http::http_client;
use crate::traits::ReviewProvider;
use crate::tripadvisor::api;

pub struct TripadvisorClient {
    client: Client,
    api_key: String,
    location_id: String,
}

impl TripadvisorClient {
    pub fn new(api_key: String, location_id: String) -> Self {
        Self {
            client: http_client(),
            api_key,
            location_id,
        }
    }
}

#[async_trait]
impl ReviewProvider for TripadvisorClient {
    fn source_name(&self) -> &'static str {
        api::SOURCE_NAME
    }

    fn source(&self) -> ReviewSource {
        ReviewSource::Tripadvisor
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.location_id.is_empty()
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>, ProviderError> {
        if !self.is_configured() {
            debug!("TripAdvisor credentials not configured, skipping fetch");
            return Ok(Vec::new());
        }

        let raw = api::fetch_reviews(&self.client, &self.api_key, &self.location_id).await?;
        let fetched = raw.len();
        let now = Utc::now();
        let reviews: Vec<Review> = raw.iter().filter_map(|r| api::normalize(r, now)).collect();
        info!("Normalized {} of {} TripAdvisor reviews", reviews.len(), fetched);
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_client_skips_network() {
        let client = TripadvisorClient::new(String::new(), "24938712".to_string());
        assert!(!client.is_configured());
        let reviews = client.fetch_reviews().await.unwrap();
        assert!(reviews.is_empty());
    }
}
