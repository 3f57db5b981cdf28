use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use review_feed_models::{Review, ReviewSource};
use tracing::{debug, info};

use crate::error::ProviderError;
use crate::google::api;
use crate::http::http_client;
use crate::traits::ReviewProvider;

pub struct GoogleClient {
    client: Client,
    api_key: String,
    place_id: String,
}

impl GoogleClient {
    pub fn new(api_key: String, place_id: String) -> Self {
        Self {
            client: http_client(),
            api_key,
            place_id,
        }
    }
}

#[async_trait]
impl ReviewProvider for GoogleClient {
    fn source_name(&self) -> &'static str {
        api::SOURCE_NAME
    }

    fn source(&self) -> ReviewSource {
        ReviewSource::Google
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.place_id.is_empty()
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>, ProviderError> {
        if !self.is_configured() {
            debug!("Google Places credentials not configured, skipping fetch");
            return Ok(Vec::new());
        }

        let raw = api::fetch_reviews(&self.client, &self.api_key, &self.place_id).await?;
        let fetched = raw.len();
        let now = Utc::now();
        let reviews: Vec<Review> = raw.iter().filter_map(|r| api::normalize(r, now)).collect();
        info!("Normalized {} of {} Google reviews", reviews.len(), fetched);
        Ok(reviews)
    }
}
