use futures::future::join_all;
use review_feed_models::Review;
use review_feed_sources::ReviewProvider;
use tracing::{info, warn};

/// Fans out to every configured provider and merges whatever comes back.
///
/// Providers are independent failure domains: one failing, timing out, or
/// returning garbage is logged and contributes zero reviews without
/// touching the others. An all-empty merge is a state the caller handles
/// (fallback), not an error.
pub struct Aggregator {
    providers: Vec<Box<dyn ReviewProvider>>,
}

impl Aggregator {
    pub fn new(providers: Vec<Box<dyn ReviewProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.source_name()).collect()
    }

    /// Run one fetch cycle across all providers. Fetches run concurrently,
    /// bounding cycle latency to the slowest provider.
    pub async fn collect_all(&self) -> Vec<Review> {
        let fetches = self.providers.iter().map(|provider| async move {
            (provider.source_name(), provider.fetch_reviews().await)
        });

        let mut merged = Vec::new();
        for (name, outcome) in join_all(fetches).await {
            match outcome {
                Ok(reviews) => {
                    if !reviews.is_empty() {
                        info!("Fetched {} reviews from {}", reviews.len(), name);
                    }
                    merged.extend(reviews);
                }
                Err(err) => {
                    warn!("{} fetch failed: {}", name, err);
                }
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use review_feed_models::ReviewSource;
    use review_feed_sources::ProviderError;

    struct StaticProvider {
        name: &'static str,
        reviews: Vec<Review>,
        fail: bool,
    }

    #[async_trait]
    impl ReviewProvider for StaticProvider {
        fn source_name(&self) -> &'static str {
            self.name
        }

        fn source(&self) -> ReviewSource {
            ReviewSource::Google
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn fetch_reviews(&self) -> Result<Vec<Review>, ProviderError> {
            if self.fail {
                return Err(ProviderError::Parse {
                    source_name: self.name,
                    detail: "malformed payload".to_string(),
                });
            }
            Ok(self.reviews.clone())
        }
    }

    fn review(id: &str) -> Review {
        Review {
            id: id.to_string(),
            author_name: "Author".to_string(),
            author_photo_url: String::new(),
            rating: 4,
            text: "Some review text".to_string(),
            timestamp: 1_700_000_000,
            source: ReviewSource::Google,
            language: None,
            title: None,
        }
    }

    #[tokio::test]
    async fn test_failing_provider_does_not_block_others() {
        let aggregator = Aggregator::new(vec![
            Box::new(StaticProvider {
                name: "broken",
                reviews: vec![],
                fail: true,
            }),
            Box::new(StaticProvider {
                name: "healthy",
                reviews: vec![review("a"), review("b")],
                fail: false,
            }),
        ]);

        let merged = aggregator.collect_all().await;
        assert_eq!(merged.len(), 2);
    }

    #[tokio::test]
    async fn test_all_failing_yields_empty_merge() {
        let aggregator = Aggregator::new(vec![
            Box::new(StaticProvider {
                name: "one",
                reviews: vec![],
                fail: true,
            }),
            Box::new(StaticProvider {
                name: "two",
                reviews: vec![],
                fail: true,
            }),
        ]);

        assert!(aggregator.collect_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_no_providers_yields_empty_merge() {
        let aggregator = Aggregator::new(Vec::new());
        assert!(aggregator.collect_all().await.is_empty());
        assert!(aggregator.provider_names().is_empty());
    }
}
