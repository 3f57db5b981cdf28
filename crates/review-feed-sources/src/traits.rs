use async_trait::async_trait;
use review_feed_models::{Review, ReviewSource};

use crate::error::ProviderError;

/// One upstream review provider.
///
/// Implementations own their provider-specific payload parsing and date
/// handling and return already-normalized canonical reviews. An unconfigured
/// provider resolves to an empty list without touching the network.
#[async_trait]
pub trait ReviewProvider: Send + Sync {
    fn source_name(&self) -> &'static str;

    fn source(&self) -> ReviewSource;

    /// Whether the credentials needed for network calls are present.
    fn is_configured(&self) -> bool;

    /// Fetch and normalize this provider's reviews.
    async fn fetch_reviews(&self) -> Result<Vec<Review>, ProviderError>;
}
