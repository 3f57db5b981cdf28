use reqwest::Client;
use std::time::Duration;

/// Every provider request is bounded by this timeout so a slow upstream
/// cannot stall a fetch cycle.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = "Mozilla/5.0 (compatible; GuestVoice/1.0)";

/// Create the reqwest Client shared by provider adapters.
pub fn http_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}
