use thiserror::Error;

/// Failure talking to or understanding one upstream provider.
///
/// These never escape the aggregation: the aggregator logs them and treats
/// the provider as having contributed zero reviews for the cycle.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{source_name} request failed: {source}")]
    Transport {
        source_name: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{source_name} returned HTTP {status}")]
    Status {
        source_name: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{source_name} response could not be parsed: {detail}")]
    Parse {
        source_name: &'static str,
        detail: String,
    },

    #[error("{source_name} API error: {status} - {message}")]
    Api {
        source_name: &'static str,
        status: String,
        message: String,
    },
}

impl ProviderError {
    pub fn source_name(&self) -> &'static str {
        match self {
            ProviderError::Transport { source_name, .. }
            | ProviderError::Status { source_name, .. }
            | ProviderError::Parse { source_name, .. }
            | ProviderError::Api { source_name, .. } => source_name,
        }
    }
}
