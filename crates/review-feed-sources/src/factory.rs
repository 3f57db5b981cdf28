/// Provider factory pattern for creating review providers from configuration
///
/// This module centralizes provider creation, so adding an upstream means
/// registering one more factory.
use anyhow::Result;
use review_feed_config::Config;

use crate::ReviewProvider;

/// Factory trait for creating review providers from configuration
pub trait ProviderFactory: Send + Sync {
    /// The name of the provider this factory creates
    fn source_name(&self) -> &str;

    /// Create a provider instance from configuration
    /// Returns None if the provider is disabled or missing credentials.
    /// Missing credentials silently disable a provider, they never error.
    fn create_provider(&self, config: &Config) -> Result<Option<Box<dyn ReviewProvider>>>;

    /// Validate that the provider configuration is coherent. Used for
    /// diagnostics only; the create path stays permissive.
    fn validate_config(&self, config: &Config) -> Result<()>;
}

/// Registry of provider factories
pub struct ProviderRegistry {
    factories: std::collections::HashMap<String, Box<dyn ProviderFactory>>,
}

impl ProviderRegistry {
    /// Create a new registry with all built-in factories registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: std::collections::HashMap::new(),
        };

        registry.register(Box::new(tripadvisor::TripadvisorProviderFactory));
        registry.register(Box::new(google::GoogleProviderFactory));

        registry
    }

    /// Register a new factory
    pub fn register(&mut self, factory: Box<dyn ProviderFactory>) {
        self.factories
            .insert(factory.source_name().to_string(), factory);
    }

    /// Create all enabled providers from configuration
    pub fn create_all_providers(&self, config: &Config) -> Result<Vec<Box<dyn ReviewProvider>>> {
        let mut providers = Vec::new();

        for factory in self.factories.values() {
            if let Some(provider) = factory.create_provider(config)? {
                providers.push(provider);
            }
        }

        Ok(providers)
    }

    /// Create a specific provider by name
    pub fn create_provider_by_name(
        &self,
        name: &str,
        config: &Config,
    ) -> Result<Option<Box<dyn ReviewProvider>>> {
        if let Some(factory) = self.factories.get(name) {
            factory.create_provider(config)
        } else {
            Ok(None)
        }
    }

    /// Validate all provider configurations
    pub fn validate_all_configs(&self, config: &Config) -> Result<()> {
        for factory in self.factories.values() {
            factory.validate_config(config)?;
        }
        Ok(())
    }

    /// Get all registered factory names
    pub fn registered_providers(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a provider is registered
    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Factory implementations for each provider
mod tripadvisor {
    use super::*;
    use crate::tripadvisor::TripadvisorClient;

    pub struct TripadvisorProviderFactory;

    impl ProviderFactory for TripadvisorProviderFactory {
        fn source_name(&self) -> &str {
            "tripadvisor"
        }

        fn create_provider(&self, config: &Config) -> Result<Option<Box<dyn ReviewProvider>>> {
            if let Some(tripadvisor) = &config.tripadvisor {
                if config.is_tripadvisor_configured() {
                    return Ok(Some(Box::new(TripadvisorClient::new(
                        tripadvisor.api_key.clone(),
                        tripadvisor.location_id.clone(),
                    ))));
                }
            }
            Ok(None)
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if let Some(tripadvisor) = &config.tripadvisor {
                if tripadvisor.enabled {
                    if tripadvisor.api_key.is_empty() || tripadvisor.api_key == "YOUR_API_KEY" {
                        return Err(anyhow::anyhow!(
                            "TripAdvisor is enabled but api_key is not configured"
                        ));
                    }
                    if tripadvisor.location_id.is_empty() {
                        return Err(anyhow::anyhow!(
                            "TripAdvisor is enabled but location_id is not configured"
                        ));
                    }
                }
            }
            Ok(())
        }
    }
}

mod google {
    use super::*;
    use crate::google::GoogleClient;

    pub struct GoogleProviderFactory;

    impl ProviderFactory for GoogleProviderFactory {
        fn source_name(&self) -> &str {
            "google"
        }

        fn create_provider(&self, config: &Config) -> Result<Option<Box<dyn ReviewProvider>>> {
            if let Some(google) = &config.google {
                if config.is_google_configured() {
                    return Ok(Some(Box::new(GoogleClient::new(
                        google.api_key.clone(),
                        google.place_id.clone(),
                    ))));
                }
            }
            Ok(None)
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if let Some(google) = &config.google {
                if google.enabled {
                    if google.api_key.is_empty() || google.api_key == "YOUR_API_KEY" {
                        return Err(anyhow::anyhow!(
                            "Google Places is enabled but api_key is not configured"
                        ));
                    }
                    if google.place_id.is_empty() {
                        return Err(anyhow::anyhow!(
                            "Google Places is enabled but place_id is not configured"
                        ));
                    }
                }
            }
            Ok(())
        }
    }
}
