use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Business location id the TripAdvisor Content API is queried for.
pub const DEFAULT_TRIPADVISOR_LOCATION_ID: &str = "24938712";

/// Assembled pages stay cached for six hours unless overridden.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 21_600;

const ENV_TRIPADVISOR_API_KEY: &str = "GUESTVOICE_TRIPADVISOR_API_KEY";
const ENV_TRIPADVISOR_LOCATION_ID: &str = "GUESTVOICE_TRIPADVISOR_LOCATION_ID";
const ENV_GOOGLE_API_KEY: &str = "GUESTVOICE_GOOGLE_API_KEY";
const ENV_GOOGLE_PLACE_ID: &str = "GUESTVOICE_GOOGLE_PLACE_ID";
const ENV_CACHE_TTL_SECS: &str = "GUESTVOICE_CACHE_TTL_SECS";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tripadvisor: Option<TripadvisorConfig>,
    #[serde(default)]
    pub google: Option<GoogleConfig>,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TripadvisorConfig {
    pub enabled: bool,
    pub api_key: String,
    #[serde(default = "default_tripadvisor_location_id")]
    pub location_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleConfig {
    pub enabled: bool,
    pub api_key: String,
    pub place_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_tripadvisor_location_id() -> String {
    DEFAULT_TRIPADVISOR_LOCATION_ID.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or start from defaults when none exists yet.
    /// A missing file is the normal first-run state, not an error.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overlay credentials and cache settings from the process environment.
    /// Setting a provider's key via env enables that provider even without a
    /// config file section.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ENV_TRIPADVISOR_API_KEY).filter(|v| !v.is_empty()) {
            let entry = self.tripadvisor.get_or_insert_with(|| TripadvisorConfig {
                enabled: true,
                api_key: String::new(),
                location_id: default_tripadvisor_location_id(),
            });
            entry.api_key = key;
            entry.enabled = true;
        }
        if let Some(location_id) = lookup(ENV_TRIPADVISOR_LOCATION_ID).filter(|v| !v.is_empty()) {
            if let Some(entry) = self.tripadvisor.as_mut() {
                entry.location_id = location_id;
            }
        }

        if let Some(key) = lookup(ENV_GOOGLE_API_KEY).filter(|v| !v.is_empty()) {
            let entry = self.google.get_or_insert_with(|| GoogleConfig {
                enabled: true,
                api_key: String::new(),
                place_id: String::new(),
            });
            entry.api_key = key;
            entry.enabled = true;
        }
        if let Some(place_id) = lookup(ENV_GOOGLE_PLACE_ID).filter(|v| !v.is_empty()) {
            if let Some(entry) = self.google.as_mut() {
                entry.place_id = place_id;
            }
        }

        if let Some(ttl) = lookup(ENV_CACHE_TTL_SECS).and_then(|v| v.trim().parse::<u64>().ok()) {
            self.cache.ttl_secs = ttl;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cache.ttl_secs == 0 {
            return Err(anyhow::anyhow!("cache.ttl_secs must be greater than zero"));
        }
        Ok(())
    }

    pub fn is_tripadvisor_configured(&self) -> bool {
        if let Some(ref tripadvisor) = self.tripadvisor {
            tripadvisor.enabled
                && !tripadvisor.api_key.is_empty()
                && tripadvisor.api_key != "YOUR_API_KEY"
                && !tripadvisor.location_id.is_empty()
        } else {
            false
        }
    }

    pub fn is_google_configured(&self) -> bool {
        if let Some(ref google) = self.google {
            google.enabled
                && !google.api_key.is_empty()
                && google.api_key != "YOUR_API_KEY"
                && !google.place_id.is_empty()
        } else {
            false
        }
    }

    /// Per-provider availability map reported in page payloads as
    /// `sources_used`. A provider is listed whether or not it contributed
    /// any reviews to a given page.
    pub fn sources_status(&self) -> BTreeMap<String, bool> {
        let mut status = BTreeMap::new();
        status.insert("tripadvisor".to_string(), self.is_tripadvisor_configured());
        status.insert("google".to_string(), self.is_google_configured());
        status
    }

    /// Get list of configured and enabled providers
    pub fn configured_providers(&self) -> Vec<String> {
        let mut providers = Vec::new();
        if self.is_tripadvisor_configured() {
            providers.push("tripadvisor".to_string());
        }
        if self.is_google_configured() {
            providers.push("google".to_string());
        }
        providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            tripadvisor: Some(TripadvisorConfig {
                enabled: true,
                api_key: "test_key".to_string(),
                location_id: "12345".to_string(),
            }),
            google: None,
            cache: CacheConfig { ttl_secs: 600 },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.tripadvisor.as_ref().unwrap().api_key, "test_key");
        assert_eq!(loaded.tripadvisor.as_ref().unwrap().location_id, "12345");
        assert!(loaded.google.is_none());
        assert_eq!(loaded.cache.ttl_secs, 600);
    }

    #[test]
    fn test_load_or_default_for_missing_file() {
        let path = std::env::temp_dir().join("guestvoice-config-that-does-not-exist.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert!(config.tripadvisor.is_none());
        assert!(config.google.is_none());
        assert_eq!(config.cache.ttl_secs, DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn test_location_id_defaults_when_absent() {
        let config: Config = toml::from_str(
            r#"
            [tripadvisor]
            enabled = true
            api_key = "abc"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.tripadvisor.unwrap().location_id,
            DEFAULT_TRIPADVISOR_LOCATION_ID
        );
    }

    #[test]
    fn test_sources_status() {
        let mut config = Config::default();
        let status = config.sources_status();
        assert_eq!(status.get("tripadvisor"), Some(&false));
        assert_eq!(status.get("google"), Some(&false));

        config.google = Some(GoogleConfig {
            enabled: true,
            api_key: "key".to_string(),
            place_id: "place".to_string(),
        });
        let status = config.sources_status();
        assert_eq!(status.get("google"), Some(&true));
        assert_eq!(config.configured_providers(), vec!["google".to_string()]);
    }

    #[test]
    fn test_placeholder_key_is_not_configured() {
        let config = Config {
            tripadvisor: Some(TripadvisorConfig {
                enabled: true,
                api_key: "YOUR_API_KEY".to_string(),
                location_id: "12345".to_string(),
            }),
            google: Some(GoogleConfig {
                enabled: true,
                api_key: "key".to_string(),
                place_id: String::new(),
            }),
            cache: CacheConfig::default(),
        };
        assert!(!config.is_tripadvisor_configured());
        assert!(!config.is_google_configured());
    }

    #[test]
    fn test_env_overrides() {
        let mut env = HashMap::new();
        env.insert("GUESTVOICE_GOOGLE_API_KEY", "env-key".to_string());
        env.insert("GUESTVOICE_GOOGLE_PLACE_ID", "env-place".to_string());
        env.insert("GUESTVOICE_CACHE_TTL_SECS", "120".to_string());

        let mut config = Config::default();
        config.apply_overrides_from(|name| env.get(name).cloned());

        assert!(config.is_google_configured());
        assert_eq!(config.google.as_ref().unwrap().api_key, "env-key");
        assert_eq!(config.cache.ttl_secs, 120);
        assert!(config.tripadvisor.is_none());
    }

    #[test]
    fn test_env_override_keeps_file_location_id() {
        let mut config = Config {
            tripadvisor: Some(TripadvisorConfig {
                enabled: false,
                api_key: String::new(),
                location_id: "98765".to_string(),
            }),
            google: None,
            cache: CacheConfig::default(),
        };

        let mut env = HashMap::new();
        env.insert("GUESTVOICE_TRIPADVISOR_API_KEY", "env-key".to_string());
        config.apply_overrides_from(|name| env.get(name).cloned());

        let tripadvisor = config.tripadvisor.as_ref().unwrap();
        assert!(tripadvisor.enabled);
        assert_eq!(tripadvisor.api_key, "env-key");
        assert_eq!(tripadvisor.location_id, "98765");
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = Config {
            tripadvisor: None,
            google: None,
            cache: CacheConfig { ttl_secs: 0 },
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
