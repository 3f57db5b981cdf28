use color_eyre::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
use review_feed_config::config::{DEFAULT_CACHE_TTL_SECS, DEFAULT_TRIPADVISOR_LOCATION_ID};
use review_feed_config::{CacheConfig, Config, GoogleConfig, PathManager, TripadvisorConfig};
use review_feed_sources::ProviderRegistry;

use crate::output::Output;
use crate::ConfigCommands;

pub async fn run_config(cmd: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match cmd {
        Some(ConfigCommands::Show { full }) => show_config(full, output),
        Some(ConfigCommands::Path) => show_path(output),
        Some(ConfigCommands::Init) | None => init_config(output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let mut config = Config::load_or_default(&path_manager.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;
    config.apply_env_overrides();

    output.println(format!("Configuration: {}", path_manager.config_file().display()));
    output.println("");

    match &config.tripadvisor {
        Some(tripadvisor) => {
            output.println(format!(
                "[tripadvisor] enabled={} api_key={} location_id={}",
                tripadvisor.enabled,
                mask(&tripadvisor.api_key, full),
                tripadvisor.location_id
            ));
        }
        None => output.println("[tripadvisor] not configured"),
    }

    match &config.google {
        Some(google) => {
            output.println(format!(
                "[google] enabled={} api_key={} place_id={}",
                google.enabled,
                mask(&google.api_key, full),
                google.place_id
            ));
        }
        None => output.println("[google] not configured"),
    }

    output.println(format!("[cache] ttl_secs={}", config.cache.ttl_secs));

    let registry = ProviderRegistry::new();
    if let Err(issue) = registry.validate_all_configs(&config) {
        output.warn(format!("Configuration issue: {}", issue));
    }

    let configured = config.configured_providers();
    if configured.is_empty() {
        output.warn("No providers are configured; only fallback reviews will be served");
    } else {
        output.success(format!("Active providers: {}", configured.join(", ")));
    }

    Ok(())
}

fn show_path(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    output.println(path_manager.config_file().display().to_string());
    Ok(())
}

fn init_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create config directory: {}", e))?;

    let theme = ColorfulTheme::default();
    let mut config = Config::load_or_default(&path_manager.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;

    if Confirm::with_theme(&theme)
        .with_prompt("Enable TripAdvisor reviews?")
        .default(config.tripadvisor.is_some())
        .interact()?
    {
        let api_key: String = Password::with_theme(&theme)
            .with_prompt("TripAdvisor Content API key")
            .allow_empty_password(true)
            .interact()?;
        let location_id: String = Input::with_theme(&theme)
            .with_prompt("TripAdvisor location id")
            .default(
                config
                    .tripadvisor
                    .as_ref()
                    .map(|t| t.location_id.clone())
                    .unwrap_or_else(|| DEFAULT_TRIPADVISOR_LOCATION_ID.to_string()),
            )
            .interact_text()?;

        config.tripadvisor = Some(TripadvisorConfig {
            enabled: true,
            api_key,
            location_id,
        });
    } else {
        config.tripadvisor = None;
    }

    if Confirm::with_theme(&theme)
        .with_prompt("Enable Google Places reviews?")
        .default(config.google.is_some())
        .interact()?
    {
        let api_key: String = Password::with_theme(&theme)
            .with_prompt("Google Places API key")
            .allow_empty_password(true)
            .interact()?;
        let place_id: String = Input::with_theme(&theme)
            .with_prompt("Google place id")
            .default(
                config
                    .google
                    .as_ref()
                    .map(|g| g.place_id.clone())
                    .unwrap_or_default(),
            )
            .allow_empty(true)
            .interact_text()?;

        config.google = Some(GoogleConfig {
            enabled: true,
            api_key,
            place_id,
        });
    } else {
        config.google = None;
    }

    let ttl_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Cache TTL in seconds")
        .default(if config.cache.ttl_secs > 0 {
            config.cache.ttl_secs
        } else {
            DEFAULT_CACHE_TTL_SECS
        })
        .interact_text()?;
    config.cache = CacheConfig { ttl_secs };

    config
        .save_to_file(&path_manager.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save configuration: {}", e))?;

    output.success(format!(
        "Configuration saved to {}",
        path_manager.config_file().display()
    ));

    let configured = config.configured_providers();
    if configured.is_empty() {
        output.warn("No providers have credentials yet; reviews will come from the fallback set");
    }

    Ok(())
}

fn mask(secret: &str, full: bool) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    if full {
        return secret.to_string();
    }
    let tail: String = secret
        .chars()
        .skip(secret.chars().count().saturating_sub(4))
        .collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_hides_most_of_the_key() {
        assert_eq!(mask("", false), "(not set)");
        assert_eq!(mask("abcdef123456", false), "****3456");
        assert_eq!(mask("abcdef123456", true), "abcdef123456");
    }
}
