use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use review_feed_config::{Config, PathManager};
use review_feed_core::{MemoryPageCache, ResponseCache, ReviewService, SystemClock};
use review_feed_models::PageResponse;
use review_feed_sources::ProviderRegistry;
use std::sync::Arc;
use std::time::Duration;

use crate::output::{Output, OutputFormat};

pub async fn run_reviews(page: u32, per_page: u32, output: &Output) -> Result<()> {
    tracing::debug!("Reviews command started");

    let path_manager = PathManager::default();
    let mut config = Config::load_or_default(&path_manager.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;
    config.apply_env_overrides();
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;

    let registry = ProviderRegistry::new();
    let providers = registry
        .create_all_providers(&config)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create providers: {}", e))?;

    if providers.is_empty() {
        output.warn("No review providers configured; the curated fallback set will be served");
    }

    let clock = Arc::new(SystemClock);
    let cache: Arc<dyn ResponseCache> =
        Arc::new(MemoryPageCache::new(config.cache.ttl_secs, clock.clone()));
    let service = ReviewService::new(providers, config.sources_status(), cache, clock);

    let spinner = if output.format() == OutputFormat::Human && !output.is_quiet() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner());
        pb.set_message("Fetching reviews from providers...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let response = service.get_reviews(page, per_page).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match output.format() {
        OutputFormat::Human => print_human(&response, output),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = serde_json::to_value(&response)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize response: {}", e))?;
            output.json(&value);
        }
    }

    Ok(())
}

fn print_human(response: &PageResponse, output: &Output) {
    if response.fallback_mode == Some(true) {
        output.warn("No provider returned reviews; showing the curated fallback set");
    }

    if response.reviews.is_empty() {
        output.info(format!(
            "Page {} is empty ({} reviews total)",
            response.page, response.total_reviews
        ));
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Author", "Rating", "When", "Source", "Review"]);

    for review in &response.reviews {
        table.add_row(vec![
            review.author_name.clone(),
            format!("{}/5", review.rating),
            review.relative_time_description.clone(),
            review.source.clone(),
            truncate(&review.text, 80),
        ]);
    }

    output.println(table.to_string());
    output.info(format!(
        "Page {} of {} reviews ({} per page{})",
        response.page,
        response.total_reviews,
        response.per_page,
        if response.has_next {
            ", more available"
        } else {
            ""
        }
    ));

    let configured: Vec<&str> = response
        .sources_used
        .iter()
        .filter(|(_, configured)| **configured)
        .map(|(name, _)| name.as_str())
        .collect();
    if !configured.is_empty() {
        output.info(format!("Sources: {}", configured.join(", ")));
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let shortened: String = text.chars().take(max_chars).collect();
    format!("{}...", shortened.trim_end())
}
