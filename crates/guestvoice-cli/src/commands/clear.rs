use color_eyre::Result;
use review_feed_config::{Config, PathManager};
use review_feed_core::{MemoryPageCache, ResponseCache, SystemClock};
use std::sync::Arc;

use crate::output::Output;

pub async fn run_clear(cache: bool, output: &Output) -> Result<()> {
    if !cache {
        output.warn("No clear option specified. Use --cache");
        output.println("\nExample: guestvoice clear --cache");
        return Ok(());
    }

    let path_manager = PathManager::default();
    let config = Config::load_or_default(&path_manager.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;

    let page_cache = MemoryPageCache::new(config.cache.ttl_secs, Arc::new(SystemClock));
    page_cache.clear_grid();

    output.success("Cleared cached review pages (pages 1-10 at 7 and 30 per page)");
    output.info("Entries for other page sizes are outside the clear grid and survive");
    Ok(())
}
