use clap::{ArgAction, Parser, Subcommand};
use commands::{clear, config, reviews};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "guestvoice")]
#[command(about = "GuestVoice - One review feed from every place your guests talk about you")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file instead of stderr (rotated daily)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one page of aggregated reviews
    #[command(
        long_about = "Run one aggregation cycle across all configured review providers and print the requested page. When no provider returns any reviews, the curated fallback set is served instead."
    )]
    Reviews {
        /// 1-indexed page to fetch
        #[arg(long, default_value_t = 1, value_name = "N")]
        page: u32,

        /// Reviews per page
        #[arg(long = "per-page", default_value_t = 7, value_name = "N")]
        per_page: u32,
    },
    /// Clear cached data
    #[command(
        long_about = "Clear cached review pages. Only the fixed grid of common keys (pages 1-10 at 7 and 30 per page) is enumerated; entries for other page sizes are not touched."
    )]
    Clear {
        /// Clear the cached page grid
        #[arg(long, action = ArgAction::SetTrue)]
        cache: bool,
    },
    /// Configure providers and settings
    #[command(
        long_about = "Manage provider credentials and cache settings. Use subcommands to view the current configuration, run the interactive setup wizard, or print the config file location."
    )]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show full key values instead of masked ones
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Interactively set up provider credentials
    Init,
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialize logging: {}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Reviews { page, per_page } => {
            reviews::run_reviews(page, per_page, &output).await
        }
        Commands::Clear { cache } => clear::run_clear(cache, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
