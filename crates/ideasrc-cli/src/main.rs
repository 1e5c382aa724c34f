mod db;
mod ingest;
mod process;
mod query;
mod scrape;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ideasrc_core::Platform;
use ideasrc_db::{DEFAULT_LIST_LIMIT, DEFAULT_UNPROCESSED_LIMIT};
use ideasrc_scraper::HnFeed;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ideasrc-cli")]
#[command(about = "Collect, score and export content ideas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Fetch ideas from a live source
    Scrape {
        #[command(subcommand)]
        command: ScrapeCommands,
    },
    /// Store records from a JSON file
    Ingest {
        #[arg(long)]
        platform: Platform,
        /// Value written to the `source` column
        #[arg(long)]
        source: String,
        /// JSON array of `{source_id, title, description?, tags?, metrics}`
        #[arg(long)]
        file: PathBuf,
    },
    /// Show stored ideas
    List {
        #[arg(long)]
        platform: Platform,
        #[arg(long)]
        source: Option<String>,
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: i64,
        /// Sort column (descending); unknown columns fall back to score
        #[arg(long)]
        order_by: Option<String>,
    },
    /// Count stored ideas per source
    Stats {
        #[arg(long)]
        platform: Platform,
    },
    /// Convert unprocessed ideas and mark them processed
    Process {
        #[arg(long)]
        platform: Platform,
        #[arg(long, default_value_t = DEFAULT_UNPROCESSED_LIMIT)]
        limit: i64,
        /// Write the JSON array here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete every stored idea for a platform
    Clear {
        #[arg(long)]
        platform: Platform,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate {
        #[arg(long)]
        platform: Platform,
    },
    /// Check that the database is reachable
    Ping {
        #[arg(long)]
        platform: Platform,
    },
}

#[derive(Debug, Subcommand)]
enum ScrapeCommands {
    /// Hacker News stories via the Firebase API
    Hackernews {
        #[arg(long, default_value = "top")]
        feed: HnFeed,
        /// Defaults to `IDEASRC_MAX_ITEMS_PER_SCRAPE`
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ideasrc_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Db { command } => match command {
            DbCommands::Migrate { platform } => db::run_db_migrate(&config, platform).await?,
            DbCommands::Ping { platform } => db::run_db_ping(&config, platform).await?,
        },
        Commands::Scrape { command } => match command {
            ScrapeCommands::Hackernews { feed, limit } => {
                scrape::run_scrape_hackernews(&config, feed, limit).await?;
            }
        },
        Commands::Ingest {
            platform,
            source,
            file,
        } => ingest::run_ingest(&config, platform, &source, &file).await?,
        Commands::List {
            platform,
            source,
            limit,
            order_by,
        } => {
            query::run_list(
                &config,
                platform,
                source.as_deref(),
                limit,
                order_by.as_deref(),
            )
            .await?;
        }
        Commands::Stats { platform } => query::run_stats(&config, platform).await?,
        Commands::Process {
            platform,
            limit,
            output,
        } => process::run_process(&config, platform, limit, output.as_deref()).await?,
        Commands::Clear { platform, yes } => db::run_clear(&config, platform, yes).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
