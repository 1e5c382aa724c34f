use ideasrc_core::{AppConfig, Platform};
use ideasrc_metrics::MetricsContext;
use ideasrc_scraper::{HackerNewsClient, HnFeed};

use crate::{ingest, store};

pub(crate) async fn run_scrape_hackernews(
    config: &AppConfig,
    feed: HnFeed,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let limit = limit.unwrap_or(config.max_items_per_scrape);
    let client = HackerNewsClient::with_base_url(
        &config.hn_api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    let records = client.scrape(feed, limit).await?;
    if records.is_empty() {
        println!("no stories collected from the {feed} feed");
        return Ok(());
    }

    let pool = store::open(config, Platform::HackerNews).await?;
    let ctx = MetricsContext::now(config.metrics_policy);
    let summary = ingest::store_records(&pool, records, Platform::HackerNews, &ctx).await;

    println!(
        "{}: {} created, {} updated, {} failed",
        feed.source(),
        summary.created,
        summary.updated,
        summary.failed
    );
    Ok(())
}
