//! Scoring and storing scrape records.
//!
//! Both `ingest` (records from a file) and `scrape` (records from a live
//! API) end here: each record is run through its platform's metrics adapter
//! and upserted with the engagement rate as its score.

use std::path::Path;

use anyhow::Context;
use ideasrc_core::{AppConfig, NewIdea, Platform, RawScrapeRecord, ScoreDictionary, Tags};
use ideasrc_metrics::{MetricsContext, UniversalMetrics};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::store;

/// One entry of an ingest file.
#[derive(Debug, Deserialize)]
pub(crate) struct IngestEntry {
    pub source_id: SourceId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Tags>,
    /// Raw platform payload handed to the metrics adapter.
    #[serde(default)]
    pub metrics: Value,
}

/// Ids arrive as strings or bare numbers depending on the platform.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SourceId {
    Text(String),
    Number(serde_json::Number),
}

impl SourceId {
    fn into_string(self) -> String {
        match self {
            SourceId::Text(text) => text,
            SourceId::Number(n) => n.to_string(),
        }
    }
}

impl IngestEntry {
    fn into_raw_record(self, source: &str) -> RawScrapeRecord {
        RawScrapeRecord {
            source: source.to_owned(),
            source_id: self.source_id.into_string(),
            title: self.title,
            description: self.description,
            tags: self.tags.map(|tags| tags.items()).unwrap_or_default(),
            raw: self.metrics,
        }
    }
}

/// Outcome counts of a store pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StoreSummary {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

pub(crate) fn parse_ingest_file(text: &str) -> anyhow::Result<Vec<IngestEntry>> {
    serde_json::from_str(text).context("ingest file must be a JSON array of records")
}

/// Attach metrics and score to a record. The score is the engagement rate,
/// or `0.0` when the platform exposes nothing to compute it from.
pub(crate) fn score_record(
    record: RawScrapeRecord,
    platform: Platform,
    ctx: &MetricsContext,
) -> NewIdea {
    let metrics = UniversalMetrics::from_platform(platform, &record.raw, ctx);
    let score = metrics.engagement_rate.unwrap_or(0.0);
    record.into_new_idea(Some(score), Some(ScoreDictionary::Map(metrics.to_dict())))
}

/// Score and upsert every record. Failures are logged and counted; they do
/// not stop the pass.
pub(crate) async fn store_records(
    pool: &SqlitePool,
    records: Vec<RawScrapeRecord>,
    platform: Platform,
    ctx: &MetricsContext,
) -> StoreSummary {
    let mut summary = StoreSummary::default();
    for record in records {
        let source_id = record.source_id.clone();
        let idea = score_record(record, platform, ctx);
        match ideasrc_db::insert_idea(pool, &idea).await {
            Ok(true) => summary.created += 1,
            Ok(false) => summary.updated += 1,
            Err(e) => {
                tracing::warn!(%platform, source_id, error = %e, "failed to store idea");
                summary.failed += 1;
            }
        }
    }
    summary
}

pub(crate) async fn run_ingest(
    config: &AppConfig,
    platform: Platform,
    source: &str,
    file: &Path,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let entries = parse_ingest_file(&text)?;
    tracing::info!(%platform, source, count = entries.len(), "ingesting records");

    let records = entries
        .into_iter()
        .map(|entry| entry.into_raw_record(source))
        .collect();

    let pool = store::open(config, platform).await?;
    let ctx = MetricsContext::now(config.metrics_policy);
    let summary = store_records(&pool, records, platform, &ctx).await;

    println!(
        "{platform}: {} created, {} updated, {} failed",
        summary.created, summary.updated, summary.failed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ideasrc_core::MetricsPolicy;
    use ideasrc_db::PoolConfig;
    use serde_json::json;

    use super::*;

    fn ctx() -> MetricsContext {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        MetricsContext::new(now, MetricsPolicy::default())
    }

    async fn memory_pool() -> SqlitePool {
        let config = PoolConfig {
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 5,
        };
        let pool = ideasrc_db::connect_pool("sqlite::memory:", config)
            .await
            .expect("in-memory pool");
        ideasrc_db::run_migrations(&pool).await.expect("migrations");
        pool
    }

    #[test]
    fn parses_entries_with_numeric_ids_and_joined_tags() {
        let entries = parse_ingest_file(
            r#"[
                {"source_id": 42, "title": "A", "tags": "rust, db", "metrics": {"views": 1}},
                {"source_id": "abc", "title": "B", "tags": ["x"]}
            ]"#,
        )
        .unwrap();

        let records: Vec<_> = entries
            .into_iter()
            .map(|e| e.into_raw_record("medium_trending"))
            .collect();
        assert_eq!(records[0].source_id, "42");
        assert_eq!(records[0].tags, vec!["rust", "db"]);
        assert_eq!(records[1].source, "medium_trending");
        assert!(records[1].raw.is_null());
    }

    #[test]
    fn non_array_file_is_rejected() {
        assert!(parse_ingest_file(r#"{"source_id": 1}"#).is_err());
    }

    #[test]
    fn score_is_engagement_rate_or_zero() {
        let record = RawScrapeRecord {
            source: "tiktok_trending".to_owned(),
            source_id: "1".to_owned(),
            title: "Clip".to_owned(),
            description: None,
            tags: vec![],
            raw: json!({
                "stats": {"playCount": 1000, "diggCount": 100, "commentCount": 20, "shareCount": 10}
            }),
        };
        let idea = score_record(record.clone(), Platform::Tiktok, &ctx());
        let score = idea.score.expect("score");
        assert!((score - 13.0).abs() < 1e-9, "got {score}");

        let empty = RawScrapeRecord {
            raw: json!({}),
            ..record
        };
        let idea = score_record(empty, Platform::Tiktok, &ctx());
        assert_eq!(idea.score, Some(0.0));
        assert!(idea.score_dictionary.is_some());
    }

    #[tokio::test]
    async fn store_records_counts_creates_and_updates() {
        let pool = memory_pool().await;
        let record = RawScrapeRecord {
            source: "hackernews_frontpage".to_owned(),
            source_id: "8863".to_owned(),
            title: "Dropbox".to_owned(),
            description: None,
            tags: vec!["story".to_owned()],
            raw: json!({"score": 100, "descendants": 50, "time": 1_704_103_200_i64}),
        };

        let first = store_records(&pool, vec![record.clone()], Platform::HackerNews, &ctx()).await;
        assert_eq!(
            first,
            StoreSummary {
                created: 1,
                updated: 0,
                failed: 0
            }
        );

        let second = store_records(&pool, vec![record], Platform::HackerNews, &ctx()).await;
        assert_eq!(second.updated, 1);
        assert_eq!(ideasrc_db::count_ideas(&pool).await.unwrap(), 1);

        let row = ideasrc_db::get_idea(&pool, "hackernews_frontpage", "8863")
            .await
            .unwrap()
            .expect("row");
        assert_eq!(row.score, Some(50.0));
    }

    #[tokio::test]
    async fn blank_titles_are_counted_as_failed() {
        let pool = memory_pool().await;
        let good = RawScrapeRecord {
            source: "reddit_rust".to_owned(),
            source_id: "t3_good".to_owned(),
            title: "Async traits".to_owned(),
            description: None,
            tags: vec![],
            raw: json!({"score": 10, "num_comments": 2}),
        };
        let blank = RawScrapeRecord {
            source_id: "t3_blank".to_owned(),
            title: "   ".to_owned(),
            ..good.clone()
        };

        let summary = store_records(&pool, vec![blank, good], Platform::Reddit, &ctx()).await;
        assert_eq!(
            summary,
            StoreSummary {
                created: 1,
                updated: 0,
                failed: 1
            }
        );
        assert_eq!(ideasrc_db::count_ideas(&pool).await.unwrap(), 1);
    }
}
