use std::path::Path;

use anyhow::Context;
use ideasrc_core::{AppConfig, IdeaInspiration, IdeaRecord, Platform};
use ideasrc_db::IdeaRow;
use ideasrc_processor::IdeaProcessor;

use crate::store;

/// Convert rows into ideas. Returns the ideas together with the ids of the
/// rows they came from; rows that fail validation are logged and left
/// unprocessed.
pub(crate) fn convert_rows(
    processor: &IdeaProcessor,
    rows: Vec<IdeaRow>,
) -> (Vec<IdeaInspiration>, Vec<i64>) {
    let mut ideas = Vec::with_capacity(rows.len());
    let mut ids = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        match processor.process(&IdeaRecord::from(row)) {
            Ok(idea) => {
                ideas.push(idea);
                ids.push(id);
            }
            Err(e) => tracing::warn!(id, error = %e, "skipping row"),
        }
    }
    (ideas, ids)
}

pub(crate) async fn run_process(
    config: &AppConfig,
    platform: Platform,
    limit: i64,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let pool = store::open(config, platform).await?;
    let rows = ideasrc_db::get_unprocessed_ideas(&pool, limit).await?;
    let fetched = rows.len();

    let (ideas, ids) = convert_rows(&IdeaProcessor::new(platform), rows);
    let json = serde_json::to_string_pretty(&ideas)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{platform}: wrote {} idea(s) to {}", ideas.len(), path.display());
        }
        None => println!("{json}"),
    }

    // Rows are only marked once their ideas have been written out.
    for id in ids {
        ideasrc_db::mark_as_processed(&pool, id).await?;
    }
    tracing::info!(%platform, fetched, processed = ideas.len(), "processing finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row(id: i64, title: &str) -> IdeaRow {
        IdeaRow {
            id,
            source: "reddit_rust".to_owned(),
            source_id: format!("t3_{id}"),
            title: title.to_owned(),
            description: Some("body".to_owned()),
            tags: Some("rust,async".to_owned()),
            score: Some(4.5),
            score_dictionary: Some(r#"{"platform_specific":{"author":"ferris"}}"#.to_owned()),
            processed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn invalid_rows_are_left_out_of_both_lists() {
        let processor = IdeaProcessor::new(Platform::Reddit);
        let rows = vec![row(1, "Good"), row(2, "  "), row(3, "Also good")];
        let (ideas, ids) = convert_rows(&processor, rows);

        assert_eq!(ids, vec![1, 3]);
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].keywords, vec!["rust", "async"]);
        assert_eq!(ideas[0].source_created_by.as_deref(), Some("ferris"));
        assert_eq!(ideas[1].category.as_deref(), Some("forums"));
    }
}
