use ideasrc_core::{AppConfig, Platform};
use ideasrc_db::IdeaRow;

use crate::store;

const TITLE_WIDTH: usize = 50;

pub(crate) async fn run_list(
    config: &AppConfig,
    platform: Platform,
    source: Option<&str>,
    limit: i64,
    order_by: Option<&str>,
) -> anyhow::Result<()> {
    let pool = store::open(config, platform).await?;
    let rows = match source {
        Some(source) => {
            ideasrc_db::list_ideas_by_source(&pool, source, limit, order_by).await?
        }
        None => ideasrc_db::get_all_ideas(&pool, limit, order_by).await?,
    };

    if rows.is_empty() {
        println!(
            "no ideas stored for {platform}{}",
            source.map(|s| format!(" from {s}")).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "{:<7}{:<26}{:<14}{:>9}  {:<5}TITLE",
        "ID", "SOURCE", "SOURCE ID", "SCORE", "DONE"
    );
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

pub(crate) async fn run_stats(config: &AppConfig, platform: Platform) -> anyhow::Result<()> {
    let pool = store::open(config, platform).await?;
    let total = ideasrc_db::count_ideas(&pool).await?;
    let by_source = ideasrc_db::count_grouped_by_source(&pool).await?;

    println!("{platform}: {total} idea(s)");
    for (source, count) in by_source {
        println!("  {source:<30}{count:>8}");
    }
    Ok(())
}

fn format_row(row: &IdeaRow) -> String {
    let score = row
        .score
        .map_or_else(|| "\u{2014}".to_string(), |s| format!("{s:.2}"));
    format!(
        "{:<7}{:<26}{:<14}{:>9}  {:<5}{}",
        row.id,
        row.source,
        row.source_id,
        score,
        if row.processed { "yes" } else { "no" },
        truncate(&row.title, TITLE_WIDTH)
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 3), "ééé...");
    }
}
