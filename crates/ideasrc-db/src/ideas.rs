//! Database operations for the `ideas` table.
//!
//! Every platform database carries the same table; rows are keyed on
//! `(source, source_id)` and written with upsert semantics.

use chrono::{DateTime, Utc};
use ideasrc_core::{IdeaRecord, NewIdea, ScoreDictionary, Tags};
use sqlx::SqlitePool;

use crate::DbError;

pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const DEFAULT_UNPROCESSED_LIMIT: i64 = 100;

const ORDERABLE_COLUMNS: [&str; 7] = [
    "id",
    "source",
    "source_id",
    "title",
    "score",
    "created_at",
    "updated_at",
];

/// SQL expression for the characters `trim` treats as blank: space, tab,
/// newline and carriage return.
const BLANK_CHARS: &str = "' ' || char(9) || char(10) || char(13)";

const IDEA_COLUMNS: &str = "id, source, source_id, title, description, tags, score, \
                            score_dictionary, processed, created_at, updated_at";

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `ideas` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IdeaRow {
    pub id: i64,
    pub source: String,
    pub source_id: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub score: Option<f64>,
    pub score_dictionary: Option<String>,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IdeaRow> for IdeaRecord {
    fn from(row: IdeaRow) -> Self {
        IdeaRecord {
            id: Some(row.id),
            source: Some(row.source),
            source_id: Some(row.source_id),
            title: Some(row.title),
            description: row.description,
            tags: row.tags.map(Tags::Joined),
            score: row.score,
            score_dictionary: row.score_dictionary.map(ScoreDictionary::Raw),
            created_at: Some(row.created_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert a new idea or update the existing row with the same
/// `(source, source_id)`.
///
/// Returns `true` when a row was created and `false` when an existing row was
/// updated. Updates leave `id`, `created_at` and `processed` untouched.
///
/// # Errors
///
/// Returns [`DbError::BlankField`] if `source_id` or `title` is empty or
/// whitespace, [`DbError::InvalidScoreDictionary`] if the score dictionary
/// cannot be serialized, or [`DbError::Sqlx`] if a query fails.
pub async fn insert_idea(pool: &SqlitePool, idea: &NewIdea) -> Result<bool, DbError> {
    if idea.source_id.trim().is_empty() {
        return Err(DbError::BlankField { field: "source_id" });
    }
    if idea.title.trim().is_empty() {
        return Err(DbError::BlankField { field: "title" });
    }
    let score_dictionary = idea
        .score_dictionary
        .as_ref()
        .map(ScoreDictionary::to_json_text)
        .transpose()
        .map_err(DbError::InvalidScoreDictionary)?;
    let tags = idea.tags.as_ref().map(Tags::to_joined);
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM ideas WHERE source = ?1 AND source_id = ?2")
            .bind(&idea.source)
            .bind(&idea.source_id)
            .fetch_optional(&mut *tx)
            .await?;

    sqlx::query(
        "INSERT INTO ideas \
             (source, source_id, title, description, tags, score, score_dictionary, \
              processed, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?8) \
         ON CONFLICT (source, source_id) DO UPDATE SET \
             title = excluded.title, \
             description = excluded.description, \
             tags = excluded.tags, \
             score = excluded.score, \
             score_dictionary = excluded.score_dictionary, \
             updated_at = excluded.updated_at",
    )
    .bind(&idea.source)
    .bind(&idea.source_id)
    .bind(&idea.title)
    .bind(&idea.description)
    .bind(&tags)
    .bind(idea.score)
    .bind(&score_dictionary)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let created = existing.is_none();
    tracing::debug!(
        source = %idea.source,
        source_id = %idea.source_id,
        created,
        "idea upserted"
    );
    Ok(created)
}

/// Mark a row as processed and refresh its `updated_at`.
///
/// Marking an already processed row again is harmless; an unknown id changes
/// nothing.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn mark_as_processed(pool: &SqlitePool, id: i64) -> Result<(), DbError> {
    sqlx::query("UPDATE ideas SET processed = 1, updated_at = ?1 WHERE id = ?2")
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete every row and return how many were removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn clear_all_ideas(pool: &SqlitePool) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM ideas").execute(pool).await?;
    Ok(result.rows_affected())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the row for `(source, source_id)`, or `None` if absent.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_idea(
    pool: &SqlitePool,
    source: &str,
    source_id: &str,
) -> Result<Option<IdeaRow>, DbError> {
    let row = sqlx::query_as::<_, IdeaRow>(&format!(
        "SELECT {IDEA_COLUMNS} FROM ideas WHERE source = ?1 AND source_id = ?2"
    ))
    .bind(source)
    .bind(source_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns up to `limit` rows in descending order of `order_by`.
///
/// Only `id`, `source`, `source_id`, `title`, `score`, `created_at` and
/// `updated_at` are accepted; any other column (or `None`) orders by `score`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_all_ideas(
    pool: &SqlitePool,
    limit: i64,
    order_by: Option<&str>,
) -> Result<Vec<IdeaRow>, DbError> {
    let column = order_column(order_by);
    let rows = sqlx::query_as::<_, IdeaRow>(&format!(
        "SELECT {IDEA_COLUMNS} FROM ideas ORDER BY {column} DESC, id DESC LIMIT ?1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns up to `limit` rows for one source, sorted descending by
/// `order_by` with the same whitelist as [`get_all_ideas`].
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_ideas_by_source(
    pool: &SqlitePool,
    source: &str,
    limit: i64,
    order_by: Option<&str>,
) -> Result<Vec<IdeaRow>, DbError> {
    let column = order_column(order_by);
    let rows = sqlx::query_as::<_, IdeaRow>(&format!(
        "SELECT {IDEA_COLUMNS} FROM ideas WHERE source = ?1 \
         ORDER BY {column} DESC, id DESC LIMIT ?2"
    ))
    .bind(source)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns up to `limit` unprocessed rows, oldest first.
///
/// Rows with a blank `title` or `source_id` can never become ideas and are
/// left out, so they cannot hold back valid rows behind the limit.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_unprocessed_ideas(pool: &SqlitePool, limit: i64) -> Result<Vec<IdeaRow>, DbError> {
    let rows = sqlx::query_as::<_, IdeaRow>(&format!(
        "SELECT {IDEA_COLUMNS} FROM ideas \
         WHERE processed = 0 \
           AND trim(title, {BLANK_CHARS}) <> '' \
           AND trim(source_id, {BLANK_CHARS}) <> '' \
         ORDER BY created_at ASC, id ASC LIMIT ?1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Total number of stored rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_ideas(pool: &SqlitePool) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ideas")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Number of rows for `source`; zero when none match.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_by_source(pool: &SqlitePool, source: &str) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ideas WHERE source = ?1")
        .bind(source)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Per-source row counts, largest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_grouped_by_source(pool: &SqlitePool) -> Result<Vec<(String, i64)>, DbError> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT source, COUNT(*) AS n FROM ideas GROUP BY source ORDER BY n DESC, source ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

fn order_column(order_by: Option<&str>) -> &'static str {
    order_by
        .and_then(|requested| {
            ORDERABLE_COLUMNS
                .iter()
                .copied()
                .find(|column| *column == requested)
        })
        .unwrap_or("score")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_column_accepts_whitelisted_names() {
        assert_eq!(order_column(Some("created_at")), "created_at");
        assert_eq!(order_column(Some("title")), "title");
    }

    #[test]
    fn order_column_falls_back_to_score() {
        assert_eq!(order_column(None), "score");
        assert_eq!(order_column(Some("description")), "score");
        assert_eq!(order_column(Some("score; DROP TABLE ideas")), "score");
    }
}
