//! Hacker News API types.
//!
//! Items come from `GET /item/{id}.json`. Every field except `id` may be
//! missing: deleted items carry only `id`, `deleted`, `time` and `type`, and
//! jobs have no `descendants`. A removed item id returns a literal `null`
//! body rather than a 404.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

/// A story list exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HnFeed {
    Top,
    New,
    Best,
    Ask,
    Show,
}

impl HnFeed {
    pub const ALL: [HnFeed; 5] = [
        HnFeed::Top,
        HnFeed::New,
        HnFeed::Best,
        HnFeed::Ask,
        HnFeed::Show,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HnFeed::Top => "top",
            HnFeed::New => "new",
            HnFeed::Best => "best",
            HnFeed::Ask => "ask",
            HnFeed::Show => "show",
        }
    }

    /// Path of the id list, relative to the API base.
    #[must_use]
    pub fn endpoint(self) -> String {
        format!("{}stories.json", self.as_str())
    }

    /// Tag attached to every item scraped from this feed.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            HnFeed::Top => "frontpage",
            other => other.as_str(),
        }
    }

    /// Value written to the `source` column.
    #[must_use]
    pub fn source(self) -> String {
        format!("hackernews_{}", self.tag())
    }
}

impl fmt::Display for HnFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HnFeed {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "frontpage" => Ok(HnFeed::Top),
            "new" => Ok(HnFeed::New),
            "best" => Ok(HnFeed::Best),
            "ask" => Ok(HnFeed::Ask),
            "show" => Ok(HnFeed::Show),
            _ => Err(ScraperError::UnknownFeed(s.to_string())),
        }
    }
}

/// One item from `/item/{id}.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnItem {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub by: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    /// HTML body of Ask/Show posts and comments.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub descendants: Option<i64>,
    #[serde(default)]
    pub kids: Vec<u64>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

impl HnItem {
    /// Deleted and dead items are never collected.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.deleted && !self.dead
    }
}
