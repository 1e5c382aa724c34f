use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tags as scrapers hand them over: either already comma-joined or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    Joined(String),
    List(Vec<String>),
}

impl Tags {
    /// Trimmed, non-empty tag values in their original order.
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Tags::Joined(joined) => joined.split(',').collect(),
            Tags::List(list) => list.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The comma-joined form persisted in the `tags` column.
    #[must_use]
    pub fn to_joined(&self) -> String {
        match self {
            Tags::Joined(joined) => joined.clone(),
            Tags::List(list) => list.join(","),
        }
    }
}

impl From<Vec<String>> for Tags {
    fn from(list: Vec<String>) -> Self {
        Tags::List(list)
    }
}

impl From<&str> for Tags {
    fn from(joined: &str) -> Self {
        Tags::Joined(joined.to_string())
    }
}

/// A platform metrics snapshot, either as stored JSON text or as a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreDictionary {
    Map(Map<String, Value>),
    Raw(String),
}

impl ScoreDictionary {
    /// Resolve to a JSON object. Malformed text and non-object JSON yield an
    /// empty map.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        match self {
            ScoreDictionary::Map(map) => map.clone(),
            ScoreDictionary::Raw(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => Map::new(),
            },
        }
    }

    /// Text written to the `score_dictionary` column.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a map value cannot be encoded.
    pub fn to_json_text(&self) -> Result<String, serde_json::Error> {
        match self {
            ScoreDictionary::Map(map) => serde_json::to_string(map),
            ScoreDictionary::Raw(text) => Ok(text.clone()),
        }
    }
}

impl From<Map<String, Value>> for ScoreDictionary {
    fn from(map: Map<String, Value>) -> Self {
        ScoreDictionary::Map(map)
    }
}

/// Values written by an upsert into the ideas table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIdea {
    pub source: String,
    pub source_id: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Option<Tags>,
    pub score: Option<f64>,
    pub score_dictionary: Option<ScoreDictionary>,
}

/// A stored row as the idea processor sees it.
///
/// Every field is optional so that hand-built or partially loaded records can
/// be validated by the processor rather than rejected at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Tags>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub score_dictionary: Option<ScoreDictionary>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// What a scraper returns before metrics are attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScrapeRecord {
    pub source: String,
    pub source_id: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// The platform item exactly as the API returned it.
    pub raw: Value,
}

impl RawScrapeRecord {
    #[must_use]
    pub fn into_new_idea(
        self,
        score: Option<f64>,
        score_dictionary: Option<ScoreDictionary>,
    ) -> NewIdea {
        NewIdea {
            source: self.source,
            source_id: self.source_id,
            title: self.title,
            description: self.description,
            tags: Some(Tags::List(self.tags)),
            score,
            score_dictionary,
        }
    }
}
