use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Video,
    Audio,
    Image,
}

impl ContentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Video => "video",
            ContentType::Audio => "audio",
            ContentType::Image => "image",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ContentType::Text),
            "video" => Ok(ContentType::Video),
            "audio" => Ok(ContentType::Audio),
            "image" => Ok(ContentType::Image),
            _ => Err(CoreError::UnknownContentType(s.to_string())),
        }
    }
}

/// The canonical idea record handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaInspiration {
    pub title: String,
    /// At most 500 characters.
    pub description: String,
    /// Untruncated description text.
    pub content: String,
    pub keywords: Vec<String>,
    pub source_type: ContentType,
    pub source_id: String,
    pub source_url: Option<String>,
    pub source_created_by: Option<String>,
    pub source_created_at: Option<String>,
    pub category: Option<String>,
    pub score: Option<f64>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl IdeaInspiration {
    /// Serialize to a JSON object.
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Every field serializes to plain JSON; a non-object is unreachable.
            Ok(_) | Err(_) => Map::new(),
        }
    }

    /// Rebuild from a JSON object produced by [`IdeaInspiration::to_dict`].
    ///
    /// # Errors
    ///
    /// Returns the deserializer error when required fields are missing or
    /// have the wrong type.
    pub fn from_dict(dict: Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IdeaInspiration {
        let mut metadata = BTreeMap::new();
        metadata.insert("score".to_string(), "150".to_string());
        IdeaInspiration {
            title: "Rust in production".to_string(),
            description: "short".to_string(),
            content: "short".to_string(),
            keywords: vec!["rust".to_string(), "systems".to_string()],
            source_type: ContentType::Text,
            source_id: "123".to_string(),
            source_url: Some("https://news.ycombinator.com/item?id=123".to_string()),
            source_created_by: Some("pg".to_string()),
            source_created_at: None,
            category: Some("forums".to_string()),
            score: Some(4.2),
            metadata,
        }
    }

    #[test]
    fn to_dict_then_from_dict_preserves_every_field() {
        let idea = sample();
        let restored = IdeaInspiration::from_dict(idea.to_dict()).unwrap();
        assert_eq!(restored, idea);
    }

    #[test]
    fn to_dict_uses_lowercase_source_type() {
        let dict = sample().to_dict();
        assert_eq!(dict.get("source_type"), Some(&Value::from("text")));
    }

    #[test]
    fn from_dict_rejects_missing_title() {
        let mut dict = sample().to_dict();
        dict.remove("title");
        assert!(IdeaInspiration::from_dict(dict).is_err());
    }

    #[test]
    fn content_type_parses_case_insensitively() {
        assert_eq!("Video".parse::<ContentType>().unwrap(), ContentType::Video);
        assert!("hologram".parse::<ContentType>().is_err());
    }
}
