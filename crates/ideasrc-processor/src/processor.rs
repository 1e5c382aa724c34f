use chrono::{DateTime, NaiveDate, SecondsFormat};
use ideasrc_core::{ContentType, IdeaInspiration, IdeaRecord, Platform};
use serde_json::{Map, Value};
use url::Url;

use crate::metadata::{flatten_score_dictionary, scalar_to_string};
use crate::ProcessError;

/// Longest description kept on an idea, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

const URL_KEYS: [&str; 4] = ["url", "article_url", "external_url", "embed_url"];

const VIDEO_HOSTS: [&str; 6] = [
    "youtube.com",
    "youtu.be",
    "vimeo.com",
    "tiktok.com",
    "twitch.tv",
    "kick.com",
];

const IMAGE_EXTENSIONS: [&str; 7] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".svg"];

const AUTHOR_KEYS: [&str; 8] = [
    "by",
    "author",
    "author_username",
    "username",
    "creator_name",
    "broadcaster_name",
    "channel_title",
    "show_artist",
];

const UNIX_TIME_KEYS: [&str; 3] = ["time", "created_utc", "create_time"];

const DATE_KEYS: [&str; 5] = [
    "upload_date",
    "published_at",
    "publish_date",
    "release_date",
    "created_at",
];

/// Turns stored rows from one platform's database into ideas.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdeaProcessor {
    platform: Option<Platform>,
}

impl IdeaProcessor {
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
        }
    }

    /// A processor that applies no platform defaults: ideas are text, have
    /// no category, and only use explicit URLs.
    #[must_use]
    pub fn generic() -> Self {
        Self { platform: None }
    }

    #[must_use]
    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// Convert one record.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::MissingTitle`] or [`ProcessError::MissingSourceId`]
    /// when either is absent or blank. Nothing else fails; a malformed score
    /// dictionary is treated as empty.
    pub fn process(&self, record: &IdeaRecord) -> Result<IdeaInspiration, ProcessError> {
        let title = non_blank(record.title.as_deref()).ok_or(ProcessError::MissingTitle)?;
        let source_id =
            non_blank(record.source_id.as_deref()).ok_or(ProcessError::MissingSourceId)?;

        let keywords = record
            .tags
            .as_ref()
            .map(|tags| dedupe(tags.items()))
            .unwrap_or_default();

        let dict = record
            .score_dictionary
            .as_ref()
            .map(ideasrc_core::ScoreDictionary::to_map)
            .unwrap_or_default();
        if record.score_dictionary.is_some() && dict.is_empty() {
            tracing::debug!(source_id, "score dictionary empty or unparseable");
        }
        let lookup = Lookup::new(&dict);

        let full_text = record.description.clone().unwrap_or_default();
        let description: String = full_text.chars().take(MAX_DESCRIPTION_CHARS).collect();

        let mut metadata = flatten_score_dictionary(&dict);
        if let Some(source) = non_blank(record.source.as_deref()) {
            metadata
                .entry("source".to_string())
                .or_insert_with(|| source.to_string());
        }
        if let Some(platform) = self.platform {
            metadata
                .entry("platform".to_string())
                .or_insert_with(|| platform.as_str().to_string());
        }

        Ok(IdeaInspiration {
            title: title.to_string(),
            description,
            content: full_text,
            keywords,
            source_type: self.source_type(&lookup),
            source_id: source_id.to_string(),
            source_url: self.source_url(&lookup, source_id),
            source_created_by: AUTHOR_KEYS.iter().find_map(|key| lookup.string(key)),
            source_created_at: created_at(&lookup),
            category: self.platform.map(|p| p.category().to_string()),
            score: record.score,
            metadata,
        })
    }

    /// Convert many records, skipping (and logging) those that fail
    /// validation.
    #[must_use]
    pub fn process_batch(&self, records: &[IdeaRecord]) -> Vec<IdeaInspiration> {
        records
            .iter()
            .filter_map(|record| match self.process(record) {
                Ok(idea) => Some(idea),
                Err(e) => {
                    tracing::warn!(
                        record_id = ?record.id,
                        source_id = ?record.source_id,
                        error = %e,
                        "skipping record"
                    );
                    None
                }
            })
            .collect()
    }

    fn source_type(&self, lookup: &Lookup<'_>) -> ContentType {
        for key in URL_KEYS {
            let Some(raw) = lookup.string(key) else {
                continue;
            };
            let Ok(url) = Url::parse(&raw) else {
                continue;
            };
            if is_video_host(&url) {
                return ContentType::Video;
            }
            if is_image_path(&url) {
                return ContentType::Image;
            }
        }
        self.platform
            .map_or(ContentType::Text, Platform::default_content_type)
    }

    fn source_url(&self, lookup: &Lookup<'_>, source_id: &str) -> Option<String> {
        let explicit = |keys: &[&str]| keys.iter().find_map(|key| lookup.string(key));

        let Some(platform) = self.platform else {
            return explicit(&["url"]);
        };

        let url = match platform {
            Platform::HackerNews => format!("https://news.ycombinator.com/item?id={source_id}"),
            Platform::Reddit => match lookup.string("permalink") {
                Some(permalink) => format!("https://www.reddit.com{permalink}"),
                None => format!("https://www.reddit.com/comments/{source_id}"),
            },
            Platform::Medium => explicit(&["article_url"])
                .unwrap_or_else(|| format!("https://medium.com/p/{source_id}")),
            Platform::WebArticle => return explicit(&["url", "article_url"]),
            Platform::Youtube => {
                let id = lookup.string("video_id").unwrap_or_else(|| source_id.to_string());
                format!("https://www.youtube.com/shorts/{id}")
            }
            Platform::Tiktok => explicit(&["url"]).unwrap_or_else(|| {
                match lookup.string("username") {
                    Some(user) => format!("https://www.tiktok.com/@{user}/video/{source_id}"),
                    None => format!("https://www.tiktok.com/video/{source_id}"),
                }
            }),
            Platform::InstagramReels => explicit(&["url"]).unwrap_or_else(|| {
                let code = lookup
                    .string("shortcode")
                    .unwrap_or_else(|| source_id.to_string());
                format!("https://www.instagram.com/reel/{code}/")
            }),
            Platform::TwitchClips => explicit(&["url"])
                .unwrap_or_else(|| format!("https://clips.twitch.tv/{source_id}")),
            Platform::KickClips => explicit(&["url"])
                .unwrap_or_else(|| format!("https://kick.com/clips/{source_id}")),
            Platform::ApplePodcasts => explicit(&["url"]).unwrap_or_else(|| {
                let track_id = lookup
                    .string("track_id")
                    .unwrap_or_else(|| source_id.to_string());
                format!("https://podcasts.apple.com/podcast/id{track_id}")
            }),
            Platform::SpotifyPodcasts => explicit(&["url"])
                .unwrap_or_else(|| format!("https://open.spotify.com/episode/{source_id}")),
        };
        Some(url)
    }
}

/// Key lookup over a score dictionary: `platform_specific` first, then the
/// top level. Scalars are rendered as strings; blanks count as absent.
struct Lookup<'a> {
    top: &'a Map<String, Value>,
    specific: Option<&'a Map<String, Value>>,
}

impl<'a> Lookup<'a> {
    fn new(dict: &'a Map<String, Value>) -> Self {
        Self {
            top: dict,
            specific: dict.get("platform_specific").and_then(Value::as_object),
        }
    }

    fn value(&self, key: &str) -> Option<&'a Value> {
        self.specific
            .and_then(|specific| specific.get(key))
            .filter(|v| !v.is_null())
            .or_else(|| self.top.get(key).filter(|v| !v.is_null()))
    }

    fn string(&self, key: &str) -> Option<String> {
        self.value(key)
            .and_then(scalar_to_string)
            .filter(|s| !s.trim().is_empty())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn is_video_host(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    VIDEO_HOSTS
        .iter()
        .any(|video| host == *video || host.ends_with(&format!(".{video}")))
}

fn is_image_path(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Creation time of the original content.
///
/// Unix timestamps become RFC 3339, `YYYYMMDD` becomes an ISO date-time, and
/// any other date string is passed through unchanged.
fn created_at(lookup: &Lookup<'_>) -> Option<String> {
    for key in UNIX_TIME_KEYS {
        let Some(value) = lookup.value(key) else {
            continue;
        };
        let secs = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        if let Some(dt) = secs.filter(|s| s.is_finite()).and_then(unix_to_datetime) {
            return Some(dt.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }

    DATE_KEYS.iter().find_map(|key| {
        let raw = lookup.string(key)?;
        Some(compact_date_to_iso(&raw).unwrap_or(raw))
    })
}

#[allow(clippy::cast_possible_truncation)]
fn unix_to_datetime(secs: f64) -> Option<DateTime<chrono::Utc>> {
    DateTime::from_timestamp(secs.trunc() as i64, 0)
}

fn compact_date_to_iso(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() != 8 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y%m%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
}
