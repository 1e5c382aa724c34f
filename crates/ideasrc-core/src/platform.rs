use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ContentType, CoreError};

/// A content platform the collector knows how to normalize.
///
/// The string form (`as_str`) doubles as the database file stem and the
/// `platform` entry written into idea metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[serde(rename = "hackernews")]
    HackerNews,
    Reddit,
    Medium,
    WebArticle,
    Youtube,
    Tiktok,
    InstagramReels,
    TwitchClips,
    KickClips,
    ApplePodcasts,
    SpotifyPodcasts,
}

impl Platform {
    pub const ALL: [Platform; 11] = [
        Platform::HackerNews,
        Platform::Reddit,
        Platform::Medium,
        Platform::WebArticle,
        Platform::Youtube,
        Platform::Tiktok,
        Platform::InstagramReels,
        Platform::TwitchClips,
        Platform::KickClips,
        Platform::ApplePodcasts,
        Platform::SpotifyPodcasts,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::HackerNews => "hackernews",
            Platform::Reddit => "reddit",
            Platform::Medium => "medium",
            Platform::WebArticle => "web_article",
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::InstagramReels => "instagram_reels",
            Platform::TwitchClips => "twitch_clips",
            Platform::KickClips => "kick_clips",
            Platform::ApplePodcasts => "apple_podcasts",
            Platform::SpotifyPodcasts => "spotify_podcasts",
        }
    }

    /// Content type assumed when nothing in the record says otherwise.
    #[must_use]
    pub fn default_content_type(self) -> ContentType {
        match self {
            Platform::HackerNews | Platform::Reddit | Platform::Medium | Platform::WebArticle => {
                ContentType::Text
            }
            Platform::Youtube
            | Platform::Tiktok
            | Platform::InstagramReels
            | Platform::TwitchClips
            | Platform::KickClips => ContentType::Video,
            Platform::ApplePodcasts | Platform::SpotifyPodcasts => ContentType::Audio,
        }
    }

    /// Grouping label used as the idea category.
    #[must_use]
    pub fn category(self) -> &'static str {
        match self {
            Platform::HackerNews | Platform::Reddit => "forums",
            Platform::Medium | Platform::WebArticle => "articles",
            Platform::Youtube
            | Platform::Tiktok
            | Platform::InstagramReels
            | Platform::TwitchClips
            | Platform::KickClips => "shorts",
            Platform::ApplePodcasts | Platform::SpotifyPodcasts => "podcasts",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let platform = match normalized.as_str() {
            "hackernews" | "hacker_news" | "hn" => Platform::HackerNews,
            "reddit" => Platform::Reddit,
            "medium" => Platform::Medium,
            "web_article" | "article" | "web" => Platform::WebArticle,
            "youtube" | "youtube_shorts" => Platform::Youtube,
            "tiktok" => Platform::Tiktok,
            "instagram_reels" | "instagram" => Platform::InstagramReels,
            "twitch_clips" | "twitch" => Platform::TwitchClips,
            "kick_clips" | "kick" => Platform::KickClips,
            "apple_podcasts" | "apple" => Platform::ApplePodcasts,
            "spotify_podcasts" | "spotify" => Platform::SpotifyPodcasts,
            _ => return Err(CoreError::UnknownPlatform(s.to_string())),
        };
        Ok(platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_round_trips_through_from_str() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn serde_name_matches_as_str() {
        for platform in Platform::ALL {
            let encoded = serde_json::to_value(platform).unwrap();
            assert_eq!(encoded, serde_json::Value::from(platform.as_str()));
        }
    }

    #[test]
    fn from_str_accepts_short_aliases() {
        assert_eq!("HN".parse::<Platform>().unwrap(), Platform::HackerNews);
        assert_eq!("kick".parse::<Platform>().unwrap(), Platform::KickClips);
        assert_eq!(
            "apple-podcasts".parse::<Platform>().unwrap(),
            Platform::ApplePodcasts
        );
    }

    #[test]
    fn from_str_rejects_unknown_platform() {
        let err = "myspace".parse::<Platform>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownPlatform(ref s) if s == "myspace"));
    }

    #[test]
    fn default_content_types_follow_platform_family() {
        assert_eq!(Platform::Medium.default_content_type(), ContentType::Text);
        assert_eq!(Platform::Tiktok.default_content_type(), ContentType::Video);
        assert_eq!(
            Platform::SpotifyPodcasts.default_content_type(),
            ContentType::Audio
        );
    }
}
