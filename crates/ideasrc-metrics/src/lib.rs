//! Cross-platform engagement metrics.
//!
//! Each platform adapter maps its raw API payload onto [`UniversalMetrics`]
//! and then runs the shared derived-metric step for its [`FormulaSet`].

pub mod extract;
pub mod metrics;
mod platforms;

use ideasrc_core::Platform;
use serde_json::Value;

pub use extract::generate_article_id;
pub use metrics::{FormulaSet, MetricsContext, UniversalMetrics};

impl UniversalMetrics {
    /// Build metrics for any supported platform from its raw payload.
    #[must_use]
    pub fn from_platform(platform: Platform, raw: &Value, ctx: &MetricsContext) -> Self {
        match platform {
            Platform::HackerNews => Self::from_hackernews(raw, ctx),
            Platform::Reddit => Self::from_reddit(raw, ctx),
            Platform::Medium => Self::from_medium(raw, ctx),
            Platform::WebArticle => Self::from_article(raw, ctx),
            Platform::Youtube => Self::from_youtube(raw, ctx),
            Platform::Tiktok => Self::from_tiktok(raw, ctx),
            Platform::InstagramReels => Self::from_instagram(raw, ctx),
            Platform::TwitchClips => Self::from_twitch(raw, ctx),
            Platform::KickClips => Self::from_kick(raw, ctx),
            Platform::ApplePodcasts => Self::from_apple_podcasts(raw, ctx),
            Platform::SpotifyPodcasts => Self::from_spotify(raw, ctx),
        }
    }
}
