use ideasrc_core::Platform;
use serde_json::{Map, Value};

use crate::extract::{self, count, float, put, string, string_list, timestamp};
use crate::metrics::{MetricsContext, UniversalMetrics};

impl UniversalMetrics {
    /// Metrics for an Apple Podcasts episode (iTunes Search API shape, with
    /// optional `show` ratings merged in).
    #[must_use]
    pub fn from_apple_podcasts(episode: &Value, ctx: &MetricsContext) -> Self {
        let duration_ms =
            count(episode, &["duration_ms"]).or_else(|| count(episode, &["trackTimeMillis"]));
        let release = string(episode, &["release_date"])
            .or_else(|| string(episode, &["releaseDate"]));
        let released_at = timestamp(episode, &["release_date"])
            .or_else(|| timestamp(episode, &["releaseDate"]));

        let mut metrics = UniversalMetrics::new(Platform::ApplePodcasts);
        metrics.content_type = Some("episode".to_string());
        metrics.rating = float(episode, &["rating"]);
        metrics.rating_count = count(episode, &["rating_count"]);
        metrics.review_count = count(episode, &["review_count"]);
        metrics.show_rating = float(episode, &["show", "rating"]);
        metrics.duration_ms = duration_ms;
        metrics.duration_seconds = duration_ms.map(|ms| ms / 1000);
        metrics.title_length = Some(
            extract::char_len(episode, &["title"]).max(extract::char_len(episode, &["trackName"])),
        );
        metrics.upload_date = release;
        metrics.days_since_upload =
            released_at.map(|at| extract::whole_days_between(at, ctx.now));
        metrics.categories = string_list(episode, &["genres"]);

        let show_name = string(episode, &["show", "name"])
            .or_else(|| string(episode, &["collectionName"]));
        let show_artist = string(episode, &["show", "artist"])
            .or_else(|| string(episode, &["artistName"]));

        let mut specific = Map::new();
        put(&mut specific, "track_id", episode.get("trackId").cloned());
        put(&mut specific, "collection_id", episode.get("collectionId").cloned());
        put(&mut specific, "show_name", show_name.map(Value::from));
        put(&mut specific, "show_artist", show_artist.map(Value::from));
        put(&mut specific, "feed_url", string(episode, &["feedUrl"]).map(Value::from));
        put(
            &mut specific,
            "url",
            string(episode, &["trackViewUrl"]).map(Value::from),
        );
        put(
            &mut specific,
            "artwork_url",
            string(episode, &["artworkUrl600"])
                .or_else(|| string(episode, &["artworkUrl100"]))
                .map(Value::from),
        );
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }

    /// Metrics for a Spotify episode object. Without ratings, engagement is
    /// estimated from the show's follower count.
    #[must_use]
    pub fn from_spotify(episode: &Value, ctx: &MetricsContext) -> Self {
        let duration_ms = count(episode, &["duration_ms"]);
        let released_at = timestamp(episode, &["release_date"]);

        let mut metrics = UniversalMetrics::new(Platform::SpotifyPodcasts);
        metrics.content_type = Some("episode".to_string());
        metrics.rating = float(episode, &["rating"]);
        metrics.show_rating = float(episode, &["show", "rating"]);
        metrics.duration_ms = duration_ms;
        metrics.duration_seconds = duration_ms.map(|ms| ms / 1000);
        metrics.title_length = Some(extract::char_len(episode, &["name"]));
        metrics.description_length = Some(extract::char_len(episode, &["description"]));
        metrics.author_follower_count = count(episode, &["show", "followers"])
            .or_else(|| count(episode, &["show", "followers", "total"]));
        metrics.upload_date = string(episode, &["release_date"]);
        metrics.days_since_upload =
            released_at.map(|at| extract::whole_days_between(at, ctx.now));

        let mut specific = Map::new();
        put(&mut specific, "episode_id", string(episode, &["id"]).map(Value::from));
        put(&mut specific, "show_id", string(episode, &["show", "id"]).map(Value::from));
        put(&mut specific, "show_name", string(episode, &["show", "name"]).map(Value::from));
        put(
            &mut specific,
            "show_artist",
            string(episode, &["show", "publisher"]).map(Value::from),
        );
        put(
            &mut specific,
            "url",
            string(episode, &["external_urls", "spotify"]).map(Value::from),
        );
        put(&mut specific, "explicit", episode.get("explicit").cloned());
        put(&mut specific, "language", string(episode, &["language"]).map(Value::from));
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }
}
