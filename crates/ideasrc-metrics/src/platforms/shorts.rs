use ideasrc_core::Platform;
use serde_json::{Map, Value};

use crate::extract::{
    self, boolean, count, count_or_zero, float, parse_iso8601_duration, put, string,
    string_list, timestamp,
};
use crate::metrics::{MetricsContext, UniversalMetrics};

impl UniversalMetrics {
    /// Metrics for a YouTube Data API `videos` resource.
    ///
    /// Statistics arrive as numeric strings; `contentDetails.duration` is an
    /// ISO-8601 duration.
    #[must_use]
    pub fn from_youtube(video: &Value, ctx: &MetricsContext) -> Self {
        let snippet = video.get("snippet").cloned().unwrap_or(Value::Null);
        let published = timestamp(&snippet, &["publishedAt"]);
        let duration = string(video, &["contentDetails", "duration"]);

        let mut metrics = UniversalMetrics::new(Platform::Youtube);
        metrics.content_type = Some("short".to_string());
        metrics.view_count = count_or_zero(video, &["statistics", "viewCount"]);
        metrics.like_count = count_or_zero(video, &["statistics", "likeCount"]);
        metrics.comment_count = count_or_zero(video, &["statistics", "commentCount"]);
        metrics.dislike_count = count(video, &["statistics", "dislikeCount"]);
        metrics.favorite_count = count(video, &["statistics", "favoriteCount"]);
        metrics.duration_seconds = duration.as_deref().and_then(parse_iso8601_duration);
        metrics.title_length = Some(extract::char_len(&snippet, &["title"]));
        metrics.description_length = Some(extract::char_len(&snippet, &["description"]));
        metrics.tag_count = Some(string_list(&snippet, &["tags"]).len() as u64);
        metrics.author_follower_count = count(video, &["channel", "subscriberCount"]);
        metrics.upload_date = string(&snippet, &["publishedAt"]);
        metrics.days_since_upload =
            published.map(|at| extract::whole_days_between(at, ctx.now));
        if let Some(category) = string(&snippet, &["categoryId"]) {
            metrics.categories = vec![category];
        }

        let mut specific = Map::new();
        put(&mut specific, "video_id", string(video, &["id"]).map(Value::from));
        put(&mut specific, "channel_id", string(&snippet, &["channelId"]).map(Value::from));
        put(
            &mut specific,
            "channel_title",
            string(&snippet, &["channelTitle"]).map(Value::from),
        );
        put(&mut specific, "duration", duration.map(Value::from));
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }

    /// Metrics for a TikTok video item (`stats`, `author`, `video` blocks).
    #[must_use]
    pub fn from_tiktok(video: &Value, ctx: &MetricsContext) -> Self {
        let created = timestamp(video, &["createTime"]);
        let hashtags = if video.get("challenges").is_some() {
            string_list(video, &["challenges"])
        } else {
            string_list(video, &["hashtags"])
        };

        let mut metrics = UniversalMetrics::new(Platform::Tiktok);
        metrics.content_type = Some("short".to_string());
        metrics.view_count = count_or_zero(video, &["stats", "playCount"]);
        metrics.like_count = count_or_zero(video, &["stats", "diggCount"]);
        metrics.comment_count = count_or_zero(video, &["stats", "commentCount"]);
        metrics.share_count = count_or_zero(video, &["stats", "shareCount"]);
        metrics.save_count = count(video, &["stats", "collectCount"]);
        metrics.repost_count = count(video, &["stats", "repostCount"]);
        metrics.duration_seconds = count(video, &["video", "duration"]);
        metrics.description_length = Some(extract::char_len(video, &["desc"]));
        metrics.tag_count = Some(hashtags.len() as u64);
        metrics.author_follower_count = count(video, &["author", "followerCount"])
            .or_else(|| count(video, &["authorStats", "followerCount"]));
        metrics.author_verified = boolean(video, &["author", "verified"]);
        metrics.upload_date = created.map(|at| at.to_rfc3339());
        metrics.days_since_upload = created.map(|at| extract::whole_days_between(at, ctx.now));
        metrics.categories = hashtags;

        let username = string(video, &["author", "uniqueId"])
            .or_else(|| string(video, &["author", "username"]));
        let mut specific = Map::new();
        put(&mut specific, "video_id", string(video, &["id"]).map(Value::from));
        put(&mut specific, "username", username.map(Value::from));
        put(&mut specific, "create_time", video.get("createTime").cloned());
        put(&mut specific, "music_title", string(video, &["music", "title"]).map(Value::from));
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }

    /// Metrics for an Instagram reel. Reach is the play count, and saves
    /// count towards engagement.
    #[must_use]
    pub fn from_instagram(reel: &Value, ctx: &MetricsContext) -> Self {
        let uploaded = timestamp(reel, &["upload_date"]);
        let hashtags = string_list(reel, &["tags"]);

        let mut metrics = UniversalMetrics::new(Platform::InstagramReels);
        metrics.content_type = Some("reel".to_string());
        metrics.plays_count = Some(count_or_zero(reel, &["metrics", "plays"]));
        metrics.view_count = count_or_zero(reel, &["metrics", "views"]);
        metrics.like_count = count_or_zero(reel, &["metrics", "likes"]);
        metrics.comment_count = count_or_zero(reel, &["metrics", "comments"]);
        metrics.share_count = count_or_zero(reel, &["metrics", "shares"]);
        metrics.save_count = Some(count_or_zero(reel, &["metrics", "saves"]));
        metrics.duration_seconds = count(reel, &["reel", "duration"]);
        metrics.description_length = Some(extract::char_len(reel, &["description"]));
        metrics.tag_count = Some(hashtags.len() as u64);
        metrics.author_follower_count = count(reel, &["creator", "followers"]);
        metrics.author_verified = boolean(reel, &["creator", "verified"]);
        metrics.upload_date = string(reel, &["upload_date"]);
        metrics.days_since_upload =
            uploaded.map(|at| extract::whole_days_between(at, ctx.now));
        metrics.categories = hashtags;

        let mut specific = Map::new();
        put(&mut specific, "shortcode", string(reel, &["shortcode"]).map(Value::from));
        put(&mut specific, "url", string(reel, &["url"]).map(Value::from));
        put(
            &mut specific,
            "username",
            string(reel, &["creator", "username"]).map(Value::from),
        );
        put(&mut specific, "audio", string(reel, &["reel", "audio"]).map(Value::from));
        put(&mut specific, "location", string(reel, &["reel", "location"]).map(Value::from));
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }

    /// Metrics for a Twitch Helix clip. Clips only expose a view count.
    #[must_use]
    pub fn from_twitch(clip: &Value, ctx: &MetricsContext) -> Self {
        let created = timestamp(clip, &["created_at"]);

        let mut metrics = UniversalMetrics::new(Platform::TwitchClips);
        metrics.content_type = Some("clip".to_string());
        metrics.view_count = count_or_zero(clip, &["view_count"]);
        metrics.duration_seconds = float(clip, &["duration"])
            .filter(|d| *d > 0.0)
            .map(seconds_from_float);
        metrics.title_length = Some(extract::char_len(clip, &["title"]));
        metrics.author_verified = string(clip, &["broadcaster_type"]).as_deref() == Some("partner");
        metrics.upload_date = string(clip, &["created_at"]);
        metrics.days_since_upload = created.map(|at| extract::whole_days_between(at, ctx.now));
        if let Some(game) = string(clip, &["game_name"]) {
            metrics.categories = vec![game];
        }

        let mut specific = Map::new();
        for key in [
            "url",
            "embed_url",
            "broadcaster_id",
            "broadcaster_name",
            "creator_id",
            "creator_name",
            "game_id",
            "game_name",
            "language",
            "thumbnail_url",
        ] {
            put(&mut specific, key, string(clip, &[key]).map(Value::from));
        }
        put(&mut specific, "clip_id", string(clip, &["id"]).map(Value::from));
        put(&mut specific, "vod_offset", clip.get("vod_offset").cloned());
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }

    /// Metrics for a Kick clip. Reactions count towards engagement and the
    /// clip age is at least one day.
    #[must_use]
    pub fn from_kick(clip: &Value, ctx: &MetricsContext) -> Self {
        let created = timestamp(clip, &["created_at"]);

        let mut metrics = UniversalMetrics::new(Platform::KickClips);
        metrics.content_type = Some("clip".to_string());
        metrics.view_count = count_or_zero(clip, &["views"]);
        metrics.like_count = count_or_zero(clip, &["likes"]);
        metrics.comment_count = count_or_zero(clip, &["comments"]);
        metrics.share_count = count_or_zero(clip, &["shares"]);
        metrics.reaction_count = count(clip, &["reactions"]);
        metrics.duration_seconds = count(clip, &["duration"]);
        metrics.title_length = Some(extract::char_len(clip, &["title"]));
        metrics.author_follower_count = count(clip, &["streamer_followers"]);
        metrics.author_verified = boolean(clip, &["streamer_verified"]);
        metrics.upload_date = string(clip, &["created_at"]);
        metrics.days_since_upload =
            created.map(|at| extract::whole_days_between(at, ctx.now).max(1));
        if let Some(category) = string(clip, &["category"]) {
            metrics.categories = vec![category];
        }

        let mut specific = Map::new();
        put(
            &mut specific,
            "url",
            string(clip, &["clip_url"])
                .or_else(|| string(clip, &["url"]))
                .map(Value::from),
        );
        put(
            &mut specific,
            "username",
            string(clip, &["streamer"])
                .or_else(|| string(clip, &["channel"]))
                .map(Value::from),
        );
        put(&mut specific, "clip_id", string(clip, &["id"]).map(Value::from));
        put(&mut specific, "category", string(clip, &["category"]).map(Value::from));
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds_from_float(secs: f64) -> u64 {
    secs.trunc() as u64
}
