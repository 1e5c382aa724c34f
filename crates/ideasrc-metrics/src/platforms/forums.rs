use ideasrc_core::Platform;
use serde_json::{Map, Value};

use crate::extract::{self, count, count_or_zero, float, put, string, timestamp};
use crate::metrics::{MetricsContext, UniversalMetrics};

impl UniversalMetrics {
    /// Metrics for a HackerNews Firebase item.
    ///
    /// The item score counts as likes and `descendants` (the whole comment
    /// tree) as comments. Post age is floored at
    /// [`MetricsPolicy::min_post_age_hours`](ideasrc_core::MetricsPolicy).
    #[must_use]
    pub fn from_hackernews(item: &Value, ctx: &MetricsContext) -> Self {
        let score = count_or_zero(item, &["score"]);
        let descendants = count_or_zero(item, &["descendants"]);
        let item_type = string(item, &["type"]).unwrap_or_else(|| "story".to_string());
        let posted_at = timestamp(item, &["time"]);

        let mut metrics = UniversalMetrics::new(Platform::HackerNews);
        metrics.content_type = Some(item_type.clone());
        metrics.like_count = score;
        metrics.comment_count = descendants;
        metrics.descendants_count = Some(descendants);
        metrics.title_length = Some(extract::char_len(item, &["title"]));
        metrics.description_length = Some(extract::char_len(item, &["text"]));

        if let Some(posted_at) = posted_at {
            let hours = extract::hours_between(posted_at, ctx.now)
                .max(ctx.policy.min_post_age_hours);
            metrics.hours_since_post = Some(hours);
            metrics.days_since_upload = Some(whole_days_from_hours(hours));
            metrics.upload_date = Some(posted_at.to_rfc3339());
        }

        let mut specific = Map::new();
        specific.insert("score".to_string(), Value::from(score));
        specific.insert("descendants".to_string(), Value::from(descendants));
        specific.insert("type".to_string(), Value::from(item_type));
        put(&mut specific, "time", item.get("time").cloned());
        put(&mut specific, "by", string(item, &["by"]).map(Value::from));
        put(&mut specific, "url", string(item, &["url"]).map(Value::from));
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }

    /// Metrics for a Reddit post listing entry (`data` of a `t3` thing).
    ///
    /// The post score counts as likes; `num_views` is used as reach when
    /// Reddit exposes it.
    #[must_use]
    pub fn from_reddit(post: &Value, ctx: &MetricsContext) -> Self {
        let score = count_or_zero(post, &["score"]);
        let created = timestamp(post, &["created_utc"]);

        let mut metrics = UniversalMetrics::new(Platform::Reddit);
        metrics.content_type = Some(
            if post.get("is_self").and_then(Value::as_bool) == Some(false) {
                "link".to_string()
            } else {
                "text".to_string()
            },
        );
        metrics.view_count = count_or_zero(post, &["num_views"]);
        metrics.like_count = score;
        metrics.comment_count = count_or_zero(post, &["num_comments"]);
        metrics.upvote_count = count(post, &["ups"]);
        metrics.upvote_ratio = float(post, &["upvote_ratio"]);
        metrics.title_length = Some(extract::char_len(post, &["title"]));
        metrics.description_length = Some(extract::char_len(post, &["selftext"]));

        if let Some(created) = created {
            let hours = extract::hours_between(created, ctx.now)
                .max(ctx.policy.min_post_age_hours);
            metrics.hours_since_post = Some(hours);
            metrics.days_since_upload = Some(whole_days_from_hours(hours));
            metrics.upload_date = Some(created.to_rfc3339());
        }
        if let Some(subreddit) = string(post, &["subreddit"]) {
            metrics.categories = vec![subreddit];
        }

        let mut specific = Map::new();
        specific.insert("score".to_string(), Value::from(score));
        put(&mut specific, "ups", count(post, &["ups"]).map(Value::from));
        put(&mut specific, "upvote_ratio", post.get("upvote_ratio").cloned());
        put(
            &mut specific,
            "total_awards",
            count(post, &["total_awards_received"]).map(Value::from),
        );
        put(&mut specific, "created_utc", post.get("created_utc").cloned());
        put(&mut specific, "author", string(post, &["author"]).map(Value::from));
        put(&mut specific, "subreddit", string(post, &["subreddit"]).map(Value::from));
        put(&mut specific, "permalink", string(post, &["permalink"]).map(Value::from));
        put(&mut specific, "url", string(post, &["url"]).map(Value::from));
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }
}

/// Whole days since posting; a post younger than a day counts as one day old.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_days_from_hours(hours: f64) -> u64 {
    ((hours / 24.0).floor().max(0.0) as u64).max(1)
}
