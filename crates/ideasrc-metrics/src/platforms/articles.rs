use ideasrc_core::Platform;
use serde_json::{Map, Value};

use crate::extract::{
    self, count, count_or_zero, generate_article_id, put, string, string_list, timestamp,
};
use crate::metrics::{to_f64, MetricsContext, UniversalMetrics};

const WORDS_PER_MINUTE: u64 = 200;

impl UniversalMetrics {
    /// Metrics for a Medium article.
    ///
    /// Claps count as likes and responses as comments. Adds `claps_per_day`
    /// and a clap-weighted `viral_velocity` to `platform_specific` once the
    /// article is at least a day old.
    #[must_use]
    pub fn from_medium(article: &Value, ctx: &MetricsContext) -> Self {
        let claps = count_or_zero(article, &["metrics", "claps"]);
        let reading_time_min = count(article, &["metrics", "reading_time_min"]);
        let published = timestamp(article, &["publish_date"]);
        let tags = string_list(article, &["tags"]);

        let mut metrics = UniversalMetrics::new(Platform::Medium);
        metrics.content_type = Some("article".to_string());
        metrics.view_count = count_or_zero(article, &["metrics", "views"]);
        metrics.like_count = claps;
        metrics.comment_count = count_or_zero(article, &["metrics", "responses"]);
        metrics.reading_time_min = reading_time_min;
        metrics.title_length = Some(extract::char_len(article, &["title"]));
        metrics.description_length = Some(extract::char_len(article, &["description"]));
        metrics.tag_count = Some(tags.len() as u64);
        metrics.author_follower_count = count(article, &["author", "followers"]);
        metrics.upload_date = string(article, &["publish_date"]);
        metrics.days_since_upload =
            published.map(|at| extract::whole_days_between(at, ctx.now));
        metrics.categories = tags;

        let mut specific = Map::new();
        put(
            &mut specific,
            "article_id",
            string(article, &["source_id"])
                .or_else(|| string(article, &["id"]))
                .map(Value::from),
        );
        put(
            &mut specific,
            "author_username",
            string(article, &["author", "username"]).map(Value::from),
        );
        put(
            &mut specific,
            "article_url",
            string(article, &["article_url"])
                .or_else(|| string(article, &["url"]))
                .map(Value::from),
        );
        put(&mut specific, "reading_time_min", reading_time_min.map(Value::from));
        put(&mut specific, "publication", string(article, &["publication"]).map(Value::from));
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);

        if let Some(days) = metrics.days_since_upload.filter(|d| *d > 0) {
            let claps_per_day = to_f64(claps) / to_f64(days);
            metrics
                .platform_specific
                .insert("claps_per_day".to_string(), Value::from(claps_per_day));
            if let Some(engagement) = metrics.engagement_rate.filter(|e| *e > 0.0) {
                metrics.platform_specific.insert(
                    "viral_velocity".to_string(),
                    Value::from(engagement * claps_per_day),
                );
            }
        }

        metrics
    }

    /// Metrics for an extracted web article.
    ///
    /// `content` may be plain text or an object with `text`, `top_image` and
    /// `images`. Word count and reading time are derived from the text.
    #[must_use]
    pub fn from_article(article: &Value, ctx: &MetricsContext) -> Self {
        let content = article.get("content");
        let content_text = match content {
            Some(Value::String(text)) => text.clone(),
            Some(obj @ Value::Object(_)) => string(obj, &["text"]).unwrap_or_default(),
            _ => String::new(),
        };
        let word_count = content_text.split_whitespace().count() as u64;
        let has_images = content.is_some_and(|c| {
            string(c, &["top_image"]).is_some()
                || c.get("images")
                    .and_then(Value::as_array)
                    .is_some_and(|imgs| !imgs.is_empty())
        });
        let published = timestamp(article, &["published_at"]);
        let tags = string_list(article, &["tags"]);

        let mut metrics = UniversalMetrics::new(Platform::WebArticle);
        metrics.content_type = Some("article".to_string());
        metrics.view_count = count_or_zero(article, &["metrics", "view_count"]);
        metrics.like_count = count_or_zero(article, &["metrics", "like_count"]);
        metrics.comment_count = count_or_zero(article, &["metrics", "comment_count"]);
        metrics.share_count = count(article, &["metrics", "share_count"])
            .or_else(|| count(article, &["metrics", "social_shares"]))
            .unwrap_or(0);
        if word_count > 0 {
            metrics.word_count = Some(word_count);
            metrics.reading_time_min = Some((word_count / WORDS_PER_MINUTE).max(1));
        }
        metrics.has_images = has_images;
        metrics.title_length = Some(extract::char_len(article, &["title"]));
        metrics.description_length = Some(extract::char_len(article, &["description"]));
        metrics.tag_count = Some(tags.len() as u64);
        metrics.author_follower_count = count(article, &["author", "follower_count"]);
        metrics.upload_date = string(article, &["published_at"]);
        metrics.days_since_upload =
            published.map(|at| extract::whole_days_between(at, ctx.now));
        metrics.categories = tags;

        let mut specific = match article.pointer("/metrics/platform_specific") {
            Some(Value::Object(extra)) => extra.clone(),
            _ => Map::new(),
        };
        if let Some(url) = string(article, &["url"]) {
            specific.insert("article_id".to_string(), Value::from(generate_article_id(&url)));
            specific.insert("url".to_string(), Value::from(url));
        }
        let author = string(article, &["author"]).or_else(|| string(article, &["author", "name"]));
        put(&mut specific, "author", author.map(Value::from));
        put(
            &mut specific,
            "domain",
            string(article, &["source_info", "domain"]).map(Value::from),
        );
        put(
            &mut specific,
            "publication",
            string(article, &["source_info", "publication"]).map(Value::from),
        );
        metrics.platform_specific = specific;

        metrics.calculate_derived_metrics(ctx);
        metrics
    }
}
