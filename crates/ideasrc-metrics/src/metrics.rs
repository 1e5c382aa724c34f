use chrono::{DateTime, Utc};
use ideasrc_core::{MetricsPolicy, Platform};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which family of derived-metric formulas a platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaSet {
    /// Engagement relative to views or plays.
    Reach,
    /// Engagement relative to points, with time-decayed velocity.
    Rank,
    /// Engagement estimated from listener ratings.
    Rating,
}

impl FormulaSet {
    #[must_use]
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::HackerNews | Platform::Reddit => FormulaSet::Rank,
            Platform::ApplePodcasts | Platform::SpotifyPodcasts => FormulaSet::Rating,
            Platform::Medium
            | Platform::WebArticle
            | Platform::Youtube
            | Platform::Tiktok
            | Platform::InstagramReels
            | Platform::TwitchClips
            | Platform::KickClips => FormulaSet::Reach,
        }
    }
}

/// Evaluation time and tunable constants for one normalization pass.
#[derive(Debug, Clone, Copy)]
pub struct MetricsContext {
    pub now: DateTime<Utc>,
    pub policy: MetricsPolicy,
}

impl MetricsContext {
    #[must_use]
    pub fn new(now: DateTime<Utc>, policy: MetricsPolicy) -> Self {
        Self { now, policy }
    }

    /// Context evaluated at the current wall-clock time.
    #[must_use]
    pub fn now(policy: MetricsPolicy) -> Self {
        Self::new(Utc::now(), policy)
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

/// Platform metrics normalized into one shape.
///
/// The four core counters are always present (zero when the platform does
/// not report them); everything else is absent until a constructor or
/// [`UniversalMetrics::calculate_derived_metrics`] fills it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversalMetrics {
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub share_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plays_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repost_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descendants_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upvote_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dislike_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upvote_ratio: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_to_view_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_to_view_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_to_view_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_to_view_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_per_day: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viral_velocity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_score: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_since_post: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_upload: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_count: Option<u64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_images: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_follower_count: Option<u64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub author_verified: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub platform_specific: Map<String, Value>,
}

impl UniversalMetrics {
    /// Empty metrics for `platform` with every counter at zero.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            content_type: None,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            share_count: 0,
            plays_count: None,
            save_count: None,
            repost_count: None,
            descendants_count: None,
            upvote_count: None,
            dislike_count: None,
            favorite_count: None,
            reaction_count: None,
            rating_count: None,
            review_count: None,
            rating: None,
            show_rating: None,
            upvote_ratio: None,
            engagement_rate: None,
            like_to_view_ratio: None,
            comment_to_view_ratio: None,
            share_to_view_ratio: None,
            save_to_view_ratio: None,
            views_per_day: None,
            views_per_hour: None,
            points_per_hour: None,
            viral_velocity: None,
            quality_score: None,
            freshness_score: None,
            social_score: None,
            hours_since_post: None,
            days_since_upload: None,
            upload_date: None,
            duration_ms: None,
            duration_seconds: None,
            word_count: None,
            reading_time_min: None,
            title_length: None,
            description_length: None,
            tag_count: None,
            has_images: false,
            author_follower_count: None,
            author_verified: false,
            categories: Vec::new(),
            platform_specific: Map::new(),
        }
    }

    /// Views for most platforms, plays where the platform counts plays.
    #[must_use]
    pub fn reach(&self) -> u64 {
        self.plays_count.unwrap_or(self.view_count)
    }

    /// Fill every derived field from the raw counters.
    ///
    /// Safe to call repeatedly; each call recomputes from the counters.
    pub fn calculate_derived_metrics(&mut self, ctx: &MetricsContext) {
        let policy = &ctx.policy;

        match FormulaSet::for_platform(self.platform) {
            FormulaSet::Reach => self.apply_reach_formulas(),
            FormulaSet::Rank => self.apply_rank_formulas(policy),
            FormulaSet::Rating => self.apply_rating_formulas(),
        }

        self.apply_velocity(policy);
        self.social_score = self.compute_social_score();
        self.quality_score = self.compute_quality_score();

        if self.duration_seconds.is_none() {
            self.duration_seconds = self.reading_time_min.map(|min| min.saturating_mul(60));
        }
    }

    fn apply_reach_formulas(&mut self) {
        let reach = self.reach();
        let engaged = [
            self.like_count,
            self.comment_count,
            self.share_count,
            self.save_count.unwrap_or(0),
            self.reaction_count.unwrap_or(0),
        ]
        .into_iter()
        .fold(0_u64, u64::saturating_add);

        self.engagement_rate = percent(engaged, reach);
        self.like_to_view_ratio = percent(self.like_count, reach);
        self.comment_to_view_ratio = percent(self.comment_count, reach);
        self.share_to_view_ratio = if self.share_count > 0 {
            percent(self.share_count, reach)
        } else {
            None
        };
        self.save_to_view_ratio = match self.save_count {
            Some(saves) if saves > 0 => percent(saves, reach),
            _ => None,
        };
    }

    fn apply_rank_formulas(&mut self, policy: &MetricsPolicy) {
        let points = self.like_count;

        if self.view_count > 0 {
            self.apply_reach_formulas();
        } else {
            self.engagement_rate = percent(self.comment_count, points);
        }

        self.points_per_hour = None;
        self.viral_velocity = None;
        if let Some(hours) = self.hours_since_post {
            if points > 0 {
                let hours = hours.max(policy.min_post_age_hours);
                let pph = finite_non_negative(to_f64(points) / hours);
                self.points_per_hour = pph;
                if let (Some(pph), Some(engagement)) = (pph, self.engagement_rate) {
                    self.viral_velocity =
                        finite_non_negative(pph * engagement / policy.viral_velocity_divisor);
                }
            }
        }
    }

    fn apply_rating_formulas(&mut self) {
        let from_rating = |rating: Option<f64>| {
            rating
                .filter(|r| *r > 0.0)
                .and_then(|r| finite_non_negative(r / 5.0 * 100.0))
        };

        self.engagement_rate = from_rating(self.rating)
            .or_else(|| from_rating(self.show_rating))
            .or_else(|| {
                self.author_follower_count
                    .filter(|f| *f > 0)
                    .and_then(|f| finite_non_negative((to_f64(f) + 1.0).log10() * 10.0))
                    .map(|estimate| estimate.min(100.0))
            });
    }

    fn apply_velocity(&mut self, policy: &MetricsPolicy) {
        self.views_per_day = None;
        self.views_per_hour = None;
        self.freshness_score = None;

        let Some(days) = self.days_since_upload else {
            return;
        };

        let reach = self.reach();
        if reach > 0 {
            let effective_days = to_f64(days).max(policy.min_age_days);
            self.views_per_day = finite_non_negative(to_f64(reach) / effective_days);
            self.views_per_hour = self.views_per_day.map(|vpd| vpd / 24.0);
        }

        self.freshness_score = finite_non_negative(
            (-to_f64(days) / policy.freshness_decay_days)
                .exp()
                .clamp(0.0, 1.0),
        );
    }

    fn compute_social_score(&self) -> Option<f64> {
        if self.like_count == 0 && self.comment_count == 0 && self.share_count == 0 {
            return None;
        }
        let mut score = 0.0;
        score += (to_f64(self.like_count) / 100.0).min(3.0);
        score += (to_f64(self.comment_count) / 20.0).min(3.0);
        score += (to_f64(self.share_count) / 10.0).min(4.0);
        Some(score.min(10.0))
    }

    fn compute_quality_score(&self) -> Option<f64> {
        let mut score = 0.0;
        let mut has_signal = false;

        if let Some(words) = self.word_count.filter(|w| *w > 0) {
            has_signal = true;
            score += match words {
                800..=2000 => 3.0,
                500..=799 | 2001..=3000 => 2.0,
                w if w >= 300 => 1.0,
                _ => 0.0,
            };
        }
        if let Some(engagement) = self.engagement_rate {
            has_signal = true;
            if engagement > 1.0 {
                score += (engagement / 2.0).min(3.0);
            }
        }
        if let Some(social) = self.social_score {
            has_signal = true;
            score += (social / 2.0).min(2.0);
        }
        if self.has_images {
            has_signal = true;
            score += 1.0;
        }
        if let Some(tags) = self.tag_count.filter(|t| *t > 0) {
            has_signal = true;
            if (3..=10).contains(&tags) {
                score += 1.0;
            }
        }

        has_signal.then_some(score.clamp(0.0, 10.0))
    }

    /// Serialize to a JSON object, omitting absent values and empty
    /// collections. This is the stored score dictionary.
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => Map::new(),
        }
    }
}

/// `part / whole * 100`, absent when `whole` is zero.
fn percent(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    finite_non_negative(to_f64(part) / to_f64(whole) * 100.0)
}

fn finite_non_negative(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn to_f64(n: u64) -> f64 {
    n as f64
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
