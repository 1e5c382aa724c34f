/// Tunable constants used by the derived-metric formulas.
///
/// Loaded from the environment by [`crate::load_app_config`]; the defaults
/// match the values the scrapers have always used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsPolicy {
    /// `viral_velocity = points_per_hour * engagement_rate / divisor`.
    pub viral_velocity_divisor: f64,
    /// Floor applied to post age before computing points per hour.
    pub min_post_age_hours: f64,
    /// Floor applied to content age before computing views per day.
    pub min_age_days: f64,
    /// Decay constant for `freshness_score = exp(-days / decay)`.
    pub freshness_decay_days: f64,
}

impl Default for MetricsPolicy {
    fn default() -> Self {
        Self {
            viral_velocity_divisor: 10.0,
            min_post_age_hours: 0.1,
            min_age_days: 1.0,
            freshness_decay_days: 30.0,
        }
    }
}
