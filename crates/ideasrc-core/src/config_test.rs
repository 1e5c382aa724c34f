use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;
use crate::Platform;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "IDEASRC_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_environment() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir, PathBuf::from("./data"));
    assert!(cfg.database_url.is_none());
    assert_eq!(cfg.db_max_connections, 5);
    assert_eq!(cfg.db_min_connections, 1);
    assert_eq!(cfg.db_acquire_timeout_secs, 10);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "ideasrc/0.1 (idea-collection)");
    assert_eq!(cfg.max_items_per_scrape, 10);
    assert_eq!(cfg.hn_api_base_url, "https://hacker-news.firebaseio.com/v0");
    assert_eq!(cfg.metrics_policy, MetricsPolicy::default());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("IDEASRC_ENV", "production");
    map.insert("IDEASRC_DATA_DIR", "/var/lib/ideasrc");
    map.insert("IDEASRC_REQUEST_TIMEOUT_SECS", "5");
    map.insert("IDEASRC_MAX_ITEMS_PER_SCRAPE", "25");
    map.insert("IDEASRC_VIRAL_VELOCITY_DIVISOR", "20");
    map.insert("IDEASRC_MIN_POST_AGE_HOURS", "0.5");

    let cfg = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/ideasrc"));
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.max_items_per_scrape, 25);
    assert!((cfg.metrics_policy.viral_velocity_divisor - 20.0).abs() < f64::EPSILON);
    assert!((cfg.metrics_policy.min_post_age_hours - 0.5).abs() < f64::EPSILON);
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("IDEASRC_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "IDEASRC_REQUEST_TIMEOUT_SECS"
        ),
        "expected InvalidEnvVar(IDEASRC_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_min_connections_above_max() {
    let mut map = HashMap::new();
    map.insert("IDEASRC_DB_MAX_CONNECTIONS", "2");
    map.insert("IDEASRC_DB_MIN_CONNECTIONS", "4");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "IDEASRC_DB_MIN_CONNECTIONS"
        ),
        "expected InvalidEnvVar(IDEASRC_DB_MIN_CONNECTIONS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_positive_policy_constant() {
    let mut map = HashMap::new();
    map.insert("IDEASRC_FRESHNESS_DECAY_DAYS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "IDEASRC_FRESHNESS_DECAY_DAYS"
        ),
        "expected InvalidEnvVar(IDEASRC_FRESHNESS_DECAY_DAYS), got: {result:?}"
    );
}

#[test]
fn blank_database_url_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("IDEASRC_DATABASE_URL", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.database_url.is_none());
}

#[test]
fn database_url_for_uses_one_file_per_platform() {
    let mut map = HashMap::new();
    map.insert("IDEASRC_DATA_DIR", "/tmp/ideas");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(
        cfg.database_url_for(Platform::HackerNews),
        "sqlite:///tmp/ideas/hackernews.db?mode=rwc"
    );
    assert_eq!(
        cfg.database_url_for(Platform::ApplePodcasts),
        "sqlite:///tmp/ideas/apple_podcasts.db?mode=rwc"
    );
}

#[test]
fn database_url_override_applies_to_every_platform() {
    let mut map = HashMap::new();
    map.insert("IDEASRC_DATABASE_URL", "sqlite://shared.db");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(cfg.database_url_for(Platform::Reddit), "sqlite://shared.db");
    assert_eq!(cfg.database_url_for(Platform::Medium), "sqlite://shared.db");
}

#[test]
fn debug_output_redacts_database_url() {
    let mut map = HashMap::new();
    map.insert("IDEASRC_DATABASE_URL", "sqlite://secret-location.db");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-location"));
    assert!(rendered.contains("[redacted]"));
}
