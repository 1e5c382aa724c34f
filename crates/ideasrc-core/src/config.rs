use crate::app_config::{AppConfig, Environment};
use crate::{ConfigError, MetricsPolicy};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(var, format!("must be a positive number, got {value}")));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("IDEASRC_ENV", "development"))?;
    let log_level = or_default("IDEASRC_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("IDEASRC_DATA_DIR", "./data"));
    let database_url = lookup("IDEASRC_DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty());

    let db_max_connections = parse_u32("IDEASRC_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("IDEASRC_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("IDEASRC_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    if db_min_connections > db_max_connections {
        return Err(invalid(
            "IDEASRC_DB_MIN_CONNECTIONS",
            format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        ));
    }

    let request_timeout_secs = parse_u64("IDEASRC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("IDEASRC_USER_AGENT", "ideasrc/0.1 (idea-collection)");
    let max_items_per_scrape = parse_usize("IDEASRC_MAX_ITEMS_PER_SCRAPE", "10")?;
    let hn_api_base_url = or_default(
        "IDEASRC_HN_API_BASE_URL",
        "https://hacker-news.firebaseio.com/v0",
    );

    let metrics_policy = MetricsPolicy {
        viral_velocity_divisor: parse_positive_f64("IDEASRC_VIRAL_VELOCITY_DIVISOR", "10")?,
        min_post_age_hours: parse_positive_f64("IDEASRC_MIN_POST_AGE_HOURS", "0.1")?,
        min_age_days: parse_positive_f64("IDEASRC_MIN_AGE_DAYS", "1")?,
        freshness_decay_days: parse_positive_f64("IDEASRC_FRESHNESS_DECAY_DAYS", "30")?,
    };

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        database_url,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        request_timeout_secs,
        user_agent,
        max_items_per_scrape,
        hn_api_base_url,
        metrics_policy,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "IDEASRC_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
