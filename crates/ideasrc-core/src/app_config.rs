use std::path::PathBuf;

use crate::{MetricsPolicy, Platform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub data_dir: PathBuf,
    /// Overrides the per-platform database file when set.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_items_per_scrape: usize,
    pub hn_api_base_url: String,
    pub metrics_policy: MetricsPolicy,
}

impl AppConfig {
    /// Database URL for a platform's private store.
    ///
    /// Each platform writes to `{data_dir}/{platform}.db` unless
    /// `IDEASRC_DATABASE_URL` pins every platform to one database.
    #[must_use]
    pub fn database_url_for(&self, platform: Platform) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }
        let path = self.data_dir.join(format!("{}.db", platform.as_str()));
        format!("sqlite://{}?mode=rwc", path.display())
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_items_per_scrape", &self.max_items_per_scrape)
            .field("hn_api_base_url", &self.hn_api_base_url)
            .field("metrics_policy", &self.metrics_policy)
            .finish()
    }
}
