//! Shared domain types and configuration for the ideasrc workspace.
//!
//! Every other crate depends on this one: the store persists [`NewIdea`]
//! values, the metrics normalizer reads [`MetricsPolicy`], and the processor
//! turns [`IdeaRecord`] values into [`IdeaInspiration`] records.

pub mod app_config;
pub mod config;
pub mod idea;
pub mod platform;
pub mod policy;
pub mod record;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use idea::{ContentType, IdeaInspiration};
pub use platform::Platform;
pub use policy::MetricsPolicy;
pub use record::{IdeaRecord, NewIdea, RawScrapeRecord, ScoreDictionary, Tags};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("unknown content type: {0}")]
    UnknownContentType(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
