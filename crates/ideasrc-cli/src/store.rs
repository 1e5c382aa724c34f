use anyhow::Context;
use ideasrc_core::{AppConfig, Platform};
use ideasrc_db::PoolConfig;
use sqlx::SqlitePool;

/// Connect to a platform's database, creating the data directory when the
/// default per-platform file is used.
pub(crate) async fn connect(config: &AppConfig, platform: Platform) -> anyhow::Result<SqlitePool> {
    if config.database_url.is_none() {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("failed to create data dir {}", config.data_dir.display())
        })?;
    }

    let url = config.database_url_for(platform);
    let pool = ideasrc_db::connect_pool(&url, PoolConfig::from_app_config(config))
        .await
        .with_context(|| format!("failed to open {platform} database"))?;
    Ok(pool)
}

/// Connect and bring the schema up to date.
pub(crate) async fn open(config: &AppConfig, platform: Platform) -> anyhow::Result<SqlitePool> {
    let pool = connect(config, platform).await?;
    let applied = ideasrc_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(%platform, applied, "applied migrations");
    }
    Ok(pool)
}
