use ideasrc_core::{AppConfig, Platform};

use crate::store;

pub(crate) async fn run_db_migrate(config: &AppConfig, platform: Platform) -> anyhow::Result<()> {
    let pool = store::connect(config, platform).await?;
    let applied = ideasrc_db::run_migrations(&pool).await?;
    println!("{platform}: {applied} migration(s) applied");
    Ok(())
}

pub(crate) async fn run_db_ping(config: &AppConfig, platform: Platform) -> anyhow::Result<()> {
    let pool = store::connect(config, platform).await?;
    ideasrc_db::health_check(&pool).await?;
    println!("{platform}: database ok");
    Ok(())
}

/// Delete every row for `platform`. Refuses without `--yes`.
///
/// # Errors
///
/// Returns an error when `yes` is false or the delete fails.
pub(crate) async fn run_clear(
    config: &AppConfig,
    platform: Platform,
    yes: bool,
) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!("refusing to clear {platform} ideas without --yes");
    }
    let pool = store::open(config, platform).await?;
    let deleted = ideasrc_db::clear_all_ideas(&pool).await?;
    tracing::info!(%platform, deleted, "cleared ideas");
    println!("{platform}: deleted {deleted} idea(s)");
    Ok(())
}
