//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Warn when the static asset directory is missing; create the data directory if given.
pub async fn ensure_env(static_dir: &str, data_dir: Option<&str>) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "static assets directory not found; editor pages will 404");
    }
    if let Some(data_dir) = data_dir {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    }
    Ok(())
}
