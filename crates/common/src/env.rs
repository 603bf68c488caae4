//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists, creating it when missing.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_err() {
        warn!(%data_dir, "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}

/// Ensure the parent directory of a data file exists.
pub async fn ensure_parent_dir(file: &str) -> anyhow::Result<()> {
    let Some(parent) = Path::new(file).parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    info!(file, "data file directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_directories() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("common_env_{}", std::process::id()));
        let data = root.join("data");
        let data_str = data.to_string_lossy().to_string();
        ensure_data_dir(&data_str).await?;
        assert!(tokio::fs::metadata(&data).await?.is_dir());

        let file = root.join("nested").join("patients.json");
        ensure_parent_dir(&file.to_string_lossy()).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
