//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime` without depending directly on `common`.

use tracing::info;

/// Ensure the data directory and the parent of every data file exist.
pub async fn ensure_env(data_dir: &str, data_files: &[&str]) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_dir).await?;
    for file in data_files {
        common::env::ensure_parent_dir(file).await?;
    }
    info!(%data_dir, files = data_files.len(), "runtime directories ready");
    Ok(())
}
