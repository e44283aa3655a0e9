//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Check the static asset dir and, for the file backend, create the data file's directory.
pub async fn ensure_env(static_dir: &str, data_file: Option<&str>) -> anyhow::Result<()> {
    let data_dir = data_file.map(|file| {
        Path::new(file)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string())
    });
    common::env::ensure_env(static_dir, data_dir.as_deref()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_parent_of_data_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let data_file = dir.path().join("nested").join("questions.json");
        ensure_env(dir.path().to_str().unwrap(), data_file.to_str()).await?;
        assert!(dir.path().join("nested").is_dir());
        assert!(!data_file.exists());
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_uses_working_directory() -> anyhow::Result<()> {
        ensure_env(".", Some("questions.json")).await
    }

    #[tokio::test]
    async fn table_backend_needs_no_data_dir() -> anyhow::Result<()> {
        ensure_env(".", None).await
    }
}
