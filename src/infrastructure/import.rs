//! Imported payload loaders
//!
//! The payload is produced by an ingestion step outside this crate. A missing
//! payload is a normal state (nothing imported yet); a payload that exists but
//! cannot be read or parsed is an [`AppError::Import`], which the leaderboard
//! service downgrades to fallback mode.

use async_trait::async_trait;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::core::error::AppError;
use crate::core::result::{AppResult, ResultExt};
use crate::core::types::ImportPayload;

/// Source of the imported payload
#[async_trait]
pub trait ImportLoader: Send + Sync + fmt::Debug {
    /// Load the current payload, `None` when nothing has been imported
    async fn load(&self) -> AppResult<Option<ImportPayload>>;
}

/// Reads the payload from a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileImportLoader {
    path: PathBuf,
}

impl JsonFileImportLoader {
    /// Loader for the document at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ImportLoader for JsonFileImportLoader {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> AppResult<Option<ImportPayload>> {
        let path_str = self.path.display().to_string();

        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("📭 No imported payload at {}", path_str);
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::import(format!("Failed to read payload: {e}"))
                    .with_path(path_str));
            }
        };

        if content.trim().is_empty() {
            info!("📭 Imported payload at {} is empty", path_str);
            return Ok(None);
        }

        let payload: ImportPayload = serde_json::from_str(&content)
            .map_import_err(Some(path_str.as_str()), || "Failed to parse payload".to_string())?;

        debug!(
            entries = payload.entries.len(),
            segments = payload.per_dex_entries.as_ref().map_or(0, |s| s.len()),
            "✅ Imported payload loaded"
        );
        Ok(Some(payload))
    }
}

/// Serves a fixed payload; used by embedders and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryImportLoader {
    payload: Option<ImportPayload>,
}

impl InMemoryImportLoader {
    /// Loader that always returns `payload`
    pub fn new(payload: ImportPayload) -> Self {
        Self {
            payload: Some(payload),
        }
    }

    /// Loader with nothing imported
    pub fn empty() -> Self {
        Self { payload: None }
    }
}

#[async_trait]
impl ImportLoader for InMemoryImportLoader {
    async fn load(&self) -> AppResult<Option<ImportPayload>> {
        Ok(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_no_import() {
        let temp_dir = TempDir::new().unwrap();
        let loader = JsonFileImportLoader::new(temp_dir.path().join("import.json"));

        assert_eq!(loader.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_file_is_no_import() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("import.json");
        tokio::fs::write(&path, "  \n").await.unwrap();

        assert_eq!(JsonFileImportLoader::new(&path).load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_file_is_import_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("import.json");
        tokio::fs::write(&path, r#"{"entries": "#).await.unwrap();

        let result = JsonFileImportLoader::new(&path).load().await;
        assert_matches!(result, Err(AppError::Import { path: Some(_), .. }));
    }

    #[tokio::test]
    async fn test_entries_must_be_present() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("import.json");
        tokio::fs::write(&path, r#"{"rates": {"referralPointsRate": 0.2}}"#)
            .await
            .unwrap();

        let result = JsonFileImportLoader::new(&path).load().await;
        assert_matches!(result, Err(AppError::Import { .. }));
    }

    #[tokio::test]
    async fn test_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("import.json");
        tokio::fs::write(
            &path,
            r#"{
                "entries": [
                    {"refCode": "YOU", "points": 1000, "feesGenerated": 1250},
                    {"refCode": "REF1", "points": 950, "referrerRefCode": "YOU"}
                ],
                "rates": {"referralPointsRate": 0.15},
                "perDexEntries": {"orca": [{"refCode": "YOU", "points": 10}]},
                "importedAt": "2026-10-01T12:00:00Z"
            }"#,
        )
        .await
        .unwrap();

        let payload = JsonFileImportLoader::new(&path).load().await.unwrap().unwrap();
        assert_eq!(payload.entries.len(), 2);
        assert_eq!(payload.rates.unwrap().referral_points_rate, Some(0.15));
        assert!(payload.per_dex_entries.unwrap().contains_key("orca"));
        assert!(payload.imported_at.is_some());
    }

    #[tokio::test]
    async fn test_in_memory_loader() {
        assert_eq!(InMemoryImportLoader::empty().load().await.unwrap(), None);

        let payload = ImportPayload::default();
        let loaded = InMemoryImportLoader::new(payload.clone()).load().await.unwrap();
        assert_eq!(loaded, Some(payload));
    }
}
