//! Participant registry
//!
//! The registry lists every registered participant with their bonus values
//! and referrer link. It backs the zero-fill step, the bonus step and the
//! fallback mode. Unlike the import, a registry that cannot be read fails the
//! leaderboard read.

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::core::result::{AppResult, ResultExt};
use crate::core::types::RegistryUser;

/// Source of registered participants
#[async_trait]
pub trait UserRegistry: Send + Sync + fmt::Debug {
    /// Every registered participant
    async fn users(&self) -> AppResult<Vec<RegistryUser>>;
}

/// Reads the registry from a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileRegistry {
    path: PathBuf,
}

impl JsonFileRegistry {
    /// Registry backed by the document at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl UserRegistry for JsonFileRegistry {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn users(&self) -> AppResult<Vec<RegistryUser>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_registry_err(|| format!("Failed to read {}", self.path.display()))?;

        let users: Vec<RegistryUser> = serde_json::from_str(&content)
            .map_registry_err(|| format!("Failed to parse {}", self.path.display()))?;

        debug!(users = users.len(), "✅ Registry loaded");
        Ok(users)
    }
}

/// Serves a fixed list of users
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    users: Vec<RegistryUser>,
}

impl InMemoryRegistry {
    /// Registry holding `users`
    pub fn new(users: Vec<RegistryUser>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserRegistry for InMemoryRegistry {
    async fn users(&self) -> AppResult<Vec<RegistryUser>> {
        Ok(self.users.clone())
    }
}
