pub mod fs;

use async_trait::async_trait;
use std::error::Error;
use std::fmt;

use crate::model::{Event, RaceId, RaceResult, SnapshotKind};

pub use fs::FsSnapshotStore;

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::new(value.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// Durable per-race snapshot slots, one per `(kind, race)`. Snapshots are
/// created on first fetch, overwritten on forced refresh, never deleted.
/// A stored `None` result records that the service reported no team data.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn exists(&self, kind: SnapshotKind, race: RaceId) -> Result<bool, StorageError>;
    async fn load_event(&self, race: RaceId) -> Result<Event, StorageError>;
    async fn store_event(&self, race: RaceId, event: &Event) -> Result<(), StorageError>;
    async fn load_result(&self, race: RaceId) -> Result<Option<RaceResult>, StorageError>;
    async fn store_result(
        &self,
        race: RaceId,
        result: Option<&RaceResult>,
    ) -> Result<(), StorageError>;
}
