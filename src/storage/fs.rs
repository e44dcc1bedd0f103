use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{SnapshotStore, StorageError};
use crate::model::{Event, RaceId, RaceResult, SnapshotKind};

/// One JSON file per `(kind, race)` under the cache directory:
/// `event_<id>.json` / `result_<id>.json`.
pub struct FsSnapshotStore {
    cache_dir: PathBuf,
}

impl FsSnapshotStore {
    /// # Errors
    ///
    /// Will return `Err` if the cache directory cannot be created.
    pub fn new(cache_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn path_for(&self, kind: SnapshotKind, race: RaceId) -> PathBuf {
        self.cache_dir
            .join(format!("{}_{}.json", kind.as_str(), race))
    }
}

#[async_trait]
impl SnapshotStore for FsSnapshotStore {
    async fn exists(&self, kind: SnapshotKind, race: RaceId) -> Result<bool, StorageError> {
        match fs::metadata(self.path_for(kind, race)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_event(&self, race: RaceId) -> Result<Event, StorageError> {
        let text = fs::read_to_string(self.path_for(SnapshotKind::Event, race)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn store_event(&self, race: RaceId, event: &Event) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(event)?;
        fs::write(self.path_for(SnapshotKind::Event, race), text).await?;
        Ok(())
    }

    async fn load_result(&self, race: RaceId) -> Result<Option<RaceResult>, StorageError> {
        let text = fs::read_to_string(self.path_for(SnapshotKind::Result, race)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn store_result(
        &self,
        race: RaceId,
        result: Option<&RaceResult>,
    ) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(&result)?;
        fs::write(self.path_for(SnapshotKind::Result, race), text).await?;
        Ok(())
    }
}
