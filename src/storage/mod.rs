use crate::{
    config::AppConfig,
    error::{Result, StudyFlowError},
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt, sync::Arc};
use tracing::debug;

pub mod file_storage;
pub mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Key-value blob store holding whole serialized collections
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Loads the blob stored under `key`, if any
    async fn load_blob(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob stored under `key`
    async fn save_blob(&self, key: &str, contents: &str) -> Result<()>;

    /// Removes the blob stored under `key`; missing keys are not an error
    async fn delete_blob(&self, key: &str) -> Result<()>;

    /// Checks if the backend is initialized
    async fn is_initialized(&self) -> bool;
}

/// Rejects keys that are empty or could escape a storage namespace
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(StudyFlowError::InvalidCollectionKey(key.to_string()))
    }
}

/// Logical collections persisted by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Habits,
    HabitLogs,
    Boards,
    Cards,
    Tasks,
    Courses,
}

impl CollectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Habits => "habits",
            Self::HabitLogs => "habitLogs",
            Self::Boards => "kanbanBoards",
            Self::Cards => "kanbanCards",
            Self::Tasks => "tasks",
            Self::Courses => "courses",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed read/replace access to collections over a [`Storage`] backend.
///
/// A missing collection reads as empty. Writes replace the whole collection.
#[derive(Clone)]
pub struct Collections {
    storage: Arc<dyn Storage>,
    key_prefix: String,
}

impl Collections {
    pub fn new(storage: Arc<dyn Storage>, key_prefix: impl Into<String>) -> Self {
        Self {
            storage,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn from_config(storage: Arc<dyn Storage>, config: &AppConfig) -> Self {
        Self::new(storage, config.key_prefix.clone())
    }

    /// Full storage key of a collection, e.g. `studyflow-habits`
    pub fn storage_key(&self, key: CollectionKey) -> String {
        format!("{}{}", self.key_prefix, key.as_str())
    }

    pub async fn read<T: DeserializeOwned>(&self, key: CollectionKey) -> Result<Vec<T>> {
        let storage_key = self.storage_key(key);
        match self.storage.load_blob(&storage_key).await? {
            Some(contents) => {
                let items: Vec<T> = serde_json::from_str(&contents)?;
                debug!(key = %storage_key, count = items.len(), "Read collection");
                Ok(items)
            }
            None => {
                debug!(key = %storage_key, "Collection not found, reading as empty");
                Ok(Vec::new())
            }
        }
    }

    pub async fn write<T: Serialize + Sync>(&self, key: CollectionKey, items: &[T]) -> Result<()> {
        let storage_key = self.storage_key(key);
        let json = serde_json::to_string_pretty(items)?;
        self.storage.save_blob(&storage_key, &json).await?;
        debug!(key = %storage_key, count = items.len(), "Wrote collection");
        Ok(())
    }

    pub async fn clear(&self, key: CollectionKey) -> Result<()> {
        self.storage.delete_blob(&self.storage_key(key)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Habit, TrackingType};

    #[test]
    fn test_validate_key() {
        assert!(validate_key("studyflow-habits").is_ok());
        assert!(validate_key("a_b.c").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../secrets").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(".hidden").is_err());
    }

    #[test]
    fn test_storage_keys_use_prefix() {
        let collections = Collections::new(Arc::new(MemoryStorage::new()), "studyflow-");
        assert_eq!(
            collections.storage_key(CollectionKey::Habits),
            "studyflow-habits"
        );
        assert_eq!(
            collections.storage_key(CollectionKey::Cards),
            "studyflow-kanbanCards"
        );
    }

    #[tokio::test]
    async fn test_missing_collection_reads_empty() {
        let collections = Collections::new(Arc::new(MemoryStorage::new()), "t-");
        let habits: Vec<Habit> = collections.read(CollectionKey::Habits).await.unwrap();
        assert!(habits.is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read_and_clear() {
        let collections = Collections::new(Arc::new(MemoryStorage::new()), "t-");
        let habits = vec![
            Habit::new("Read".to_string(), TrackingType::Quantity),
            Habit::new("Floss".to_string(), TrackingType::Boolean),
        ];

        collections.write(CollectionKey::Habits, &habits).await.unwrap();
        let loaded: Vec<Habit> = collections.read(CollectionKey::Habits).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].name, "Floss");

        collections.clear(CollectionKey::Habits).await.unwrap();
        let loaded: Vec<Habit> = collections.read(CollectionKey::Habits).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_an_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage.save_blob("t-habits", "{not json").await.unwrap();
        let collections = Collections::new(storage, "t-");

        let result: Result<Vec<Habit>> = collections.read(CollectionKey::Habits).await;
        assert!(matches!(result, Err(StudyFlowError::SerializationError(_))));
    }
}
