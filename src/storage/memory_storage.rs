use crate::{
    error::Result,
    storage::{validate_key, Storage},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-process storage, the equivalent of the browser's local storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn load_blob(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.blobs.lock().await.get(key).cloned())
    }

    async fn save_blob(&self, key: &str, contents: &str) -> Result<()> {
        validate_key(key)?;
        self.blobs
            .lock()
            .await
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }

    async fn delete_blob(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.blobs.lock().await.remove(key);
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        true
    }
}
