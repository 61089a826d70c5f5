use crate::{
    config::AppConfig,
    error::Result,
    storage::{validate_key, Storage},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage: one JSON file per collection
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const DATA_DIR: &'static str = ".studyflow";

    /// Creates a new FileStorage instance under the given data root
    pub fn new(data_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_root.as_ref().join(Self::DATA_DIR),
        }
    }

    /// Creates a FileStorage under the configured `data_dir`
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.data_dir)
    }

    fn blob_file(&self, key: &str) -> PathBuf {
        self.root_path.join(format!("{}.json", key))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await
    }

    async fn load_blob(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let file_path = self.blob_file(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn save_blob(&self, key: &str, contents: &str) -> Result<()> {
        validate_key(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        // Write beside the target, then rename over it
        let file_path = self.blob_file(key);
        let tmp_path = self.root_path.join(format!("{}.json.tmp", key));
        fs::write(&tmp_path, contents).await?;
        fs::rename(&tmp_path, &file_path).await?;
        Ok(())
    }

    async fn delete_blob(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let file_path = self.blob_file(key);

        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists()
    }
}
