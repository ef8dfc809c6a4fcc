//! Session-scoped providers
//!
//! Nothing here outlives the process. Backs the gallery when no durable
//! storage is wanted, e.g. in tests.

use crate::data_url::data_url_payload;
use crate::models::Directory;
use crate::providers::{FilesystemProvider, KeyValueStore};
use crate::service::PhotoGalleryError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Base64 files keyed by directory and path
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    files: Mutex<HashMap<(Option<Directory>, String), String>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a file outside any directory, e.g. a camera's temporary output
    pub async fn insert_absolute(&self, path: &str, data: &str) {
        self.files
            .lock()
            .await
            .insert((None, path.to_string()), data.to_string());
    }

    pub async fn is_empty(&self) -> bool {
        self.files.lock().await.is_empty()
    }
}

#[async_trait]
impl FilesystemProvider for MemoryFilesystem {
    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<(), PhotoGalleryError> {
        self.files.lock().await.insert(
            (Some(directory), path.to_string()),
            data_url_payload(data).to_string(),
        );
        Ok(())
    }

    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<String, PhotoGalleryError> {
        self.files
            .lock()
            .await
            .get(&(directory, path.to_string()))
            .cloned()
            .ok_or_else(|| PhotoGalleryError::NotFound(format!("File {} not found", path)))
    }

    async fn get_uri(&self, path: &str, directory: Directory) -> Result<String, PhotoGalleryError> {
        Ok(format!("memory://{}/{}", directory, path))
    }

    async fn delete_file(&self, path: &str, directory: Directory) -> Result<(), PhotoGalleryError> {
        self.files
            .lock()
            .await
            .remove(&(Some(directory), path.to_string()))
            .map(|_| ())
            .ok_or_else(|| PhotoGalleryError::NotFound(format!("File {} not found", path)))
    }
}

/// String preferences held in a map
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryPreferences {
    async fn set(&self, key: &str, value: &str) -> Result<(), PhotoGalleryError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, PhotoGalleryError> {
        Ok(self.values.lock().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_filesystem_scopes_by_directory() {
        let fs = MemoryFilesystem::new();
        fs.write_file("a.jpeg", "Zg==", Directory::Data).await.unwrap();

        assert_eq!(
            fs.read_file("a.jpeg", Some(Directory::Data)).await.unwrap(),
            "Zg=="
        );
        assert!(fs.read_file("a.jpeg", Some(Directory::Cache)).await.is_err());
        assert!(fs.read_file("a.jpeg", None).await.is_err());
        assert_eq!(
            fs.get_uri("a.jpeg", Directory::Data).await.unwrap(),
            "memory://data/a.jpeg"
        );

        fs.delete_file("a.jpeg", Directory::Data).await.unwrap();
        assert!(fs.is_empty().await);
        assert!(fs.delete_file("a.jpeg", Directory::Data).await.is_err());
    }

    #[tokio::test]
    async fn test_memory_preferences() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.get("photos").await.unwrap(), None);
        prefs.set("photos", "[]").await.unwrap();
        assert_eq!(prefs.get("photos").await.unwrap().as_deref(), Some("[]"));
    }
}
