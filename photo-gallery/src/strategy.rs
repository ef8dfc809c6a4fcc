//! Runtime-specific persistence
//!
//! The hybrid runtime reads the captured file natively and shows photos via
//! converted file URIs. The web runtime fetches the transient web URL, and on
//! reload rebuilds inline data URIs from the stored files.

use crate::data_url::{data_url_from_base64, data_url_payload, to_data_url};
use crate::models::{Directory, PhotoRecord, RawPhoto, RuntimeMode};
use crate::providers::{BlobFetcher, FilesystemProvider, Platform};
use crate::service::PhotoGalleryError;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PersistenceStrategy: Send + Sync {
    fn mode(&self) -> RuntimeMode;

    /// Base64 payload of a freshly captured photo
    async fn read_as_base64(&self, photo: &RawPhoto) -> Result<String, PhotoGalleryError>;

    /// Record for a photo already written under `filename`
    async fn locate(
        &self,
        filename: &str,
        photo: &RawPhoto,
    ) -> Result<PhotoRecord, PhotoGalleryError>;

    /// Form the list is persisted in
    fn encode_for_storage(&self, photos: &[PhotoRecord]) -> Vec<PhotoRecord>;

    /// Restore whatever was left out of the persisted form
    async fn rehydrate(&self, photos: &mut [PhotoRecord]);
}

/// Native container: filesystem reads and converted file URIs
pub struct HybridStrategy {
    filesystem: Arc<dyn FilesystemProvider>,
    platform: Arc<dyn Platform>,
    directory: Directory,
}

impl HybridStrategy {
    pub fn new(
        filesystem: Arc<dyn FilesystemProvider>,
        platform: Arc<dyn Platform>,
        directory: Directory,
    ) -> Self {
        Self {
            filesystem,
            platform,
            directory,
        }
    }
}

#[async_trait]
impl PersistenceStrategy for HybridStrategy {
    fn mode(&self) -> RuntimeMode {
        RuntimeMode::Hybrid
    }

    async fn read_as_base64(&self, photo: &RawPhoto) -> Result<String, PhotoGalleryError> {
        let path = photo.path.as_deref().ok_or_else(|| {
            PhotoGalleryError::MissingPath("captured photo has no native path".to_string())
        })?;
        self.filesystem.read_file(path, None).await
    }

    async fn locate(
        &self,
        filename: &str,
        _photo: &RawPhoto,
    ) -> Result<PhotoRecord, PhotoGalleryError> {
        let uri = self.filesystem.get_uri(filename, self.directory).await?;
        let web_view_path = self.platform.to_displayable_uri(&uri);
        Ok(PhotoRecord::new(uri, web_view_path))
    }

    fn encode_for_storage(&self, photos: &[PhotoRecord]) -> Vec<PhotoRecord> {
        photos.to_vec()
    }

    async fn rehydrate(&self, _photos: &mut [PhotoRecord]) {}
}

/// Plain browser: blob fetches and inline data URIs
pub struct WebStrategy {
    filesystem: Arc<dyn FilesystemProvider>,
    fetcher: Arc<dyn BlobFetcher>,
    directory: Directory,
    mime_type: String,
}

impl WebStrategy {
    pub fn new(
        filesystem: Arc<dyn FilesystemProvider>,
        fetcher: Arc<dyn BlobFetcher>,
        directory: Directory,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            filesystem,
            fetcher,
            directory,
            mime_type: mime_type.into(),
        }
    }
}

#[async_trait]
impl PersistenceStrategy for WebStrategy {
    fn mode(&self) -> RuntimeMode {
        RuntimeMode::Web
    }

    async fn read_as_base64(&self, photo: &RawPhoto) -> Result<String, PhotoGalleryError> {
        let web_path = photo.web_path.as_deref().ok_or_else(|| {
            PhotoGalleryError::MissingPath("captured photo has no web path".to_string())
        })?;
        let blob = self.fetcher.fetch_blob(web_path).await?;
        let data_url = to_data_url(&self.mime_type, &blob);
        Ok(data_url_payload(&data_url).to_string())
    }

    async fn locate(
        &self,
        filename: &str,
        photo: &RawPhoto,
    ) -> Result<PhotoRecord, PhotoGalleryError> {
        // Already in memory, no need to resolve the written file
        let web_path = photo.web_path.as_deref().ok_or_else(|| {
            PhotoGalleryError::MissingPath("captured photo has no web path".to_string())
        })?;
        Ok(PhotoRecord::new(filename, web_path))
    }

    fn encode_for_storage(&self, photos: &[PhotoRecord]) -> Vec<PhotoRecord> {
        photos.iter().map(PhotoRecord::without_display_data).collect()
    }

    async fn rehydrate(&self, photos: &mut [PhotoRecord]) {
        for photo in photos.iter_mut() {
            match self
                .filesystem
                .read_file(&photo.file_path, Some(self.directory))
                .await
            {
                Ok(data) => {
                    photo.display_data = Some(data_url_from_base64(&self.mime_type, &data));
                }
                Err(e) => {
                    log::warn!("Could not reload {}: {}", photo.file_path, e);
                    photo.display_data = None;
                }
            }
        }
    }
}

/// Pick the strategy for the runtime reported by `platform`
pub fn select_strategy(
    platform: Arc<dyn Platform>,
    filesystem: Arc<dyn FilesystemProvider>,
    fetcher: Arc<dyn BlobFetcher>,
    directory: Directory,
    mime_type: &str,
) -> Box<dyn PersistenceStrategy> {
    if platform.is_hybrid_runtime() {
        Box::new(HybridStrategy::new(filesystem, platform, directory))
    } else {
        Box::new(WebStrategy::new(filesystem, fetcher, directory, mime_type))
    }
}
