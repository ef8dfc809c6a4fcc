//! Capability providers the gallery is built on
//!
//! The gallery never touches the camera, the filesystem or the preference
//! storage directly. Each capability sits behind one of these traits so the
//! host (Android container, desktop web view, browser) can supply its own.

use crate::models::{CameraOptions, Directory, RawPhoto};
use crate::picker::PickerError;
use crate::service::PhotoGalleryError;
use async_trait::async_trait;

/// Device camera
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Capture a photo; fails on permission denial or user cancellation
    async fn get_photo(&self, options: &CameraOptions) -> Result<RawPhoto, PickerError>;
}

/// File persistence with base64 payloads
#[async_trait]
pub trait FilesystemProvider: Send + Sync {
    /// Write base64 `data` to `path` inside `directory`
    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<(), PhotoGalleryError>;

    /// Read `path` as base64. Without a directory the path is taken as-is.
    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<String, PhotoGalleryError>;

    /// Full URI of `path` inside `directory`
    async fn get_uri(&self, path: &str, directory: Directory) -> Result<String, PhotoGalleryError>;

    async fn delete_file(&self, path: &str, directory: Directory) -> Result<(), PhotoGalleryError>;
}

/// String key-value preferences
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<(), PhotoGalleryError>;

    async fn get(&self, key: &str) -> Result<Option<String>, PhotoGalleryError>;
}

/// Loads the bytes behind a transient web URL
#[async_trait]
pub trait BlobFetcher: Send + Sync {
    async fn fetch_blob(&self, url: &str) -> Result<Vec<u8>, PhotoGalleryError>;
}

/// Runtime queries answered synchronously by the host
pub trait Platform: Send + Sync {
    /// True inside a native container, false in a plain browser
    fn is_hybrid_runtime(&self) -> bool;

    /// Translate a native file URI into one the web view can load
    fn to_displayable_uri(&self, native_uri: &str) -> String;
}
