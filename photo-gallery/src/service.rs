use crate::config::PhotoGalleryConfig;
use crate::models::{CameraOptions, PhotoRecord, RawPhoto, RuntimeMode};
use crate::picker::PickerError;
use crate::providers::{BlobFetcher, CameraProvider, FilesystemProvider, KeyValueStore, Platform};
use crate::strategy::{select_strategy, PersistenceStrategy};
use std::sync::Arc;
use tokio::sync::watch;

/// Error type for photo gallery operations
#[derive(Debug)]
pub enum PhotoGalleryError {
    Camera(PickerError),
    DatabaseError(rusqlite::Error),
    IoError(std::io::Error),
    Filesystem(String),
    Serialization(serde_json::Error),
    Fetch(String),
    MissingPath(String),
    Config(String),
    NotFound(String),
    Other(String),
}

impl std::fmt::Display for PhotoGalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoGalleryError::Camera(e) => write!(f, "Camera error: {}", e),
            PhotoGalleryError::DatabaseError(e) => write!(f, "Database error: {}", e),
            PhotoGalleryError::IoError(e) => write!(f, "IO error: {}", e),
            PhotoGalleryError::Filesystem(msg) => write!(f, "Filesystem error: {}", msg),
            PhotoGalleryError::Serialization(e) => write!(f, "Serialization error: {}", e),
            PhotoGalleryError::Fetch(msg) => write!(f, "Fetch error: {}", msg),
            PhotoGalleryError::MissingPath(msg) => write!(f, "Missing path: {}", msg),
            PhotoGalleryError::Config(msg) => write!(f, "Config error: {}", msg),
            PhotoGalleryError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PhotoGalleryError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PhotoGalleryError {}

impl From<PickerError> for PhotoGalleryError {
    fn from(err: PickerError) -> Self {
        PhotoGalleryError::Camera(err)
    }
}

impl From<rusqlite::Error> for PhotoGalleryError {
    fn from(err: rusqlite::Error) -> Self {
        PhotoGalleryError::DatabaseError(err)
    }
}

impl From<std::io::Error> for PhotoGalleryError {
    fn from(err: std::io::Error) -> Self {
        PhotoGalleryError::IoError(err)
    }
}

impl From<serde_json::Error> for PhotoGalleryError {
    fn from(err: serde_json::Error) -> Self {
        PhotoGalleryError::Serialization(err)
    }
}

/// Capabilities the host hands to the gallery
#[derive(Clone)]
pub struct GalleryProviders {
    pub camera: Arc<dyn CameraProvider>,
    pub filesystem: Arc<dyn FilesystemProvider>,
    pub preferences: Arc<dyn KeyValueStore>,
    pub platform: Arc<dyn Platform>,
    pub fetcher: Arc<dyn BlobFetcher>,
}

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Ordered photo list (newest first) with capture, persistence and reload
///
/// The runtime mode is decided once, when the store is built. Readers get a
/// slice via [`GalleryStore::photos`] or follow changes through
/// [`GalleryStore::subscribe`]; only the store itself mutates the list.
pub struct GalleryStore {
    config: PhotoGalleryConfig,
    camera: Arc<dyn CameraProvider>,
    filesystem: Arc<dyn FilesystemProvider>,
    preferences: Arc<dyn KeyValueStore>,
    strategy: Box<dyn PersistenceStrategy>,
    clock: Clock,
    photos: Vec<PhotoRecord>,
    changes: watch::Sender<Vec<PhotoRecord>>,
}

impl GalleryStore {
    pub fn new(config: PhotoGalleryConfig, providers: GalleryProviders) -> Self {
        let strategy = select_strategy(
            providers.platform,
            providers.filesystem.clone(),
            providers.fetcher,
            config.directory,
            config.mime_type(),
        );
        log::debug!("Gallery running in {:?} mode", strategy.mode());

        let (changes, _) = watch::channel(Vec::new());
        Self {
            config,
            camera: providers.camera,
            filesystem: providers.filesystem,
            preferences: providers.preferences,
            strategy,
            clock: Arc::new(|| chrono::Utc::now().timestamp_millis()),
            photos: Vec::new(),
            changes,
        }
    }

    /// Replace the millisecond clock used for filenames
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn mode(&self) -> RuntimeMode {
        self.strategy.mode()
    }

    /// Current gallery, newest first
    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    /// Receiver that sees every committed change of the list
    pub fn subscribe(&self) -> watch::Receiver<Vec<PhotoRecord>> {
        self.changes.subscribe()
    }

    /// Take a photo, persist it and prepend it to the gallery
    ///
    /// Nothing changes unless capture, file write and list write all succeed.
    pub async fn add_new_to_gallery(&mut self) -> Result<PhotoRecord, PhotoGalleryError> {
        let options = CameraOptions::uri_from_camera(self.config.quality);
        let captured = self.camera.get_photo(&options).await?;

        let record = self.save_picture(&captured).await?;

        let mut photos = Vec::with_capacity(self.photos.len() + 1);
        photos.push(record.clone());
        photos.extend(self.photos.iter().cloned());

        self.persist(&photos).await?;
        self.commit(photos);

        log::info!("Added {} to gallery", record.file_path);
        Ok(record)
    }

    /// Write a captured photo to storage and build its record
    async fn save_picture(&self, photo: &RawPhoto) -> Result<PhotoRecord, PhotoGalleryError> {
        let base64_data = self.strategy.read_as_base64(photo).await?;

        let file_name = self.config.photo_filename((self.clock)());
        log::debug!("Saving photo as {}", file_name);
        self.filesystem
            .write_file(&file_name, &base64_data, self.config.directory)
            .await?;

        self.strategy.locate(&file_name, photo).await
    }

    /// Restore the gallery saved by a previous session
    ///
    /// A missing or unparsable entry yields an empty gallery.
    pub async fn load_saved(&mut self) -> Result<(), PhotoGalleryError> {
        let stored = self.preferences.get(&self.config.storage_key).await?;

        let mut photos: Vec<PhotoRecord> = match stored {
            Some(value) => serde_json::from_str(&value).unwrap_or_else(|e| {
                log::warn!(
                    "Discarding unreadable gallery under {}: {}",
                    self.config.storage_key,
                    e
                );
                Vec::new()
            }),
            None => Vec::new(),
        };

        self.strategy.rehydrate(&mut photos).await;

        log::info!("Loaded {} saved photos", photos.len());
        self.commit(photos);
        Ok(())
    }

    /// Remove the photo stored at `file_path` from the gallery and from storage
    pub async fn delete_photo(&mut self, file_path: &str) -> Result<PhotoRecord, PhotoGalleryError> {
        let index = self
            .photos
            .iter()
            .position(|p| p.file_path == file_path)
            .ok_or_else(|| PhotoGalleryError::NotFound(format!("No photo {}", file_path)))?;

        let mut photos = self.photos.clone();
        let removed = photos.remove(index);
        self.persist(&photos).await?;

        if let Err(e) = self
            .filesystem
            .delete_file(removed.file_name(), self.config.directory)
            .await
        {
            log::warn!("Could not delete {}: {}", removed.file_path, e);
        }

        self.commit(photos);
        Ok(removed)
    }

    async fn persist(&self, photos: &[PhotoRecord]) -> Result<(), PhotoGalleryError> {
        let encoded = serde_json::to_string(&self.strategy.encode_for_storage(photos))?;
        self.preferences
            .set(&self.config.storage_key, &encoded)
            .await
    }

    fn commit(&mut self, photos: Vec<PhotoRecord>) {
        self.photos = photos;
        self.changes.send_replace(self.photos.clone());
    }
}
