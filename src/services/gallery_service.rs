use crate::error::AppError;
use photo_gallery::{
    app_data_dir, DevicePlatform, GalleryProviders, GalleryStore, HttpBlobFetcher,
    LocalFilesystem, NativeCamera, PhotoGalleryConfig, PhotoRecord, SqlitePreferences,
};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tokio::sync::{watch, Mutex};

const CONFIG_FILE: &str = "gallery.toml";
const PREFERENCES_DB: &str = "gallery.db";

// Global gallery store
static GALLERY: OnceLock<Arc<Mutex<GalleryStore>>> = OnceLock::new();

/// Read `gallery.toml` from the data directory, falling back to defaults
fn load_config(data_dir: &Path) -> Result<PhotoGalleryConfig, AppError> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        log::debug!("No {} found, using defaults", path.display());
        return Ok(PhotoGalleryConfig::default());
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(PhotoGalleryConfig::from_toml(&content)?)
}

fn build_store() -> Result<GalleryStore, AppError> {
    let data_dir = app_data_dir();
    let config = load_config(&data_dir)?;

    let providers = GalleryProviders {
        camera: Arc::new(NativeCamera::default()),
        filesystem: Arc::new(LocalFilesystem::new(&data_dir)),
        preferences: Arc::new(SqlitePreferences::open(data_dir.join(PREFERENCES_DB))?),
        platform: Arc::new(DevicePlatform::new(config.local_file_prefix.clone())),
        fetcher: Arc::new(HttpBlobFetcher::default()),
    };

    log::info!("Gallery storage at {}", data_dir.display());
    Ok(GalleryStore::new(config, providers))
}

/// Initialize the gallery store on first use
pub fn init_gallery() -> Result<Arc<Mutex<GalleryStore>>, AppError> {
    if let Some(store) = GALLERY.get() {
        return Ok(store.clone());
    }
    let store = Arc::new(Mutex::new(build_store()?));
    Ok(GALLERY.get_or_init(|| store).clone())
}

/// Load the saved gallery and return it
pub async fn load_gallery() -> Result<Vec<PhotoRecord>, AppError> {
    let store = init_gallery()?;
    let mut store = store.lock().await;
    store.load_saved().await?;
    Ok(store.photos().to_vec())
}

/// Capture a new photo and add it to the gallery
pub async fn take_photo() -> Result<PhotoRecord, AppError> {
    let store = init_gallery()?;
    let mut store = store.lock().await;
    Ok(store.add_new_to_gallery().await?)
}

/// Remove the photo stored at `file_path`
pub async fn delete_photo(file_path: &str) -> Result<(), AppError> {
    let store = init_gallery()?;
    let mut store = store.lock().await;
    store.delete_photo(file_path).await?;
    Ok(())
}

/// Receiver following every change of the gallery
pub async fn subscribe() -> Result<watch::Receiver<Vec<PhotoRecord>>, AppError> {
    let store = init_gallery()?;
    let store = store.lock().await;
    Ok(store.subscribe())
}
