//! # Photo Gallery
//!
//! A reusable photo gallery library: capture a photo with the device camera,
//! persist it to device storage and reload the saved gallery on the next start.
//!
//! This crate provides:
//! - [`GalleryStore`], the newest-first photo list with capture, reload and delete
//! - Two persistence strategies, one for hybrid (native container) and one for
//!   plain web runtimes, chosen once when the store is built
//! - Provider traits for camera, filesystem, preferences and blob fetching,
//!   with native, SQLite and in-memory implementations
//!
//! ## Platform Separation
//!
//! Platform-specific code (Android JNI camera, app data directory) lives in
//! [`picker`] and [`filesystem`]; everything else is cross-platform.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_gallery::{GalleryProviders, GalleryStore, PhotoGalleryConfig};
//!
//! let mut store = GalleryStore::new(PhotoGalleryConfig::default(), providers);
//! store.load_saved().await?;
//! store.add_new_to_gallery().await?;
//! ```

pub mod config;
pub mod data_url;
pub mod fetch;
pub mod filesystem;
pub mod memory;
pub mod models;
pub mod picker;
pub mod platform;
pub mod preferences;
pub mod providers;
pub mod service;
pub mod strategy;

#[cfg(feature = "components")]
pub mod components;

pub use config::PhotoGalleryConfig;
pub use fetch::HttpBlobFetcher;
pub use filesystem::{app_data_dir, LocalFilesystem};
pub use memory::{MemoryFilesystem, MemoryPreferences};
pub use models::{
    CameraOptions, CameraResultType, CameraSource, Directory, PhotoRecord, RawPhoto, RuntimeMode,
};
pub use platform::DevicePlatform;
pub use preferences::{init_preferences_schema, SqlitePreferences};
pub use providers::{BlobFetcher, CameraProvider, FilesystemProvider, KeyValueStore, Platform};
pub use service::{GalleryProviders, GalleryStore, PhotoGalleryError};
pub use strategy::{select_strategy, HybridStrategy, PersistenceStrategy, WebStrategy};

#[cfg(feature = "components")]
pub use components::{PhotoGrid, PhotoTile};

pub use picker::{AndroidPickerConfig, NativeCamera, PickerError};
