use crate::data_url::mime_for_extension;
use crate::models::Directory;
use crate::service::PhotoGalleryError;
use serde::Deserialize;

/// Key the serialized gallery list is stored under
pub const DEFAULT_STORAGE_KEY: &str = "photos";

/// Prefix a native `file://` path is mounted under inside the web view
pub const DEFAULT_LOCAL_FILE_PREFIX: &str = "http://localhost/_capacitor_file_";

/// Configuration for photo gallery initialization
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhotoGalleryConfig {
    /// Key-value store key for the serialized list
    pub storage_key: String,
    /// Extension of generated photo filenames
    pub file_extension: String,
    /// Mime type used when rebuilding data URIs, guessed from
    /// `file_extension` when unset
    pub mime_type: Option<String>,
    /// Camera quality (0..=100)
    pub quality: u8,
    /// Directory photos are written to
    pub directory: Directory,
    /// Web view mount point for native files
    pub local_file_prefix: String,
}

impl Default for PhotoGalleryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            file_extension: "jpeg".to_string(),
            mime_type: None,
            quality: 100,
            directory: Directory::Data,
            local_file_prefix: DEFAULT_LOCAL_FILE_PREFIX.to_string(),
        }
    }
}

impl PhotoGalleryConfig {
    /// Parse a TOML document; missing keys fall back to the defaults
    pub fn from_toml(s: &str) -> Result<Self, PhotoGalleryError> {
        let mut config: Self =
            toml::from_str(s).map_err(|e| PhotoGalleryError::Config(e.to_string()))?;
        config.quality = config.quality.min(100);
        if config.storage_key.trim().is_empty() {
            return Err(PhotoGalleryError::Config(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn mime_type(&self) -> &str {
        match &self.mime_type {
            Some(mime) => mime,
            None => mime_for_extension(&self.file_extension),
        }
    }

    /// Filename for a photo captured at `millis` since the epoch
    pub fn photo_filename(&self, millis: i64) -> String {
        format!("{}.{}", millis, self.file_extension.trim_start_matches('.'))
    }
}
