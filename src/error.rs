use photo_gallery::{PhotoGalleryError, PickerError};
use std::fmt;

/// Central error types for the gallery app
#[derive(Debug)]
pub enum AppError {
    /// Gallery storage error
    Gallery(PhotoGalleryError),
    /// Permission denied (e.g. camera)
    PermissionDenied(String),
    /// User backed out of the capture
    Cancelled,
    /// Invalid configuration file
    Config(String),
    /// Filesystem error
    Filesystem(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Gallery(e) => write!(f, "Gallery error: {}", e),
            AppError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            AppError::Cancelled => write!(f, "Capture cancelled"),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<PhotoGalleryError> for AppError {
    fn from(e: PhotoGalleryError) -> Self {
        match e {
            PhotoGalleryError::Camera(PickerError::Cancelled(_)) => AppError::Cancelled,
            PhotoGalleryError::Camera(
                PickerError::PermissionDenied(msg) | PickerError::PlatformNotSupported(msg),
            ) => AppError::PermissionDenied(msg),
            PhotoGalleryError::Config(msg) => AppError::Config(msg),
            PhotoGalleryError::IoError(e) => AppError::Filesystem(e),
            other => AppError::Gallery(other),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

/// User-friendly error messages for UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Gallery(_) => "The photo could not be saved. Please try again.".to_string(),
            AppError::PermissionDenied(msg) => format!("Camera not available: {}", msg),
            AppError::Cancelled => "No photo taken.".to_string(),
            AppError::Config(msg) => format!("Invalid gallery.toml: {}", msg),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
        }
    }
}
