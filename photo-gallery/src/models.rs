use serde::{Deserialize, Serialize};

/// One entry of the gallery
///
/// `display_data` only ever holds an inline data URI rebuilt on the web
/// runtime; it is dropped before the list is persisted there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub file_path: String,
    pub web_view_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_data: Option<String>,
}

impl PhotoRecord {
    pub fn new(file_path: impl Into<String>, web_view_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            web_view_path: web_view_path.into(),
            display_data: None,
        }
    }

    /// Source the UI should render: inline data first, then the web path
    pub fn display_src(&self) -> &str {
        self.display_data.as_deref().unwrap_or(&self.web_view_path)
    }

    /// Last path segment of `file_path`, i.e. the name the file was written under
    pub fn file_name(&self) -> &str {
        self.file_path
            .rsplit('/')
            .next()
            .unwrap_or(self.file_path.as_str())
    }

    /// Copy of the record without the inline display data
    pub fn without_display_data(&self) -> Self {
        Self {
            display_data: None,
            ..self.clone()
        }
    }
}

/// How the camera should hand back the captured image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraResultType {
    Uri,
    Base64,
    DataUrl,
}

/// Where the camera takes the image from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSource {
    Prompt,
    Camera,
    Photos,
}

/// Options passed to a [`crate::CameraProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraOptions {
    pub result_type: CameraResultType,
    pub source: CameraSource,
    /// JPEG quality, 0..=100
    pub quality: u8,
}

impl CameraOptions {
    /// URI result straight from the device camera
    pub fn uri_from_camera(quality: u8) -> Self {
        Self {
            result_type: CameraResultType::Uri,
            source: CameraSource::Camera,
            quality: quality.min(100),
        }
    }
}

/// Handle returned by the camera before the photo is persisted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawPhoto {
    /// Native temporary file path (hybrid runtime)
    pub path: Option<String>,
    /// Transient web URL (web runtime)
    pub web_path: Option<String>,
}

/// Logical storage roots of a [`crate::FilesystemProvider`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Directory {
    #[default]
    Data,
    Documents,
    Cache,
}

impl Directory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Directory::Data => "data",
            Directory::Documents => "documents",
            Directory::Cache => "cache",
        }
    }
}

impl std::fmt::Display for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime the gallery was constructed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    /// Native container with filesystem and camera plugins
    Hybrid,
    /// Plain browser
    Web,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_without_display_data() {
        let record = PhotoRecord::new("1700000000000.jpeg", "blob:abc");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"filePath":"1700000000000.jpeg","webViewPath":"blob:abc"}"#
        );
    }

    #[test]
    fn test_deserializes_with_and_without_display_data() {
        let parsed: Vec<PhotoRecord> = serde_json::from_str(
            r#"[{"filePath":"a","webViewPath":"b","displayData":"data:x"},{"filePath":"c","webViewPath":"d"}]"#,
        )
        .unwrap();
        assert_eq!(parsed[0].display_data.as_deref(), Some("data:x"));
        assert_eq!(parsed[1].display_data, None);
    }

    #[test]
    fn test_file_name_takes_last_segment() {
        let record = PhotoRecord::new("file:///data/T.jpeg", "x");
        assert_eq!(record.file_name(), "T.jpeg");
        let record = PhotoRecord::new("T.jpeg", "x");
        assert_eq!(record.file_name(), "T.jpeg");
    }

    #[test]
    fn test_display_src_prefers_inline_data() {
        let mut record = PhotoRecord::new("T.jpeg", "blob:abc");
        assert_eq!(record.display_src(), "blob:abc");
        record.display_data = Some("data:image/jpeg;base64,Zg==".to_string());
        assert_eq!(record.display_src(), "data:image/jpeg;base64,Zg==");
    }

    #[test]
    fn test_camera_quality_is_clamped() {
        assert_eq!(CameraOptions::uri_from_camera(250).quality, 100);
    }
}
