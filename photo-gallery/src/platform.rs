use crate::config::DEFAULT_LOCAL_FILE_PREFIX;
use crate::providers::Platform;

/// Platform answers derived from the compilation target
#[derive(Debug, Clone)]
pub struct DevicePlatform {
    local_file_prefix: String,
}

impl DevicePlatform {
    pub fn new(local_file_prefix: impl Into<String>) -> Self {
        Self {
            local_file_prefix: local_file_prefix.into(),
        }
    }
}

impl Default for DevicePlatform {
    fn default() -> Self {
        Self::new(DEFAULT_LOCAL_FILE_PREFIX)
    }
}

impl Platform for DevicePlatform {
    fn is_hybrid_runtime(&self) -> bool {
        cfg!(not(target_arch = "wasm32"))
    }

    fn to_displayable_uri(&self, native_uri: &str) -> String {
        match native_uri.strip_prefix("file://") {
            Some(path) => format!("{}{}", self.local_file_prefix.trim_end_matches('/'), path),
            None => native_uri.to_string(),
        }
    }
}
