//! Native filesystem provider
//!
//! Files are stored as raw bytes under one root per [`Directory`]; the
//! provider contract speaks base64 on both ends.

use crate::data_url::data_url_payload;
use crate::models::Directory;
use crate::providers::FilesystemProvider;
use crate::service::PhotoGalleryError;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::path::{Component, Path, PathBuf};

#[cfg(target_os = "android")]
fn android_files_dir() -> Option<PathBuf> {
    use jni::{
        objects::{JObject, JString},
        JavaVM,
    };
    unsafe {
        let ctx = ndk_context::android_context();
        let vm = JavaVM::from_raw(ctx.vm().cast()).ok()?;
        let mut env = vm.attach_current_thread().ok()?;
        let activity = JObject::from_raw(ctx.context().cast());
        let files_dir = env
            .call_method(activity, "getFilesDir", "()Ljava/io/File;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_obj = env
            .call_method(files_dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_jstring: JString = JString::from(abs_path_obj);
        let abs_path: String = env.get_string(&abs_path_jstring).ok()?.into();
        Some(PathBuf::from(abs_path))
    }
}

/// Get the app data directory for the current platform
pub fn app_data_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        if let Some(dir) = android_files_dir() {
            return dir;
        }
        PathBuf::from("./data")
    }

    #[cfg(not(target_os = "android"))]
    {
        PathBuf::from("./data")
    }
}

/// [`FilesystemProvider`] over `std::fs`
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    data: PathBuf,
    documents: PathBuf,
    cache: PathBuf,
}

impl LocalFilesystem {
    /// All directories below `base` (`base/photos`, `base/documents`, `base/cache`)
    pub fn new(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            data: base.join("photos"),
            documents: base.join("documents"),
            cache: base.join("cache"),
        }
    }

    pub fn root(&self, directory: Directory) -> &Path {
        match directory {
            Directory::Data => &self.data,
            Directory::Documents => &self.documents,
            Directory::Cache => &self.cache,
        }
    }

    /// Resolve a relative path below a root, refusing to escape it
    fn resolve(&self, path: &str, directory: Directory) -> Result<PathBuf, PhotoGalleryError> {
        let relative = Path::new(path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(PhotoGalleryError::Filesystem(format!(
                "Path {} leaves the {} directory",
                path, directory
            )));
        }
        Ok(self.root(directory).join(relative))
    }

    fn locate(&self, path: &str, directory: Option<Directory>) -> Result<PathBuf, PhotoGalleryError> {
        match directory {
            Some(dir) => self.resolve(path, dir),
            None => Ok(PathBuf::from(path.strip_prefix("file://").unwrap_or(path))),
        }
    }
}

async fn blocking<T, F>(f: F) -> Result<T, PhotoGalleryError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PhotoGalleryError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PhotoGalleryError::Other(format!("Task join error: {}", e)))?
}

#[async_trait]
impl FilesystemProvider for LocalFilesystem {
    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<(), PhotoGalleryError> {
        let target = self.resolve(path, directory)?;
        let bytes = general_purpose::STANDARD
            .decode(data_url_payload(data))
            .map_err(|e| PhotoGalleryError::Filesystem(format!("Invalid base64 data: {}", e)))?;

        blocking(move || {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, bytes)?;
            log::debug!("Wrote {:?}", target);
            Ok(())
        })
        .await
    }

    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<String, PhotoGalleryError> {
        let source = self.locate(path, directory)?;
        let bytes = blocking(move || Ok(fs::read(&source)?)).await?;
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    async fn get_uri(&self, path: &str, directory: Directory) -> Result<String, PhotoGalleryError> {
        let target = self.resolve(path, directory)?;
        let absolute = std::path::absolute(&target)?;
        Ok(format!("file://{}", absolute.to_string_lossy()))
    }

    async fn delete_file(&self, path: &str, directory: Directory) -> Result<(), PhotoGalleryError> {
        let target = self.resolve(path, directory)?;
        blocking(move || Ok(fs::remove_file(&target)?)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read_uri_delete() {
        let dir = tempfile::tempdir().unwrap();
        let fs_provider = LocalFilesystem::new(dir.path());

        fs_provider
            .write_file("1.jpeg", "Zg==", Directory::Data)
            .await
            .unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("photos/1.jpeg")).unwrap(),
            b"f"
        );

        let data = fs_provider
            .read_file("1.jpeg", Some(Directory::Data))
            .await
            .unwrap();
        assert_eq!(data, "Zg==");

        let uri = fs_provider.get_uri("1.jpeg", Directory::Data).await.unwrap();
        assert!(uri.starts_with("file:///"));
        assert!(uri.ends_with("/photos/1.jpeg"));

        // absolute reads accept the file URI as well
        assert_eq!(fs_provider.read_file(&uri, None).await.unwrap(), "Zg==");

        fs_provider
            .delete_file("1.jpeg", Directory::Data)
            .await
            .unwrap();
        assert!(fs_provider
            .read_file("1.jpeg", Some(Directory::Data))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_write_accepts_data_urls() {
        let dir = tempfile::tempdir().unwrap();
        let fs_provider = LocalFilesystem::new(dir.path());
        fs_provider
            .write_file("a.jpeg", "data:image/jpeg;base64,Zg==", Directory::Cache)
            .await
            .unwrap();
        assert_eq!(std::fs::read(dir.path().join("cache/a.jpeg")).unwrap(), b"f");
    }

    #[tokio::test]
    async fn test_rejects_invalid_base64_and_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let fs_provider = LocalFilesystem::new(dir.path());
        assert!(matches!(
            fs_provider.write_file("a.jpeg", "%%%", Directory::Data).await,
            Err(PhotoGalleryError::Filesystem(_))
        ));
        assert!(matches!(
            fs_provider
                .write_file("../escape.jpeg", "Zg==", Directory::Data)
                .await,
            Err(PhotoGalleryError::Filesystem(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs_provider = LocalFilesystem::new(dir.path());
        assert!(matches!(
            fs_provider.read_file("nope.jpeg", Some(Directory::Data)).await,
            Err(PhotoGalleryError::IoError(_))
        ));
    }
}
