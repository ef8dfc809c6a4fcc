// Platform-specific camera implementation
//
// On Android the capture is delegated to MainActivity through JNI and the
// result is polled until the activity reports a path or an error. On other
// platforms the native camera is not available.

use crate::models::{CameraOptions, CameraResultType, CameraSource, RawPhoto};
use crate::providers::CameraProvider;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    PermissionDenied(String),
    Timeout(String),
    Cancelled(String),
    PlatformNotSupported(String),
    Other(String),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PickerError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            PickerError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            PickerError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            PickerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

const DEFAULT_MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

/// 600 polls of 100ms
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
const POLL_ATTEMPTS: usize = 600;

/// Configuration for the camera on Android
///
/// This allows customization of the MainActivity class name for different apps.
#[derive(Debug, Clone)]
pub struct AndroidPickerConfig {
    /// Fully qualified class name in slash format (e.g., "com/example/myapp/MainActivity")
    pub main_activity_class: String,
}

impl Default for AndroidPickerConfig {
    fn default() -> Self {
        Self {
            main_activity_class: DEFAULT_MAIN_ACTIVITY_CLASS.to_string(),
        }
    }
}

/// Camera backed by the host activity
#[derive(Debug, Clone, Default)]
pub struct NativeCamera {
    config: AndroidPickerConfig,
}

impl NativeCamera {
    pub fn new(config: AndroidPickerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CameraProvider for NativeCamera {
    async fn get_photo(&self, options: &CameraOptions) -> Result<RawPhoto, PickerError> {
        if options.result_type != CameraResultType::Uri {
            return Err(PickerError::Other(format!(
                "Unsupported result type {:?}",
                options.result_type
            )));
        }
        log::debug!(
            "Requesting photo from {:?} at quality {}",
            options.source,
            options.quality
        );

        let config = self.config.clone();
        let source = options.source;
        let path = tokio::task::spawn_blocking(move || match source {
            CameraSource::Photos => pick_image_with_config(&config),
            CameraSource::Camera | CameraSource::Prompt => capture_photo_with_config(&config),
        })
        .await
        .map_err(|e| PickerError::Other(format!("Task join error: {}", e)))??;

        Ok(raw_photo_from_path(&path))
    }
}

/// Wrap a captured file path into a raw photo handle
pub fn raw_photo_from_path(path: &Path) -> RawPhoto {
    RawPhoto {
        path: Some(path.to_string_lossy().to_string()),
        web_path: None,
    }
}

#[cfg(target_os = "android")]
mod android {
    use super::{AndroidPickerConfig, PickerError, POLL_ATTEMPTS};
    use jni::objects::{JClass, JObject, JString, JValue};
    use jni::JNIEnv;
    use ndk_context::android_context;
    use std::path::PathBuf;

    fn jni_err(what: &str) -> impl Fn(jni::errors::Error) -> PickerError + '_ {
        move |e| PickerError::PermissionDenied(format!("{} failed: {}", what, e))
    }

    fn app_class_loader<'a>(env: &mut JNIEnv<'a>) -> Result<JObject<'a>, PickerError> {
        let at_cls = env
            .find_class("android/app/ActivityThread")
            .map_err(jni_err("find ActivityThread"))?;
        let at = env
            .call_static_method(
                &at_cls,
                "currentActivityThread",
                "()Landroid/app/ActivityThread;",
                &[],
            )
            .map_err(jni_err("currentActivityThread"))?
            .l()
            .map_err(jni_err("currentActivityThread result"))?;
        let app = env
            .call_method(&at, "getApplication", "()Landroid/app/Application;", &[])
            .map_err(jni_err("getApplication"))?
            .l()
            .map_err(jni_err("getApplication result"))?;
        if app.is_null() {
            return Err(PickerError::PermissionDenied(
                "Application not initialized".to_string(),
            ));
        }
        env.call_method(&app, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
            .map_err(jni_err("getClassLoader"))?
            .l()
            .map_err(jni_err("getClassLoader result"))
    }

    fn activity_instance<'a>(
        env: &mut JNIEnv<'a>,
        config: &AndroidPickerConfig,
    ) -> Result<(JObject<'a>, JClass<'a>), PickerError> {
        let loader = app_class_loader(env)?;
        let name: JString = env
            .new_string(config.main_activity_class.replace('/', "."))
            .map_err(jni_err("new_string"))?;
        let cls_obj = env
            .call_method(
                &loader,
                "loadClass",
                "(Ljava/lang/String;)Ljava/lang/Class;",
                &[JValue::Object(&JObject::from(name))],
            )
            .map_err(jni_err("ClassLoader.loadClass"))?
            .l()
            .map_err(jni_err("loadClass result"))?;
        let cls = JClass::from(cls_obj);

        let signature = format!("()L{};", config.main_activity_class);
        let instance = match env.call_static_method(&cls, "getInstance", &signature, &[]) {
            Ok(val) => val.l().map_err(jni_err("getInstance result"))?,
            Err(_) => {
                if env.exception_check().unwrap_or(false) {
                    let _ = env.exception_clear();
                }
                let comp_signature = format!("L{}$Companion;", config.main_activity_class);
                let companion = env
                    .get_static_field(&cls, "Companion", &comp_signature)
                    .map_err(jni_err("Companion field"))?
                    .l()
                    .map_err(jni_err("Companion value"))?;
                if companion.is_null() {
                    return Err(PickerError::PermissionDenied(
                        "MainActivity.Companion is null, activity not initialized?".to_string(),
                    ));
                }
                env.call_method(&companion, "getInstance", &signature, &[])
                    .map_err(jni_err("Companion.getInstance"))?
                    .l()
                    .map_err(jni_err("Companion.getInstance result"))?
            }
        };

        if instance.is_null() {
            return Err(PickerError::PermissionDenied(
                "MainActivity instance is null, activity not initialized?".to_string(),
            ));
        }
        Ok((instance, cls))
    }

    fn poll_string(
        env: &mut JNIEnv,
        cls: &JClass,
        getter: &str,
    ) -> Result<Option<String>, PickerError> {
        let Ok(result) = env.call_static_method(cls, getter, "()Ljava/lang/String;", &[]) else {
            return Ok(None);
        };
        let Ok(obj) = result.l() else {
            return Ok(None);
        };
        if obj.is_null() {
            return Ok(None);
        }
        let value: String = env
            .get_string((&obj).into())
            .map_err(jni_err("String conversion"))?
            .into();
        Ok(Some(value))
    }

    /// Invoke `launcher` on the activity and wait for a photo path
    pub fn launch_and_wait(
        config: &AndroidPickerConfig,
        launcher: &str,
    ) -> Result<PathBuf, PickerError> {
        let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
        let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(jni_err("JavaVM"))?;
        let mut env = vm.attach_current_thread().map_err(jni_err("JNI attach"))?;

        let (activity, main_cls) = activity_instance(&mut env, config)?;

        env.call_static_method(&main_cls, "clearLastError", "()V", &[])
            .map_err(jni_err("clearLastError"))?;
        env.call_method(&activity, launcher, "()V", &[])
            .map_err(jni_err(launcher))?;

        for _ in 0..POLL_ATTEMPTS {
            std::thread::sleep(std::time::Duration::from_millis(100));

            if let Some(path) = poll_string(&mut env, &main_cls, "getLastPhotoPath")? {
                return Ok(PathBuf::from(path));
            }
            if let Some(err) = poll_string(&mut env, &main_cls, "getLastError")? {
                if err.to_ascii_lowercase().contains("cancel") {
                    return Err(PickerError::Cancelled(err));
                }
                return Err(PickerError::PermissionDenied(err));
            }
        }

        Err(PickerError::Timeout(format!(
            "{} timeout - no photo taken",
            launcher
        )))
    }
}

/// Capture a photo using the camera
///
/// On Android, this launches the camera app and waits up to 60 seconds for
/// the user to take a photo. Returns the absolute path to the captured image.
#[cfg(target_os = "android")]
pub fn capture_photo_with_config(config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    android::launch_and_wait(config, "launchCamera")
}

/// Pick a single image from the device gallery
#[cfg(target_os = "android")]
pub fn pick_image_with_config(config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    android::launch_and_wait(config, "launchImagePicker")
}

#[cfg(not(target_os = "android"))]
pub fn capture_photo_with_config(_config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Camera not available on this platform".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn pick_image_with_config(_config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Image picker not available on this platform".to_string(),
    ))
}
