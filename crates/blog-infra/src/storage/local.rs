//! Filesystem image store - files under a root directory served from a public prefix.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use blog_core::ports::{ImageStore, ImageStoreError};
use blog_shared::dto::ImageUpload;

/// Writes each upload to `<root>/<uuid>.<ext>` and reports it as
/// `<public_prefix>/<uuid>.<ext>`.
pub struct LocalImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let public_prefix = public_prefix.into().trim_end_matches('/').to_string();
        Self {
            root: root.into(),
            public_prefix,
        }
    }

    /// Map a public path back to a file name inside the root.
    fn file_name<'a>(&self, path: &'a str) -> Option<&'a str> {
        let name = path
            .strip_prefix(self.public_prefix.as_str())?
            .strip_prefix('/')?;
        let safe = !name.is_empty()
            && !name.contains('/')
            && !name.contains('\\')
            && !name.contains("..");
        safe.then_some(name)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<String, ImageStoreError> {
        let ext = upload.extension().ok_or_else(|| {
            ImageStoreError::Unsupported(format!("'{}' has no extension", upload.file_name))
        })?;
        let name = format!("{}.{}", Uuid::new_v4(), ext);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ImageStoreError::Io(e.to_string()))?;
        tokio::fs::write(self.root.join(&name), &upload.data)
            .await
            .map_err(|e| ImageStoreError::Io(e.to_string()))?;

        tracing::debug!(file = %name, bytes = upload.data.len(), "Image saved");
        Ok(format!("{}/{}", self.public_prefix, name))
    }

    async fn delete(&self, path: &str) -> Result<(), ImageStoreError> {
        let name = self
            .file_name(path)
            .ok_or_else(|| ImageStoreError::Unsupported(format!("'{path}' is not a stored image")))?;

        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ImageStoreError::Io(e.to_string())),
        }
    }
}
