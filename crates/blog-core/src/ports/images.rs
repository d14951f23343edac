//! Image storage port.

use async_trait::async_trait;
use blog_shared::dto::ImageUpload;

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Unsupported image: {0}")]
    Unsupported(String),

    #[error("Image I/O failed: {0}")]
    Io(String),
}

/// Stores uploaded post images and hands back the path clients load them from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the upload under a fresh name and return its public path.
    async fn save(&self, upload: &ImageUpload) -> Result<String, ImageStoreError>;

    /// Remove a previously saved image. Missing files are not an error.
    async fn delete(&self, path: &str) -> Result<(), ImageStoreError>;
}
