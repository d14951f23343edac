//! Data Transfer Objects - request shapes and view models for posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An image attached to a create or update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    /// Original file name; only its extension is kept.
    pub file_name: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// Lower-cased extension of the original file name, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostCreateDto {
    pub title: String,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

/// Request to update a post. The title replaces the stored one; an image,
/// when present, replaces the stored image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdateDto {
    pub title: String,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

/// Public information about a post or comment author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: i32,
    pub content: String,
    pub author: UserSummary,
    pub created: DateTime<Utc>,
}

/// A post as presented to a particular caller.
///
/// `is_liked_by_user` and `can_edit` are computed per request and are always
/// `false` for anonymous callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: i32,
    pub title: String,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author: UserSummary,
    pub like_count: u64,
    pub is_liked_by_user: bool,
    pub can_edit: bool,
    pub comments: Vec<CommentView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            data: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(upload("Holiday.JPG").extension().as_deref(), Some("jpg"));
        assert_eq!(upload("archive.tar.gz").extension().as_deref(), Some("gz"));
    }

    #[test]
    fn test_extension_missing() {
        assert_eq!(upload("README").extension(), None);
        assert_eq!(upload(".png").extension(), None);
        assert_eq!(upload("trailing.").extension(), None);
    }

    #[test]
    fn test_create_dto_image_defaults_to_none() {
        let dto: PostCreateDto = serde_json::from_str(r#"{"title":"Hello"}"#).unwrap();
        assert_eq!(dto.title, "Hello");
        assert!(dto.image.is_none());
    }
}
