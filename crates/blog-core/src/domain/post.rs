use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApplicationUser, Comment};

/// Post entity - a blog post owned by exactly one user.
///
/// `Post::default()` is an unset post: it has no owner and is rejected by the
/// repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Zero until the store assigns an id.
    pub id: i32,
    pub title: String,
    pub user_id: String,
    /// Owner, when loaded with the post.
    pub user: Option<ApplicationUser>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
    pub like_count: u64,
}

impl Post {
    /// Create a new, not yet stored post.
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            user_id: user_id.into(),
            user: None,
            image_path: None,
            created_at: Utc::now(),
            comments: Vec::new(),
            like_count: 0,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        !self.user_id.is_empty() && self.user_id == user_id
    }

    /// A post without an owner cannot be stored.
    pub fn is_unset(&self) -> bool {
        self.user_id.trim().is_empty()
    }
}
