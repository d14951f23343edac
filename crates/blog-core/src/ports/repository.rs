use async_trait::async_trait;

use crate::domain::{ApplicationUser, Post};
use crate::error::RepoError;

/// Persistence boundary for posts and their like relation.
///
/// Implementations make no identity or authorization decisions; callers are
/// expected to have checked both before mutating.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every stored post with its owner, comments and like count.
    async fn get_all_posts(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by id, loaded like [`PostRepository::get_all_posts`].
    async fn get_post_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Insert a post and return it as stored.
    ///
    /// Fails with [`RepoError::InvalidArgument`] for an unset post before the
    /// store is touched.
    async fn add_post(&self, post: Post) -> Result<Post, RepoError>;

    /// Replace the stored row that has the same id with `post`.
    async fn update_post(&self, post: Post) -> Result<Post, RepoError>;

    /// Remove a post together with its comments and likes.
    async fn delete_post(&self, post: &Post) -> Result<(), RepoError>;

    /// Ids of the posts `user_id` has liked.
    async fn get_liked_post_ids(&self, user_id: &str) -> Result<Vec<i32>, RepoError>;

    async fn has_liked(&self, user_id: &str, post_id: i32) -> Result<bool, RepoError>;

    async fn add_like(&self, user_id: &str, post_id: i32) -> Result<(), RepoError>;

    async fn remove_like(&self, user_id: &str, post_id: i32) -> Result<(), RepoError>;
}

/// Application users as far as posts need them: rows that posts, comments and
/// likes can point at.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Record `user` unless a user with the same id already exists.
    /// Existing rows are left untouched.
    async fn ensure_user(&self, user: &ApplicationUser) -> Result<(), RepoError>;
}
