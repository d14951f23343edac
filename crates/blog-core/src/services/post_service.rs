//! Post service - identity, authorization and validation in front of the repository.

use std::collections::HashSet;
use std::sync::Arc;

use blog_shared::dto::{
    CommentView, ImageUpload, PostCreateDto, PostUpdateDto, PostView, UserSummary,
};
use blog_shared::{FailureKind, ServiceResult};
use futures::future::join_all;

use crate::domain::{ApplicationUser, Comment, Post};
use crate::error::RepoError;
use crate::ports::{
    AuthorizationResult, AuthorizationService, ImageStore, PostRepository, Principal, policies,
};

pub const MAX_TITLE_LENGTH: usize = 200;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// User-facing messages carried by [`ServiceResult`].
pub mod messages {
    pub const LOGIN_TO_CREATE: &str = "You need to be logged in to create posts";
    pub const LOGIN_TO_UPDATE: &str = "You need to be logged in to update posts";
    pub const LOGIN_TO_DELETE: &str = "You need to be logged in to delete posts";
    pub const LOGIN_TO_LIKE: &str = "You need to be logged in to like posts";
    pub const POST_NOT_FOUND: &str = "Post does not exist";
    pub const NOT_AUTHORIZED_TO_UPDATE: &str = "You are not authorized to update this post";
    pub const NOT_AUTHORIZED_TO_DELETE: &str = "You are not authorized to delete this post";
    pub const TITLE_REQUIRED: &str = "Title is required";
    pub const TITLE_TOO_LONG: &str = "Title cannot exceed 200 characters";
    pub const UNSUPPORTED_IMAGE: &str = "Unsupported image format";
    pub const IMAGE_NOT_SAVED: &str = "Could not save the image";
    pub const POST_CREATED: &str = "Post created successfully";
    pub const POST_UPDATED: &str = "Post updated successfully";
    pub const POST_DELETED: &str = "Post deleted successfully";
    pub const POST_LIKED: &str = "Post liked";
    pub const POST_UNLIKED: &str = "Post unliked";
}

use messages::*;

/// Business operations on posts.
///
/// Every operation takes the caller explicitly. Reads accept anonymous callers;
/// mutations refuse them. Refusals come back as a failed [`ServiceResult`],
/// while store faults (including [`RepoError::InvalidArgument`]) are returned
/// as `Err`.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    authz: Arc<dyn AuthorizationService>,
    images: Arc<dyn ImageStore>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        authz: Arc<dyn AuthorizationService>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            posts,
            authz,
            images,
        }
    }

    /// All posts, personalised for the caller.
    ///
    /// The caller's liked ids are fetched once per call.
    pub async fn get_all_posts(
        &self,
        caller: Option<&Principal>,
    ) -> Result<Vec<PostView>, RepoError> {
        let posts = self.posts.get_all_posts().await?;
        let caller = authenticated(caller);

        let liked: HashSet<i32> = match caller {
            Some(principal) => self
                .posts
                .get_liked_post_ids(&principal.user_id)
                .await?
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };
        let editable = self.can_edit_each(caller, &posts).await;

        tracing::debug!(count = posts.len(), liked = liked.len(), "Loaded posts");

        Ok(posts
            .iter()
            .zip(editable)
            .map(|(post, can_edit)| to_view(post, liked.contains(&post.id), can_edit))
            .collect())
    }

    pub async fn get_post_by_id(
        &self,
        caller: Option<&Principal>,
        id: i32,
    ) -> Result<Option<PostView>, RepoError> {
        let Some(post) = self.posts.get_post_by_id(id).await? else {
            return Ok(None);
        };

        let (liked, can_edit) = match authenticated(caller) {
            Some(principal) => (
                self.posts.has_liked(&principal.user_id, post.id).await?,
                self.authz
                    .authorize(principal, &post, policies::CAN_EDIT)
                    .await
                    .succeeded(),
            ),
            None => (false, false),
        };

        Ok(Some(to_view(&post, liked, can_edit)))
    }

    pub async fn create_post(
        &self,
        caller: Option<&Principal>,
        dto: PostCreateDto,
    ) -> Result<ServiceResult, RepoError> {
        let Some(principal) = authenticated(caller) else {
            tracing::warn!("Anonymous caller tried to create a post");
            return Ok(ServiceResult::failure(
                FailureKind::NotAuthenticated,
                LOGIN_TO_CREATE,
            ));
        };

        let title = match validate_title(&dto.title) {
            Ok(title) => title,
            Err(refused) => return Ok(refused),
        };

        let mut post = Post::new(principal.user_id.clone(), title);
        if let Some(upload) = &dto.image {
            match self.store_image(upload).await {
                Ok(path) => post.image_path = Some(path),
                Err(refused) => return Ok(refused),
            }
        }

        let image_path = post.image_path.clone();
        let stored = match self.posts.add_post(post).await {
            Ok(stored) => stored,
            Err(e) => {
                if let Some(path) = &image_path {
                    self.discard_image(path).await;
                }
                return Err(e);
            }
        };

        tracing::info!(post_id = stored.id, user_id = %principal.user_id, "Post created");
        Ok(ServiceResult::success(POST_CREATED))
    }

    pub async fn update_post(
        &self,
        caller: Option<&Principal>,
        id: i32,
        dto: PostUpdateDto,
    ) -> Result<ServiceResult, RepoError> {
        let Some(principal) = authenticated(caller) else {
            return Ok(ServiceResult::failure(
                FailureKind::NotAuthenticated,
                LOGIN_TO_UPDATE,
            ));
        };

        let Some(mut post) = self.posts.get_post_by_id(id).await? else {
            return Ok(ServiceResult::failure(FailureKind::NotFound, POST_NOT_FOUND));
        };

        let decision = self.authz.authorize(principal, &post, policies::CAN_EDIT).await;
        if !decision.succeeded() {
            log_denied(principal, &post, &decision);
            return Ok(ServiceResult::failure(
                FailureKind::NotAuthorized,
                NOT_AUTHORIZED_TO_UPDATE,
            ));
        }

        let title = match validate_title(&dto.title) {
            Ok(title) => title,
            Err(refused) => return Ok(refused),
        };

        let mut replaced_image = None;
        if let Some(upload) = &dto.image {
            match self.store_image(upload).await {
                Ok(path) => replaced_image = post.image_path.replace(path),
                Err(refused) => return Ok(refused),
            }
        }
        post.title = title;

        let new_image = dto.image.as_ref().and(post.image_path.clone());
        if let Err(e) = self.posts.update_post(post).await {
            if let Some(path) = &new_image {
                self.discard_image(path).await;
            }
            return Err(e);
        }
        if let Some(old) = &replaced_image {
            self.discard_image(old).await;
        }

        tracing::info!(post_id = id, user_id = %principal.user_id, "Post updated");
        Ok(ServiceResult::success(POST_UPDATED))
    }

    pub async fn delete_post(
        &self,
        caller: Option<&Principal>,
        id: i32,
    ) -> Result<ServiceResult, RepoError> {
        let Some(principal) = authenticated(caller) else {
            return Ok(ServiceResult::failure(
                FailureKind::NotAuthenticated,
                LOGIN_TO_DELETE,
            ));
        };

        let Some(post) = self.posts.get_post_by_id(id).await? else {
            return Ok(ServiceResult::failure(FailureKind::NotFound, POST_NOT_FOUND));
        };

        let decision = self.authz.authorize(principal, &post, policies::CAN_EDIT).await;
        if !decision.succeeded() {
            log_denied(principal, &post, &decision);
            return Ok(ServiceResult::failure(
                FailureKind::NotAuthorized,
                NOT_AUTHORIZED_TO_DELETE,
            ));
        }

        self.posts.delete_post(&post).await?;
        if let Some(path) = &post.image_path {
            self.discard_image(path).await;
        }

        tracing::info!(post_id = id, user_id = %principal.user_id, "Post deleted");
        Ok(ServiceResult::success(POST_DELETED))
    }

    /// Like the post, or take the like back if the caller already liked it.
    pub async fn toggle_like(
        &self,
        caller: Option<&Principal>,
        id: i32,
    ) -> Result<ServiceResult, RepoError> {
        let Some(principal) = authenticated(caller) else {
            return Ok(ServiceResult::failure(
                FailureKind::NotAuthenticated,
                LOGIN_TO_LIKE,
            ));
        };

        if self.posts.get_post_by_id(id).await?.is_none() {
            return Ok(ServiceResult::failure(FailureKind::NotFound, POST_NOT_FOUND));
        }

        let user_id = principal.user_id.as_str();
        if self.posts.has_liked(user_id, id).await? {
            self.posts.remove_like(user_id, id).await?;
            tracing::debug!(post_id = id, %user_id, "Like removed");
            Ok(ServiceResult::success(POST_UNLIKED))
        } else {
            self.posts.add_like(user_id, id).await?;
            tracing::debug!(post_id = id, %user_id, "Like added");
            Ok(ServiceResult::success(POST_LIKED))
        }
    }

    async fn can_edit_each(&self, caller: Option<&Principal>, posts: &[Post]) -> Vec<bool> {
        let Some(principal) = caller else {
            return vec![false; posts.len()];
        };

        let checks = posts
            .iter()
            .map(|post| self.authz.authorize(principal, post, policies::CAN_EDIT));
        join_all(checks)
            .await
            .iter()
            .map(AuthorizationResult::succeeded)
            .collect()
    }

    async fn store_image(&self, upload: &ImageUpload) -> Result<String, ServiceResult> {
        let supported = upload
            .extension()
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()));
        if !supported || upload.data.is_empty() {
            return Err(ServiceResult::failure(FailureKind::Invalid, UNSUPPORTED_IMAGE));
        }

        self.images.save(upload).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to save post image");
            ServiceResult::failure(FailureKind::Internal, IMAGE_NOT_SAVED)
        })
    }

    async fn discard_image(&self, path: &str) {
        if let Err(e) = self.images.delete(path).await {
            tracing::warn!(%path, error = %e, "Failed to remove post image");
        }
    }
}

fn authenticated(caller: Option<&Principal>) -> Option<&Principal> {
    caller.filter(|principal| principal.is_authenticated())
}

fn validate_title(title: &str) -> Result<String, ServiceResult> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ServiceResult::failure(FailureKind::Invalid, TITLE_REQUIRED));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ServiceResult::failure(FailureKind::Invalid, TITLE_TOO_LONG));
    }
    Ok(title.to_string())
}

fn log_denied(principal: &Principal, post: &Post, decision: &AuthorizationResult) {
    tracing::warn!(
        post_id = post.id,
        user_id = %principal.user_id,
        reason = decision.failure_reason().unwrap_or("denied"),
        "CanEdit policy denied"
    );
}

fn to_view(post: &Post, is_liked_by_user: bool, can_edit: bool) -> PostView {
    PostView {
        id: post.id,
        title: post.title.clone(),
        image_path: post.image_path.clone(),
        created_at: post.created_at,
        author: summarize(&post.user_id, post.user.as_ref()),
        like_count: post.like_count,
        is_liked_by_user,
        can_edit,
        comments: post.comments.iter().map(comment_view).collect(),
    }
}

fn comment_view(comment: &Comment) -> CommentView {
    CommentView {
        id: comment.id,
        content: comment.content.clone(),
        author: summarize(&comment.user_id, comment.user.as_ref()),
        created: comment.created,
    }
}

/// Falls back to the bare id when the owner was not loaded.
fn summarize(user_id: &str, user: Option<&ApplicationUser>) -> UserSummary {
    match user {
        Some(user) => UserSummary {
            id: user.id.clone(),
            name: user.name.clone(),
            profile_picture: user.profile_picture.clone(),
        },
        None => UserSummary {
            id: user_id.to_string(),
            name: String::new(),
            profile_picture: None,
        },
    }
}
