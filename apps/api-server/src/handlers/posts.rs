//! Post handlers.

use actix_web::{HttpResponse, http::StatusCode, web};

use blog_core::domain::ApplicationUser;
use blog_core::ports::Principal;
use blog_shared::ApiResponse;
use blog_shared::dto::{PostCreateDto, PostUpdateDto};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult, service_response};
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.get_all_posts(identity.principal()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .get_post_by_id(identity.principal(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<PostCreateDto>,
) -> AppResult<HttpResponse> {
    register_caller(&state, identity.principal()).await?;

    let result = state
        .posts
        .create_post(identity.principal(), body.into_inner())
        .await?;
    service_response(result, StatusCode::CREATED)
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i32>,
    body: web::Json<PostUpdateDto>,
) -> AppResult<HttpResponse> {
    let result = state
        .posts
        .update_post(identity.principal(), path.into_inner(), body.into_inner())
        .await?;
    service_response(result, StatusCode::OK)
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let result = state
        .posts
        .delete_post(identity.principal(), path.into_inner())
        .await?;
    service_response(result, StatusCode::OK)
}

/// POST /api/posts/{id}/like - likes the post, or removes an existing like.
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    register_caller(&state, identity.principal()).await?;

    let result = state
        .posts
        .toggle_like(identity.principal(), path.into_inner())
        .await?;
    service_response(result, StatusCode::OK)
}

/// Make sure the caller has a user row before it is referenced.
async fn register_caller(state: &AppState, caller: Option<&Principal>) -> AppResult<()> {
    let Some(principal) = caller.filter(|p| p.is_authenticated()) else {
        return Ok(());
    };

    let name = principal.name.as_deref().unwrap_or(&principal.user_id);
    state
        .users
        .ensure_user(&ApplicationUser::new(principal.user_id.as_str(), name))
        .await?;
    Ok(())
}
