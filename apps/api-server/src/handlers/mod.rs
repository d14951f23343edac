//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpResponse, error, web};
use blog_shared::ErrorResponse;

/// Upper bound for JSON bodies; posts may carry an inline image.
const JSON_LIMIT: usize = 10 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/like", web::post().to(posts::toggle_like)),
            ),
    );
}

/// JSON extractor settings: malformed bodies become RFC 7807 problems.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            let problem = ErrorResponse::new(400, "Bad Request").with_detail(err.to_string());
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(problem))
                .into()
        })
}
