//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::RepoError;
use blog_shared::{ErrorResponse, FailureKind, ServiceResult};

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A service operation refused by the domain.
    #[error("{kind:?}: {detail}")]
    Refused { kind: FailureKind, detail: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Refused { kind, .. } => {
                StatusCode::from_u16(kind.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Refused { kind, detail } => ErrorResponse::from_failure(*kind, detail),
            AppError::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::InvalidArgument(msg) => {
                AppError::Internal(format!("Invalid repository call: {msg}"))
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Turn a service outcome into a response: the result itself on success,
/// a problem document on refusal.
pub fn service_response(result: ServiceResult, status: StatusCode) -> AppResult<HttpResponse> {
    if result.succeeded {
        return Ok(HttpResponse::build(status).json(result));
    }

    Err(AppError::Refused {
        kind: result.failure.unwrap_or(FailureKind::Internal),
        detail: result.error.unwrap_or_default(),
    })
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusals_map_to_status() {
        let cases = [
            (FailureKind::NotAuthenticated, StatusCode::UNAUTHORIZED),
            (FailureKind::NotAuthorized, StatusCode::FORBIDDEN),
            (FailureKind::NotFound, StatusCode::NOT_FOUND),
            (FailureKind::Invalid, StatusCode::BAD_REQUEST),
        ];

        for (kind, expected) in cases {
            let err = service_response(ServiceResult::failure(kind, "nope"), StatusCode::OK)
                .unwrap_err();
            assert_eq!(err.status_code(), expected);
        }
    }

    #[test]
    fn test_success_keeps_requested_status() {
        let response =
            service_response(ServiceResult::success("Post created successfully"), StatusCode::CREATED)
                .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_repo_errors() {
        assert_eq!(
            AppError::from(RepoError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(RepoError::Constraint("duplicate like".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(RepoError::Query("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
