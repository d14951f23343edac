//! Caller identity extractor.
//!
//! Handlers receive the caller as an optional [`Principal`] and pass it to the
//! post service, which decides what an anonymous caller may do.

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use blog_core::ports::{AuthError, Principal, TokenService};
use blog_shared::ErrorResponse;

/// Error type for authentication failures.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthenticationError(pub AuthError);

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

/// The caller, if the request carried a bearer token.
///
/// No `Authorization` header means an anonymous caller. A header that is
/// present but does not hold a valid token is rejected with 401.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Principal>);

impl OptionalIdentity {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

impl FromRequest for OptionalIdentity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identify(req).map(OptionalIdentity))
    }
}

fn identify(req: &HttpRequest) -> Result<Option<Principal>, AuthenticationError> {
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
        tracing::error!("TokenService not found in app data");
        return Err(AuthenticationError(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        )));
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AuthenticationError(AuthError::InvalidToken("Expected Bearer token".to_string()))
        })?;

    match token_service.validate_token(token) {
        Ok(claims) => Ok(Some(Principal::from(claims))),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            Err(AuthenticationError(e))
        }
    }
}
