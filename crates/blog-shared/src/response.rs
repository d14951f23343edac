//! Operation results and API response envelopes (RFC 7807 for errors).

use serde::{Deserialize, Serialize};

/// Why a service operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotAuthenticated,
    NotAuthorized,
    NotFound,
    Invalid,
    Internal,
}

impl FailureKind {
    pub fn status(self) -> u16 {
        match self {
            FailureKind::NotAuthenticated => 401,
            FailureKind::NotAuthorized => 403,
            FailureKind::NotFound => 404,
            FailureKind::Invalid => 400,
            FailureKind::Internal => 500,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FailureKind::NotAuthenticated => "Authentication Required",
            FailureKind::NotAuthorized => "Forbidden",
            FailureKind::NotFound => "Not Found",
            FailureKind::Invalid => "Bad Request",
            FailureKind::Internal => "Internal Server Error",
        }
    }
}

/// Uniform outcome of a post mutation.
///
/// User-facing failures travel as data in this shape; only programming errors
/// and store faults are returned as `Err` by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResult {
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl ServiceResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            success_message: Some(message.into()),
            error: None,
            failure: None,
        }
    }

    pub fn failure(kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            success_message: None,
            error: Some(error.into()),
            failure: Some(kind),
        }
    }
}

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Problem document for a refused service operation.
    pub fn from_failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self::new(kind.status(), kind.title()).with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::from_failure(FailureKind::NotFound, detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}
