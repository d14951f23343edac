//! # Blog Shared
//!
//! Request, view and response shapes shared by the service layer and the HTTP API.
//! Nothing in here knows about persistence.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse, FailureKind, ServiceResult};
