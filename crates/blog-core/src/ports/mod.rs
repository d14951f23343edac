//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod authz;
mod images;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use authz::{AuthorizationResult, AuthorizationService, Principal, policies};
pub use images::{ImageStore, ImageStoreError};
pub use repository::{PostRepository, UserDirectory};

#[cfg(test)]
pub use authz::MockAuthorizationService;
#[cfg(test)]
pub use images::MockImageStore;
#[cfg(test)]
pub use repository::MockPostRepository;
