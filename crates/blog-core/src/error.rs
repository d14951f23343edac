//! Repository-level error types.

use thiserror::Error;

/// Failures raised at the persistence boundary.
///
/// "Not found" on reads is `Ok(None)`, not an error; `NotFound` is only
/// returned by mutations aimed at a row that does not exist.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The caller handed an unset entity to a mutation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
