//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Policy evaluator and local image store only
//! - `postgres` - Relational storage via SeaORM (Postgres, plus SQLite for tests and local runs)
//! - `auth` - JWT bearer tokens

pub mod authz;
pub mod database;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

pub use authz::PolicyAuthorizationService;
pub use database::DatabaseConfig;
pub use storage::LocalImageStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, SeaOrmPostRepository, SeaOrmUserDirectory};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
