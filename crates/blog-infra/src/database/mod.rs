//! Database connection management and the SeaORM repositories.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod post_repo;
#[cfg(feature = "postgres")]
pub mod schema;
#[cfg(feature = "postgres")]
mod user_repo;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
#[cfg(feature = "postgres")]
pub use post_repo::SeaOrmPostRepository;
#[cfg(feature = "postgres")]
pub use user_repo::SeaOrmUserDirectory;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
