#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};

/// Configuration for the main database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Connection handle shared by the repositories.
///
/// # Example
/// ```ignore
/// let db = DatabaseConnections::init(&config).await?;
/// let posts = SeaOrmPostRepository::new(db.main.clone());
/// ```
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    pub main: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Connect to the configured database and make sure the schema exists.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        super::schema::create_schema(&main).await?;

        tracing::info!(
            backend = ?main.get_database_backend(),
            "Database connected (pool: {})",
            config.max_connections
        );

        Ok(Self { main })
    }

    /// A fresh, private SQLite database living in memory.
    ///
    /// The pool is pinned to a single long-lived connection: every SQLite
    /// connection to `:memory:` opens its own database.
    pub async fn in_memory() -> Result<Self, DbErr> {
        let forever = Duration::from_secs(60 * 60 * 24 * 365);
        let opts = ConnectOptions::new("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(forever)
            .max_lifetime(forever)
            .sqlx_logging(false)
            .to_owned();

        let main = Database::connect(opts).await?;
        super::schema::create_schema(&main).await?;

        tracing::debug!("In-memory database ready");
        Ok(Self { main })
    }

    /// Round-trip to the database.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.main.ping().await
    }
}
