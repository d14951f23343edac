//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::ports::{
    AuthorizationService, ImageStore, PostRepository, TokenService, UserDirectory,
};
use blog_infra::{
    DatabaseConnections, JwtTokenService, LocalImageStore, PolicyAuthorizationService,
    SeaOrmPostRepository, SeaOrmUserDirectory,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub users: Arc<dyn UserDirectory>,
    pub token_service: Arc<dyn TokenService>,
    pub db: Arc<DatabaseConnections>,
}

impl AppState {
    /// Connect to storage and wire the post service.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db = match &config.database {
            Some(db_config) => DatabaseConnections::init(db_config).await?,
            None => {
                tracing::warn!(
                    "DATABASE_URL not set. Running on an in-memory SQLite database; data is lost on exit."
                );
                DatabaseConnections::in_memory().await?
            }
        };

        let images: Arc<dyn ImageStore> = Arc::new(LocalImageStore::new(
            &config.images.root,
            &config.images.public_prefix,
        ));
        let token_service: Arc<dyn TokenService> =
            Arc::new(JwtTokenService::new(config.jwt.clone()));

        let state = Self::from_parts(Arc::new(db), images, token_service);
        tracing::info!("Application state initialized");
        Ok(state)
    }

    pub fn from_parts(
        db: Arc<DatabaseConnections>,
        images: Arc<dyn ImageStore>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        let repository: Arc<dyn PostRepository> =
            Arc::new(SeaOrmPostRepository::new(db.main.clone()));
        let authz: Arc<dyn AuthorizationService> = Arc::new(PolicyAuthorizationService::new());

        Self {
            posts: Arc::new(PostService::new(repository, authz, images)),
            users: Arc::new(SeaOrmUserDirectory::new(db.main.clone())),
            token_service,
            db,
        }
    }
}
