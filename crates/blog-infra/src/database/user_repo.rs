//! SeaORM implementation of the user directory.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DbConn, EntityTrait};

use blog_core::domain::ApplicationUser;
use blog_core::error::RepoError;
use blog_core::ports::UserDirectory;

use super::entity::user::{self, Entity as UserEntity};
use super::post_repo::map_db_err;

pub struct SeaOrmUserDirectory {
    db: DbConn,
}

impl SeaOrmUserDirectory {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    async fn ensure_user(&self, user: &ApplicationUser) -> Result<(), RepoError> {
        if user.id.trim().is_empty() {
            return Err(RepoError::InvalidArgument("user id is required".to_string()));
        }

        let model: user::ActiveModel = user.clone().into();
        let inserted = UserEntity::insert(model)
            .on_conflict(OnConflict::column(user::Column::Id).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        if inserted > 0 {
            tracing::info!(user_id = %user.id, "Registered application user");
        }
        Ok(())
    }
}
