//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::ApplicationUser;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub profile_picture: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ApplicationUser {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            profile_picture: model.profile_picture,
        }
    }
}

impl From<ApplicationUser> for ActiveModel {
    fn from(user: ApplicationUser) -> Self {
        Self {
            id: Set(user.id),
            name: Set(user.name),
            profile_picture: Set(user.profile_picture),
        }
    }
}
