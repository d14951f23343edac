//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use blog_core::domain::Post;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub user_id: String,
    pub image_path: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
    #[sea_orm(has_many = "super::post_like::Entity")]
    Likes,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::post_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Row to domain post. Owner, comments and like count are filled in by the
/// repository.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            user_id: model.user_id,
            user: None,
            image_path: model.image_path,
            created_at: model.created_at.into(),
            comments: Vec::new(),
            like_count: 0,
        }
    }
}

/// Every column is set so an update replaces the whole row. An id of zero is
/// left for the store to assign.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: if post.id == 0 { NotSet } else { Set(post.id) },
            title: Set(post.title),
            user_id: Set(post.user_id),
            image_path: Set(post.image_path),
            created_at: Set(post.created_at.into()),
        }
    }
}
