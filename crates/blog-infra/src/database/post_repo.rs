//! SeaORM implementation of the post repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr, TransactionTrait,
};

use blog_core::domain::{Comment, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_like::{self, Entity as LikeEntity};
use super::entity::user::{self, Entity as UserEntity};

/// Post repository over any SeaORM connection (Postgres in production,
/// SQLite in tests).
pub struct SeaOrmPostRepository {
    db: DbConn,
}

impl SeaOrmPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Attach comments (with authors) and like counts to freshly loaded rows.
    async fn with_details(
        &self,
        rows: Vec<(post::Model, Option<user::Model>)>,
    ) -> Result<Vec<Post>, RepoError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = rows.iter().map(|(p, _)| p.id).collect();

        let comment_rows = CommentEntity::find()
            .filter(comment::Column::PostId.is_in(ids.clone()))
            .order_by_asc(comment::Column::Created)
            .order_by_asc(comment::Column::Id)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut comments: HashMap<i32, Vec<Comment>> = HashMap::new();
        for (model, author) in comment_rows {
            let mut comment = Comment::from(model);
            comment.user = author.map(Into::into);
            comments.entry(comment.post_id).or_default().push(comment);
        }

        let like_rows = LikeEntity::find()
            .filter(post_like::Column::PostId.is_in(ids))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut likes: HashMap<i32, u64> = HashMap::new();
        for like in like_rows {
            *likes.entry(like.post_id).or_default() += 1;
        }

        Ok(rows
            .into_iter()
            .map(|(model, owner)| {
                let mut post = Post::from(model);
                post.user = owner.map(Into::into);
                post.comments = comments.remove(&post.id).unwrap_or_default();
                post.like_count = likes.get(&post.id).copied().unwrap_or(0);
                post
            })
            .collect())
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn get_all_posts(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = rows.len(), "Fetched posts");
        self.with_details(rows).await
    }

    async fn get_post_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = id, "Finding post by id");

        let Some(row) = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        Ok(self.with_details(vec![row]).await?.pop())
    }

    async fn add_post(&self, post: Post) -> Result<Post, RepoError> {
        if post.is_unset() {
            return Err(RepoError::InvalidArgument(
                "post must have an owning user".to_string(),
            ));
        }

        let active: post::ActiveModel = post.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Post inserted");
        Ok(model.into())
    }

    async fn update_post(&self, post: Post) -> Result<Post, RepoError> {
        if post.is_unset() {
            return Err(RepoError::InvalidArgument(
                "post must have an owning user".to_string(),
            ));
        }
        if post.id == 0 {
            return Err(RepoError::InvalidArgument(
                "post has not been stored yet".to_string(),
            ));
        }

        let active: post::ActiveModel = post.into();
        let model = active.update(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Post updated");
        Ok(model.into())
    }

    async fn delete_post(&self, post: &Post) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(post.id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        LikeEntity::delete_many()
            .filter(post_like::Column::PostId.eq(post.id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        let result = PostEntity::delete_by_id(post.id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls it back.
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(post_id = post.id, "Post deleted");
        Ok(())
    }

    async fn get_liked_post_ids(&self, user_id: &str) -> Result<Vec<i32>, RepoError> {
        LikeEntity::find()
            .select_only()
            .column(post_like::Column::PostId)
            .filter(post_like::Column::UserId.eq(user_id))
            .order_by_asc(post_like::Column::PostId)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn has_liked(&self, user_id: &str, post_id: i32) -> Result<bool, RepoError> {
        let like = LikeEntity::find_by_id((user_id.to_string(), post_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(like.is_some())
    }

    async fn add_like(&self, user_id: &str, post_id: i32) -> Result<(), RepoError> {
        let like = post_like::ActiveModel {
            user_id: Set(user_id.to_string()),
            post_id: Set(post_id),
        };
        LikeEntity::insert(like)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn remove_like(&self, user_id: &str, post_id: i32) -> Result<(), RepoError> {
        LikeEntity::delete_by_id((user_id.to_string(), post_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

pub(super) fn map_db_err(err: DbErr) -> RepoError {
    if let Some(
        SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg),
    ) = err.sql_err()
    {
        return RepoError::Constraint(msg);
    }

    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            tracing::error!(error = %err, "Database connection error");
            RepoError::Connection(err.to_string())
        }
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => RepoError::NotFound,
        _ => {
            let msg = err.to_string();
            let lowered = msg.to_lowercase();
            if lowered.contains("duplicate")
                || lowered.contains("unique")
                || lowered.contains("foreign key")
            {
                RepoError::Constraint(msg)
            } else {
                RepoError::Query(msg)
            }
        }
    }
}
