#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, ConnectionTrait, DbConn, EntityTrait, Set};

    use blog_core::domain::{ApplicationUser, Post};
    use blog_core::error::RepoError;
    use blog_core::ports::{PostRepository, UserDirectory};

    use crate::database::DatabaseConnections;
    use crate::database::entity::{comment, post, post_like, user};
    use crate::database::{SeaOrmPostRepository, SeaOrmUserDirectory};

    /// Every test gets its own database.
    async fn fresh_db() -> DbConn {
        DatabaseConnections::in_memory()
            .await
            .expect("in-memory database")
            .main
    }

    async fn seed_user(db: &DbConn, id: &str, name: &str) {
        let model: user::ActiveModel = ApplicationUser::new(id, name).into();
        model.insert(db).await.unwrap();
    }

    async fn seed_post(db: &DbConn, id: i32, owner: &str, title: &str) {
        let model: post::ActiveModel = Post {
            id,
            ..Post::new(owner, title)
        }
        .into();
        model.insert(db).await.unwrap();
    }

    async fn seed_comment(db: &DbConn, post_id: i32, author: &str, content: &str) {
        comment::ActiveModel {
            post_id: Set(post_id),
            user_id: Set(author.to_string()),
            content: Set(content.to_string()),
            created: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn seed_like(db: &DbConn, user_id: &str, post_id: i32) {
        post_like::Entity::insert(post_like::ActiveModel {
            user_id: Set(user_id.to_string()),
            post_id: Set(post_id),
        })
        .exec_without_returning(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_get_all_posts_returns_existing_posts() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User 1").await;
        seed_user(&db, "user2", "Test User 2").await;
        seed_post(&db, 1, "user1", "First Post").await;
        seed_post(&db, 2, "user2", "Second Post").await;

        let repo = SeaOrmPostRepository::new(db);
        let posts = repo.get_all_posts().await.unwrap();

        assert_eq!(posts.len(), 2);
        let first = posts.iter().find(|p| p.id == 1).unwrap();
        assert_eq!(first.title, "First Post");
        assert_eq!(first.user.as_ref().map(|u| u.name.as_str()), Some("Test User 1"));
    }

    #[tokio::test]
    async fn test_get_all_posts_empty_store() {
        let repo = SeaOrmPostRepository::new(fresh_db().await);

        let posts = repo.get_all_posts().await.unwrap();

        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_posts_newest_first() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User").await;
        let mut older = Post::new("user1", "Older");
        older.created_at = Utc::now() - chrono::TimeDelta::hours(1);
        let older: post::ActiveModel = older.into();
        older.insert(&db).await.unwrap();
        seed_post(&db, 10, "user1", "Newer").await;

        let repo = SeaOrmPostRepository::new(db);
        let titles: Vec<String> = repo
            .get_all_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_get_post_by_id_returns_post() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User").await;
        seed_user(&db, "user2", "Commenter").await;
        seed_post(&db, 1, "user1", "Test Post").await;
        seed_comment(&db, 1, "user2", "First!").await;
        seed_comment(&db, 1, "user1", "Thanks").await;
        seed_like(&db, "user2", 1).await;

        let repo = SeaOrmPostRepository::new(db);
        let post = repo.get_post_by_id(1).await.unwrap().unwrap();

        assert_eq!(post.title, "Test Post");
        assert_eq!(post.user_id, "user1");
        assert_eq!(post.like_count, 1);
        assert_eq!(post.comments.len(), 2);
        assert_eq!(post.comments[0].content, "First!");
        assert_eq!(
            post.comments[0].user.as_ref().map(|u| u.name.as_str()),
            Some("Commenter")
        );
    }

    #[tokio::test]
    async fn test_get_post_by_id_missing() {
        let repo = SeaOrmPostRepository::new(fresh_db().await);

        let post = repo.get_post_by_id(999).await.unwrap();

        assert!(post.is_none());
    }

    #[tokio::test]
    async fn test_add_post_valid() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User").await;
        let repo = SeaOrmPostRepository::new(db.clone());

        let post = Post {
            id: 1,
            ..Post::new("user1", "New Post")
        };
        repo.add_post(post).await.unwrap();

        let stored = post::Entity::find_by_id(1).one(&db).await.unwrap().unwrap();
        assert_eq!(stored.title, "New Post");
    }

    #[tokio::test]
    async fn test_add_post_assigns_id() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User").await;
        let repo = SeaOrmPostRepository::new(db);

        let stored = repo.add_post(Post::new("user1", "Fresh")).await.unwrap();

        assert!(stored.id > 0);
        let fetched = repo.get_post_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Fresh");
    }

    #[tokio::test]
    async fn test_add_post_unset_is_invalid_argument() {
        let db = fresh_db().await;
        let repo = SeaOrmPostRepository::new(db.clone());

        let result = repo.add_post(Post::default()).await;

        assert!(matches!(result, Err(RepoError::InvalidArgument(_))));
        assert!(post::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_post_unknown_owner_violates_constraint() {
        let repo = SeaOrmPostRepository::new(fresh_db().await);

        let result = repo.add_post(Post::new("ghost", "Orphan")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_update_post_existing() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User").await;
        seed_post(&db, 1, "user1", "Old Post").await;
        let repo = SeaOrmPostRepository::new(db.clone());

        let mut post = repo.get_post_by_id(1).await.unwrap().unwrap();
        post.title = "Updated Post".to_string();
        repo.update_post(post).await.unwrap();

        let stored = post::Entity::find_by_id(1).one(&db).await.unwrap().unwrap();
        assert_eq!(stored.title, "Updated Post");
        assert_eq!(stored.user_id, "user1");
    }

    #[tokio::test]
    async fn test_update_post_missing_row() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User").await;
        let repo = SeaOrmPostRepository::new(db);

        let post = Post {
            id: 77,
            ..Post::new("user1", "Nobody home")
        };
        let result = repo.update_post(post).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_post_unset_is_invalid_argument() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User").await;
        seed_post(&db, 1, "user1", "Untouched").await;
        let repo = SeaOrmPostRepository::new(db.clone());

        let unset = Post {
            id: 1,
            ..Post::default()
        };
        let result = repo.update_post(unset).await;

        assert!(matches!(result, Err(RepoError::InvalidArgument(_))));
        let stored = post::Entity::find_by_id(1).one(&db).await.unwrap().unwrap();
        assert_eq!(stored.title, "Untouched");
        assert_eq!(stored.user_id, "user1");
    }

    #[tokio::test]
    async fn test_update_post_never_stored_is_invalid_argument() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User").await;
        let repo = SeaOrmPostRepository::new(db);

        let result = repo.update_post(Post::new("user1", "Not saved yet")).await;

        assert!(matches!(result, Err(RepoError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_delete_post_existing() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Test User").await;
        seed_post(&db, 1, "user1", "Post to Delete").await;
        seed_comment(&db, 1, "user1", "Going away").await;
        seed_like(&db, "user1", 1).await;
        let repo = SeaOrmPostRepository::new(db.clone());

        let post = repo.get_post_by_id(1).await.unwrap().unwrap();
        repo.delete_post(&post).await.unwrap();

        assert!(repo.get_post_by_id(1).await.unwrap().is_none());
        assert!(post::Entity::find_by_id(1).one(&db).await.unwrap().is_none());
        assert!(comment::Entity::find().all(&db).await.unwrap().is_empty());
        assert!(repo.get_liked_post_ids("user1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_post_missing_row() {
        let repo = SeaOrmPostRepository::new(fresh_db().await);

        let post = Post {
            id: 5,
            ..Post::new("user1", "Never stored")
        };
        let result = repo.delete_post(&post).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_liked_post_ids() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Liker").await;
        seed_user(&db, "user2", "Author").await;
        seed_post(&db, 1, "user2", "One").await;
        seed_post(&db, 2, "user2", "Two").await;
        seed_post(&db, 3, "user2", "Three").await;
        seed_like(&db, "user1", 3).await;
        seed_like(&db, "user1", 1).await;
        seed_like(&db, "user2", 2).await;

        let repo = SeaOrmPostRepository::new(db);

        assert_eq!(repo.get_liked_post_ids("user1").await.unwrap(), vec![1, 3]);
        assert!(repo.get_liked_post_ids("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_and_remove_like() {
        let db = fresh_db().await;
        seed_user(&db, "user1", "Liker").await;
        seed_post(&db, 1, "user1", "Self-love").await;
        let repo = SeaOrmPostRepository::new(db);

        assert!(!repo.has_liked("user1", 1).await.unwrap());

        repo.add_like("user1", 1).await.unwrap();
        assert!(repo.has_liked("user1", 1).await.unwrap());
        assert_eq!(repo.get_post_by_id(1).await.unwrap().unwrap().like_count, 1);

        let duplicate = repo.add_like("user1", 1).await;
        assert!(matches!(duplicate, Err(RepoError::Constraint(_))));

        repo.remove_like("user1", 1).await.unwrap();
        assert!(!repo.has_liked("user1", 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let db = fresh_db().await;
        db.execute_unprepared("DROP TABLE posts").await.unwrap();
        let repo = SeaOrmPostRepository::new(db);

        let result = repo.get_all_posts().await;

        assert!(matches!(result, Err(RepoError::Query(_))));
    }

    #[tokio::test]
    async fn test_ensure_user_registers_once() {
        let db = fresh_db().await;
        let users = SeaOrmUserDirectory::new(db.clone());

        users
            .ensure_user(&ApplicationUser::new("user1", "First Name"))
            .await
            .unwrap();
        users
            .ensure_user(&ApplicationUser::new("user1", "Second Name"))
            .await
            .unwrap();

        let stored = user::Entity::find().all(&db).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "First Name");
    }

    #[tokio::test]
    async fn test_ensure_user_then_add_post() {
        let db = fresh_db().await;
        SeaOrmUserDirectory::new(db.clone())
            .ensure_user(&ApplicationUser::new("newcomer", "Newcomer"))
            .await
            .unwrap();
        let repo = SeaOrmPostRepository::new(db);

        let stored = repo.add_post(Post::new("newcomer", "Hello")).await.unwrap();

        let fetched = repo.get_post_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.user.map(|u| u.name), Some("Newcomer".to_string()));
    }

    #[tokio::test]
    async fn test_ensure_user_requires_id() {
        let users = SeaOrmUserDirectory::new(fresh_db().await);

        let result = users.ensure_user(&ApplicationUser::new(" ", "Nobody")).await;

        assert!(matches!(result, Err(RepoError::InvalidArgument(_))));
    }
}
