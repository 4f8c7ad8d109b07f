#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};
    use quill_core::domain::{Post, PostStatus};
    use quill_core::ports::{BaseRepository, PostRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn sample_model(post_id: uuid::Uuid, author_id: uuid::Uuid) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: post_id,
            author_id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            slug: "test-post-abc123".to_owned(),
            excerpt: None,
            status: post::PostStatus::Draft,
            published_at: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![sample_model(post_id, author_id)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.title, "Test Post");
        assert_eq!(found.id, post_id);
        assert_eq!(found.status, PostStatus::Draft);
    }

    #[tokio::test]
    async fn test_find_post_by_slug() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![sample_model(post_id, author_id)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let found = repo
            .find_by_slug("test-post-abc123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.slug, "test-post-abc123");
    }

    #[tokio::test]
    async fn test_find_user_by_multibyte_email() {
        // The log masking must split the local part on char boundaries.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<user::Model>::new(), Vec::<user::Model>::new()])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let found = repo.find_by_email("émile@example.com").await.unwrap();
        assert!(found.is_none());

        let found = repo.find_by_email("é@example.com").await.unwrap();
        assert!(found.is_none());
    }
}
