//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostFilter, PostOrder, PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let mut chars = local.chars();
            let masked_local = match chars.next() {
                Some(first) if chars.next().is_some() => format!("{}***", first),
                _ => "***".to_string(),
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_filtered(
        &self,
        filter: PostFilter,
        order: PostOrder,
        skip: u64,
        take: u64,
    ) -> Result<(Vec<Post>, u64), RepoError> {
        let query = PostEntity::find();

        let query = match filter {
            PostFilter::Published => {
                query.filter(post::Column::Status.eq(post::PostStatus::Published))
            }
            PostFilter::AuthoredBy(author_id) => {
                query.filter(post::Column::AuthorId.eq(author_id))
            }
            PostFilter::Any => query,
        };

        let query = match order {
            PostOrder::PublishedAtDesc => query.order_by_desc(post::Column::PublishedAt),
            PostOrder::CreatedAtDesc => query.order_by_desc(post::Column::CreatedAt),
        };

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;

        let items = query
            .offset(skip)
            .limit(take)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok((items.into_iter().map(Into::into).collect(), total))
    }
}
