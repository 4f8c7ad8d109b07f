use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Which posts a filtered listing selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// Only published posts (the public listing).
    Published,
    /// Every post by one author, regardless of status.
    AuthoredBy(Uuid),
    /// Every post regardless of status (admin listing).
    Any,
}

/// Sort order of a filtered listing. Each catalog use case fixes its order
/// as part of its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    PublishedAtDesc,
    CreatedAtDesc,
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. Must report unique-constraint violations as
    /// `RepoError::UniqueViolation`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository with the filtered/paginated queries the catalog needs.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Filtered, ordered, paginated listing. Returns the page of items and
    /// the total count matching the filter.
    async fn find_filtered(
        &self,
        filter: PostFilter,
        order: PostOrder,
        skip: u64,
        take: u64,
    ) -> Result<(Vec<Post>, u64), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
