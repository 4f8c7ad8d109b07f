//! In-memory repositories - used as fallback when Postgres is unavailable
//! and as a lightweight backing store in tests.
//!
//! Note: data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, PostFilter, PostOrder, PostRepository, UserRepository,
};

/// In-memory post store using a HashMap behind an async RwLock.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        // Mirror the database's unique index on slug.
        if store.values().any(|p| p.slug == post.slug) {
            return Err(RepoError::UniqueViolation(format!(
                "duplicate slug: {}",
                post.slug
            )));
        }

        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        if store
            .values()
            .any(|p| p.id != post.id && p.slug == post.slug)
        {
            return Err(RepoError::UniqueViolation(format!(
                "duplicate slug: {}",
                post.slug
            )));
        }

        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn find_filtered(
        &self,
        filter: PostFilter,
        order: PostOrder,
        skip: u64,
        take: u64,
    ) -> Result<(Vec<Post>, u64), RepoError> {
        let store = self.store.read().await;

        let mut matching: Vec<Post> = store
            .values()
            .filter(|p| match filter {
                PostFilter::Published => p.status == PostStatus::Published,
                PostFilter::AuthoredBy(author_id) => p.author_id == author_id,
                PostFilter::Any => true,
            })
            .cloned()
            .collect();

        match order {
            PostOrder::PublishedAtDesc => {
                matching.sort_by(|a, b| b.published_at.cmp(&a.published_at))
            }
            PostOrder::CreatedAtDesc => matching.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .collect();

        Ok((items, total))
    }
}

/// In-memory user store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.values().any(|u| u.email == user.email) {
            return Err(RepoError::UniqueViolation(format!(
                "duplicate email: {}",
                user.email
            )));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_post(slug: &str) -> Post {
        Post::new(
            Uuid::new_v4(),
            "Title".to_string(),
            "Content".to_string(),
            slug.to_string(),
            None,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_slug() {
        let repo = InMemoryPostRepository::new();
        repo.insert(sample_post("taken")).await.unwrap();

        let err = repo.insert(sample_post("taken")).await.unwrap_err();
        assert!(matches!(err, RepoError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn save_requires_existing_row() {
        let repo = InMemoryPostRepository::new();
        let err = repo.save(sample_post("ghost")).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn find_by_slug_round_trip() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(sample_post("findable")).await.unwrap();

        let found = repo.find_by_slug("findable").await.unwrap().unwrap();
        assert_eq!(found.id, post.id);
        assert!(repo.find_by_slug("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_email_is_unique() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("a@example.com".to_string(), "hash".to_string()))
            .await
            .unwrap();

        let err = repo
            .insert(User::new("a@example.com".to_string(), "hash".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::UniqueViolation(_)));
    }
}
