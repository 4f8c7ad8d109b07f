//! Post catalog - the use-case orchestrator.
//!
//! Composes the access policies, the lifecycle transitions, slug derivation
//! and pagination against the repository port. This is the only entry point
//! the transport boundary talks to.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Caller, Post};
use crate::error::{DomainError, RepoError};
use crate::lifecycle;
use crate::pagination::{Page, PageMeta, PageRequest};
use crate::policy;
use crate::ports::{Clock, PostFilter, PostOrder, PostRepository};
use crate::slug;

/// Bounded retry budget for derived-slug collisions. Millisecond timestamps
/// make more than one retry already unlikely.
const MAX_SLUG_ATTEMPTS: u32 = 5;

/// Input for creating a post. Status is not part of it: every post starts
/// as a draft.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
}

pub struct PostCatalog {
    posts: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
}

impl PostCatalog {
    pub fn new(posts: Arc<dyn PostRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }

    /// Create a new draft owned by `author_id`.
    ///
    /// When no explicit slug is supplied one is derived from the title; a
    /// unique-violation on a derived slug is retried with a freshly sampled
    /// timestamp. An explicit slug is never retried - a fixed value cannot
    /// converge.
    pub async fn create(&self, input: CreatePost, author_id: Uuid) -> Result<Post, DomainError> {
        for _ in 0..MAX_SLUG_ATTEMPTS {
            let now = self.clock.now();
            let slug = match &input.slug {
                Some(explicit) => explicit.clone(),
                None => slug::derive(&input.title, now),
            };

            let post = Post::new(
                author_id,
                input.title.clone(),
                input.content.clone(),
                slug,
                input.excerpt.clone(),
                now,
            );

            match self.posts.insert(post).await {
                Ok(created) => return Ok(created),
                Err(RepoError::UniqueViolation(_)) if input.slug.is_none() => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(DomainError::SlugExhausted {
            attempts: MAX_SLUG_ATTEMPTS,
        })
    }

    /// Published posts only, newest publication first. Public - no caller.
    pub async fn list_published(&self, page: PageRequest) -> Result<Page<Post>, DomainError> {
        self.list(PostFilter::Published, PostOrder::PublishedAtDesc, page)
            .await
    }

    /// Every post in every status, newest creation first. The boundary gates
    /// invocation to administrators.
    pub async fn list_for_admin(&self, page: PageRequest) -> Result<Page<Post>, DomainError> {
        self.list(PostFilter::Any, PostOrder::CreatedAtDesc, page).await
    }

    /// The caller's own posts in every status, newest creation first.
    pub async fn list_mine(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        self.list(PostFilter::AuthoredBy(author_id), PostOrder::CreatedAtDesc, page)
            .await
    }

    /// Read a post by id. A post that exists but is hidden from this caller
    /// yields the same NotFound as a missing one.
    pub async fn get_by_id(&self, id: Uuid, caller: &Caller) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;
        self.readable(post, caller)
    }

    /// Read a post by slug. Same visibility semantics as [`get_by_id`].
    ///
    /// [`get_by_id`]: PostCatalog::get_by_id
    pub async fn get_by_slug(&self, slug: &str, caller: &Caller) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_slug(slug)
            .await?
            .ok_or(DomainError::NotFound)?;
        self.readable(post, caller)
    }

    /// Apply a partial update. Owner or admin only.
    ///
    /// A title change never regenerates an existing slug - slugs are stable
    /// public URLs once assigned. A missing slug is backfilled.
    pub async fn update(
        &self,
        id: Uuid,
        patch: PostPatch,
        caller: &Caller,
    ) -> Result<Post, DomainError> {
        let mut post = self.load_for_mutation(id, caller).await?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(slug) = patch.slug {
            post.slug = slug;
        }
        if let Some(excerpt) = patch.excerpt {
            post.excerpt = Some(excerpt);
        }

        let now = self.clock.now();
        if post.slug.is_empty() {
            post.slug = slug::derive(&post.title, now);
        }
        post.updated_at = now;

        Ok(self.posts.save(post).await?)
    }

    /// Publish a post. Owner or admin only.
    pub async fn publish(&self, id: Uuid, caller: &Caller) -> Result<Post, DomainError> {
        let mut post = self.load_for_mutation(id, caller).await?;
        lifecycle::publish(&mut post, self.clock.now());
        Ok(self.posts.save(post).await?)
    }

    /// Archive a post. Owner or admin only.
    pub async fn archive(&self, id: Uuid, caller: &Caller) -> Result<Post, DomainError> {
        let mut post = self.load_for_mutation(id, caller).await?;
        lifecycle::archive(&mut post, self.clock.now());
        Ok(self.posts.save(post).await?)
    }

    /// Hard-delete a post. Admin-only, enforced by the invoking boundary;
    /// the catalog still requires the post to exist.
    pub async fn remove(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;
        self.posts.delete(id).await?;
        Ok(())
    }

    async fn list(
        &self,
        filter: PostFilter,
        order: PostOrder,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        let (items, total) = self
            .posts
            .find_filtered(filter, order, page.offset(), page.limit)
            .await?;

        Ok(Page {
            items,
            meta: PageMeta::new(page.page, page.limit, total),
        })
    }

    fn readable(&self, post: Post, caller: &Caller) -> Result<Post, DomainError> {
        if policy::can_read(&post, caller) {
            Ok(post)
        } else {
            // Deliberately NotFound, not Forbidden: hidden posts must be
            // indistinguishable from missing ones.
            Err(DomainError::NotFound)
        }
    }

    /// Existence-only lookup for the mutation path: an owner or admin must
    /// be able to locate their own draft, so visibility is not applied here.
    async fn load_for_mutation(&self, id: Uuid, caller: &Caller) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;

        if !policy::can_mutate(&post, caller) {
            return Err(DomainError::Forbidden);
        }

        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostStatus;
    use crate::ports::BaseRepository;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory repository scripted for catalog tests.
    #[derive(Default)]
    struct MemoryRepo {
        posts: Mutex<HashMap<Uuid, Post>>,
    }

    #[async_trait]
    impl crate::ports::BaseRepository<Post, Uuid> for MemoryRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().get(&id).cloned())
        }

        async fn insert(&self, post: Post) -> Result<Post, RepoError> {
            let mut posts = self.posts.lock().unwrap();
            if posts.values().any(|p| p.slug == post.slug) {
                return Err(RepoError::UniqueViolation(post.slug.clone()));
            }
            posts.insert(post.id, post.clone());
            Ok(post)
        }

        async fn save(&self, post: Post) -> Result<Post, RepoError> {
            let mut posts = self.posts.lock().unwrap();
            if !posts.contains_key(&post.id) {
                return Err(RepoError::NotFound);
            }
            posts.insert(post.id, post.clone());
            Ok(post)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.posts
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl PostRepository for MemoryRepo {
        async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
            Ok(self
                .posts
                .lock()
                .unwrap()
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
            let posts = self.posts.lock().unwrap();
            let mut matching: Vec<Post> = posts
                .values()
                .filter(|p| match filter {
                    PostFilter::Published => p.status == PostStatus::Published,
                    PostFilter::AuthoredBy(author) => p.author_id == author,
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
            let page = matching
                .into_iter()
                .skip(skip as usize)
                .take(take as usize)
                .collect();

            Ok((page, total))
        }
    }

    /// Clock that replays a scripted sequence, then repeats its last entry.
    struct ScriptedClock {
        times: Mutex<Vec<DateTime<Utc>>>,
        last: DateTime<Utc>,
    }

    impl ScriptedClock {
        fn new(times: Vec<DateTime<Utc>>) -> Self {
            let last = *times.last().expect("at least one scripted time");
            let mut times = times;
            times.reverse();
            Self {
                times: Mutex::new(times),
                last,
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> DateTime<Utc> {
            self.times.lock().unwrap().pop().unwrap_or(self.last)
        }
    }

    fn millis(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn catalog_at(times: Vec<DateTime<Utc>>) -> (PostCatalog, Arc<MemoryRepo>) {
        let repo = Arc::new(MemoryRepo::default());
        let catalog = PostCatalog::new(repo.clone(), Arc::new(ScriptedClock::new(times)));
        (catalog, repo)
    }

    fn draft_input(title: &str) -> CreatePost {
        CreatePost {
            title: title.to_string(),
            content: "Enough content to pass validation".to_string(),
            slug: None,
            excerpt: None,
        }
    }

    #[tokio::test]
    async fn create_always_yields_a_draft_with_derived_slug() {
        let (catalog, _) = catalog_at(vec![millis(1_700_000_000_000)]);
        let author = Uuid::new_v4();

        let post = catalog
            .create(draft_input("My First Blog Post!"), author)
            .await
            .unwrap();

        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.author_id, author);
        assert!(post.published_at.is_none());
        assert!(post.slug.starts_with("my-first-blog-post-"));
    }

    #[tokio::test]
    async fn same_millisecond_titles_get_distinct_slugs_via_retry() {
        // Second create sees the same timestamp as the first, collides,
        // and retries with the next scripted sample.
        let (catalog, _) = catalog_at(vec![millis(1000), millis(1000), millis(1001)]);
        let author = Uuid::new_v4();

        let first = catalog.create(draft_input("Same Title"), author).await.unwrap();
        let second = catalog.create(draft_input("Same Title"), author).await.unwrap();

        assert_ne!(first.slug, second.slug);
    }

    #[tokio::test]
    async fn derived_slug_retry_is_bounded() {
        // A clock frozen at one millisecond can never converge.
        let (catalog, _) = catalog_at(vec![millis(1000)]);
        let author = Uuid::new_v4();

        catalog.create(draft_input("Same Title"), author).await.unwrap();
        let err = catalog
            .create(draft_input("Same Title"), author)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::SlugExhausted { .. }));
    }

    #[tokio::test]
    async fn explicit_slug_collision_is_not_retried() {
        let (catalog, _) = catalog_at(vec![millis(1000), millis(2000)]);
        let author = Uuid::new_v4();

        let mut input = draft_input("First");
        input.slug = Some("chosen-slug".to_string());
        catalog.create(input.clone(), author).await.unwrap();

        input.title = "Second".to_string();
        let err = catalog.create(input, author).await.unwrap_err();

        assert!(matches!(err, DomainError::Repo(RepoError::UniqueViolation(_))));
    }

    #[tokio::test]
    async fn draft_visibility_matrix_by_id() {
        let (catalog, _) = catalog_at(vec![millis(1000)]);
        let author = Uuid::new_v4();
        let post = catalog.create(draft_input("Hidden Draft"), author).await.unwrap();

        // Anonymous and unrelated users get NotFound, never Forbidden.
        let err = catalog.get_by_id(post.id, &Caller::Anonymous).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound));

        let err = catalog
            .get_by_id(post.id, &Caller::user(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound));

        // Owner and admin see the draft.
        let found = catalog.get_by_id(post.id, &Caller::user(author)).await.unwrap();
        assert_eq!(found.id, post.id);

        let found = catalog
            .get_by_id(post.id, &Caller::admin(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(found.id, post.id);
    }

    #[tokio::test]
    async fn published_post_is_readable_by_anyone_by_slug() {
        let (catalog, _) = catalog_at(vec![millis(1000), millis(2000)]);
        let author = Uuid::new_v4();
        let post = catalog.create(draft_input("Public Post"), author).await.unwrap();

        catalog.publish(post.id, &Caller::user(author)).await.unwrap();

        let found = catalog.get_by_slug(&post.slug, &Caller::Anonymous).await.unwrap();
        assert_eq!(found.id, post.id);
    }

    #[tokio::test]
    async fn missing_slug_is_not_found() {
        let (catalog, _) = catalog_at(vec![millis(1000)]);
        let err = catalog
            .get_by_slug("no-such-slug", &Caller::Anonymous)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[tokio::test]
    async fn publish_then_archive_preserves_publish_timestamp() {
        let publish_at = millis(5_000);
        let archive_at = millis(9_000);
        let (catalog, _) = catalog_at(vec![millis(1000), publish_at, archive_at]);
        let author = Uuid::new_v4();
        let owner = Caller::user(author);

        let post = catalog.create(draft_input("Lifecycle"), author).await.unwrap();

        let published = catalog.publish(post.id, &owner).await.unwrap();
        assert_eq!(published.status, PostStatus::Published);
        assert_eq!(published.published_at, Some(publish_at));

        let archived = catalog.archive(post.id, &owner).await.unwrap();
        assert_eq!(archived.status, PostStatus::Archived);
        assert_eq!(archived.published_at, Some(publish_at));
    }

    #[tokio::test]
    async fn non_owner_mutation_is_forbidden() {
        let (catalog, _) = catalog_at(vec![millis(1000)]);
        let author = Uuid::new_v4();
        let post = catalog.create(draft_input("Mine"), author).await.unwrap();

        let stranger = Caller::user(Uuid::new_v4());
        let err = catalog.archive(post.id, &stranger).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));

        let err = catalog
            .update(post.id, PostPatch::default(), &stranger)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
    }

    #[tokio::test]
    async fn admin_can_mutate_anyones_post() {
        let (catalog, _) = catalog_at(vec![millis(1000), millis(2000)]);
        let author = Uuid::new_v4();
        let post = catalog.create(draft_input("Not Theirs"), author).await.unwrap();

        let published = catalog
            .publish(post.id, &Caller::admin(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(published.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn mutating_a_missing_post_is_not_found() {
        let (catalog, _) = catalog_at(vec![millis(1000)]);
        let err = catalog
            .publish(Uuid::new_v4(), &Caller::admin(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields_and_keeps_slug() {
        let (catalog, _) = catalog_at(vec![millis(1000), millis(2000)]);
        let author = Uuid::new_v4();
        let post = catalog.create(draft_input("Original Title"), author).await.unwrap();
        let original_slug = post.slug.clone();

        let patch = PostPatch {
            title: Some("Completely New Title".to_string()),
            ..Default::default()
        };
        let updated = catalog.update(post.id, patch, &Caller::user(author)).await.unwrap();

        assert_eq!(updated.title, "Completely New Title");
        assert_eq!(updated.content, post.content);
        // Slugs are stable public URLs: a title change never regenerates one.
        assert_eq!(updated.slug, original_slug);
        assert_eq!(updated.status, PostStatus::Draft);
    }

    #[tokio::test]
    async fn update_backfills_a_missing_slug() {
        let (catalog, repo) = catalog_at(vec![millis(1000), millis(2000)]);
        let author = Uuid::new_v4();

        // Legacy row without a slug, inserted behind the catalog's back.
        let post = Post::new(
            author,
            "Old Post".to_string(),
            "Imported content".to_string(),
            String::new(),
            None,
            millis(500),
        );
        repo.insert(post.clone()).await.unwrap();

        let updated = catalog
            .update(post.id, PostPatch::default(), &Caller::user(author))
            .await
            .unwrap();

        assert!(updated.slug.starts_with("old-post-"));
    }

    #[tokio::test]
    async fn remove_requires_existence() {
        let (catalog, _) = catalog_at(vec![millis(1000)]);
        let author = Uuid::new_v4();
        let post = catalog.create(draft_input("Doomed"), author).await.unwrap();

        catalog.remove(post.id).await.unwrap();
        let err = catalog.remove(post.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[tokio::test]
    async fn list_published_pagination_meta() {
        // 25 published posts, distinct publish instants.
        let mut times = vec![];
        for i in 0..25 {
            times.push(millis(1_000 + i)); // create
            times.push(millis(100_000 + i)); // publish
        }
        let (catalog, _) = catalog_at(times);
        let author = Uuid::new_v4();
        let owner = Caller::user(author);

        for i in 0..25 {
            let post = catalog
                .create(draft_input(&format!("Post number {i}")), author)
                .await
                .unwrap();
            catalog.publish(post.id, &owner).await.unwrap();
        }

        let page = catalog.list_published(PageRequest::new(2, 10)).await.unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.limit, 10);
        assert_eq!(page.meta.total_items, 25);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_next_page);
        assert!(page.meta.has_previous_page);
    }

    #[tokio::test]
    async fn list_published_orders_by_publish_time_desc() {
        let times = vec![
            millis(1000),
            millis(2000),
            // Publish in reverse of creation order.
            millis(50_000),
            millis(40_000),
        ];
        let (catalog, _) = catalog_at(times);
        let author = Uuid::new_v4();
        let owner = Caller::user(author);

        let first = catalog.create(draft_input("First created"), author).await.unwrap();
        let second = catalog.create(draft_input("Second created"), author).await.unwrap();
        catalog.publish(first.id, &owner).await.unwrap();
        catalog.publish(second.id, &owner).await.unwrap();

        let page = catalog.list_published(PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.items[0].id, first.id);
        assert_eq!(page.items[1].id, second.id);
    }

    #[tokio::test]
    async fn list_published_excludes_drafts_and_archived() {
        let (catalog, _) = catalog_at(vec![millis(1000), millis(2000), millis(3000), millis(4000)]);
        let author = Uuid::new_v4();
        let owner = Caller::user(author);

        catalog.create(draft_input("Still a draft"), author).await.unwrap();
        let published = catalog.create(draft_input("Published one"), author).await.unwrap();
        catalog.publish(published.id, &owner).await.unwrap();

        let page = catalog.list_published(PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.meta.total_items, 1);
        assert_eq!(page.items[0].id, published.id);
    }

    #[tokio::test]
    async fn list_mine_returns_all_statuses_for_that_author_only() {
        let (catalog, _) = catalog_at(vec![millis(1000), millis(2000), millis(3000)]);
        let author = Uuid::new_v4();
        let other = Uuid::new_v4();

        let mine = catalog.create(draft_input("My draft"), author).await.unwrap();
        catalog.create(draft_input("Someone elses"), other).await.unwrap();

        let page = catalog
            .list_mine(author, PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.meta.total_items, 1);
        assert_eq!(page.items[0].id, mine.id);
    }

    #[tokio::test]
    async fn list_for_admin_sees_every_status_newest_created_first() {
        let (catalog, _) = catalog_at(vec![millis(1000), millis(2000), millis(3000)]);
        let author = Uuid::new_v4();

        let older = catalog.create(draft_input("Older"), author).await.unwrap();
        let newer = catalog.create(draft_input("Newer"), author).await.unwrap();

        let page = catalog.list_for_admin(PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.meta.total_items, 2);
        assert_eq!(page.items[0].id, newer.id);
        assert_eq!(page.items[1].id, older.id);
    }
}
