//! Read and mutation access policies.
//!
//! Pure predicates over `(post, caller)` pairs. The catalog decides how a
//! denial is surfaced: read denials become NotFound, mutation denials become
//! Forbidden.

use crate::domain::{Caller, Post, PostStatus, Role};

/// Whether `caller` may read `post`.
///
/// Admins see everything, authors see their own posts in any status,
/// everyone else only sees published posts.
pub fn can_read(post: &Post, caller: &Caller) -> bool {
    match caller {
        Caller::Authenticated {
            role: Role::Admin, ..
        } => true,
        Caller::Authenticated { id, .. } if *id == post.author_id => true,
        _ => post.status == PostStatus::Published,
    }
}

/// Whether `caller` may update, publish, or archive `post`.
///
/// Admin or owner. Deletion is stricter (admin only) and gated at the
/// boundary before the catalog is reached.
pub fn can_mutate(post: &Post, caller: &Caller) -> bool {
    match caller {
        Caller::Anonymous => false,
        Caller::Authenticated {
            role: Role::Admin, ..
        } => true,
        Caller::Authenticated { id, .. } => *id == post.author_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn post_with_status(author_id: Uuid, status: PostStatus) -> Post {
        let mut post = Post::new(
            author_id,
            "Title".to_string(),
            "Content".to_string(),
            "title-abc".to_string(),
            None,
            Utc::now(),
        );
        post.status = status;
        post
    }

    #[test]
    fn admin_reads_any_status() {
        let author = Uuid::new_v4();
        let admin = Caller::admin(Uuid::new_v4());

        for status in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
            assert!(can_read(&post_with_status(author, status), &admin));
        }
    }

    #[test]
    fn author_reads_own_post_in_any_status() {
        let author = Uuid::new_v4();
        let caller = Caller::user(author);

        for status in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
            assert!(can_read(&post_with_status(author, status), &caller));
        }
    }

    #[test]
    fn anonymous_reads_published_only() {
        let author = Uuid::new_v4();

        assert!(can_read(
            &post_with_status(author, PostStatus::Published),
            &Caller::Anonymous
        ));
        assert!(!can_read(
            &post_with_status(author, PostStatus::Draft),
            &Caller::Anonymous
        ));
        assert!(!can_read(
            &post_with_status(author, PostStatus::Archived),
            &Caller::Anonymous
        ));
    }

    #[test]
    fn unrelated_user_reads_published_only() {
        let author = Uuid::new_v4();
        let other = Caller::user(Uuid::new_v4());

        assert!(can_read(&post_with_status(author, PostStatus::Published), &other));
        assert!(!can_read(&post_with_status(author, PostStatus::Draft), &other));
        assert!(!can_read(&post_with_status(author, PostStatus::Archived), &other));
    }

    #[test]
    fn mutation_allowed_for_owner_and_admin_only() {
        let author = Uuid::new_v4();
        let post = post_with_status(author, PostStatus::Draft);

        assert!(can_mutate(&post, &Caller::user(author)));
        assert!(can_mutate(&post, &Caller::admin(Uuid::new_v4())));
        assert!(!can_mutate(&post, &Caller::user(Uuid::new_v4())));
        assert!(!can_mutate(&post, &Caller::Anonymous));
    }
}
