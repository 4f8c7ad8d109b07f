//! Post status transitions.
//!
//! Every status change goes through here so the side effects (timestamp
//! updates) are defined once. Ownership is checked by the catalog before a
//! transition; the transition itself is unconditional.

use chrono::{DateTime, Utc};

use crate::domain::{Post, PostStatus};

/// Make a post publicly visible now.
///
/// Allowed from any current status; republishing an archived post refreshes
/// `published_at`.
pub fn publish(post: &mut Post, now: DateTime<Utc>) {
    post.status = PostStatus::Published;
    post.published_at = Some(now);
    post.updated_at = now;
}

/// Take a post out of public circulation.
///
/// `published_at` is left untouched: it records when the post was last
/// published, and that history survives archiving.
pub fn archive(post: &mut Post, now: DateTime<Utc>) {
    post.status = PostStatus::Archived;
    post.updated_at = now;
}
