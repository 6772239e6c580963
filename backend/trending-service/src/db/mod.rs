use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Author, PostEngagement, PostTag};

pub mod engagement_repo;

pub use engagement_repo::PgEngagementRepo;

/// Read-only view of posts and their interaction counts.
///
/// Counts are distinct rows per post (one like per user, every comment
/// including replies, one save per user).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementStore: Send + Sync {
    /// Published posts created at or after `since`
    async fn engagement_since(&self, since: DateTime<Utc>) -> Result<Vec<PostEngagement>>;

    /// Every published post, regardless of age
    async fn published_engagement(&self) -> Result<Vec<PostEngagement>>;

    async fn authors(&self, user_ids: &[i64]) -> Result<Vec<Author>>;

    async fn tags_for_posts(&self, post_ids: &[i64]) -> Result<Vec<PostTag>>;
}
