//! Shared fixtures for trending-service integration tests

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use trending_service::db::EngagementStore;
use trending_service::error::{AppError, Result};
use trending_service::models::{
    Author, InteractionCounts, PostEngagement, PostStatus, PostTag, Tag,
};

/// In-memory `EngagementStore` with the same filtering as the Postgres repo
#[derive(Default)]
pub struct InMemoryStore {
    pub posts: Vec<PostEngagement>,
    pub authors: Vec<Author>,
    pub tags: Vec<PostTag>,
    pub fail_with: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(mut self, id: i64, username: &str) -> Self {
        self.authors.push(Author {
            id,
            name: username.to_uppercase(),
            username: username.to_string(),
        });
        self
    }

    pub fn with_post(mut self, post: PostEngagement) -> Self {
        self.posts.push(post);
        self
    }

    pub fn with_tag(mut self, post_id: i64, tag_id: i64, name: &str) -> Self {
        self.tags.push(PostTag {
            post_id,
            tag: Tag {
                id: tag_id,
                name: name.to_string(),
            },
        });
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    fn check_available(&self) -> Result<()> {
        match &self.fail_with {
            Some(message) => Err(AppError::Database(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EngagementStore for InMemoryStore {
    async fn engagement_since(&self, since: DateTime<Utc>) -> Result<Vec<PostEngagement>> {
        self.check_available()?;
        Ok(self
            .posts
            .iter()
            .filter(|p| p.is_published() && p.created_at.is_some_and(|c| c >= since))
            .cloned()
            .collect())
    }

    async fn published_engagement(&self) -> Result<Vec<PostEngagement>> {
        self.check_available()?;
        Ok(self
            .posts
            .iter()
            .filter(|p| p.is_published())
            .cloned()
            .collect())
    }

    async fn authors(&self, user_ids: &[i64]) -> Result<Vec<Author>> {
        self.check_available()?;
        Ok(self
            .authors
            .iter()
            .filter(|a| user_ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn tags_for_posts(&self, post_ids: &[i64]) -> Result<Vec<PostTag>> {
        self.check_available()?;
        Ok(self
            .tags
            .iter()
            .filter(|t| post_ids.contains(&t.post_id))
            .cloned()
            .collect())
    }
}

/// Published post created `age` before now
pub fn published(
    id: i64,
    author_id: i64,
    age: Duration,
    likes: u64,
    comments: u64,
    saves: u64,
) -> PostEngagement {
    PostEngagement {
        post_id: id,
        author_id,
        title: format!("Post {}", id),
        status: PostStatus::Published,
        created_at: Some(Utc::now() - age),
        counts: InteractionCounts::new(likes, comments, saves),
    }
}

pub fn draft(id: i64, author_id: i64, likes: u64, comments: u64, saves: u64) -> PostEngagement {
    PostEngagement {
        status: PostStatus::Draft,
        ..published(id, author_id, Duration::hours(1), likes, comments, saves)
    }
}
