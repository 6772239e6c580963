/// Data models for trending-service
///
/// - `PostEngagement`: one post plus its interaction counts, as read from storage
/// - `Author`, `Tag`: enrichment rows joined onto ranked posts
/// - `TrendingPost`, `PopularPost`, `PopularUser`: API response shapes
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Publication status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
        }
    }

    /// Only the exact column value `published` is public.
    pub fn from_db(value: &str) -> Self {
        match value {
            "published" => Self::Published,
            _ => Self::Draft,
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Distinct-row interaction counts for one post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionCounts {
    pub likes: u64,
    pub comments: u64,
    pub saves: u64,
}

impl InteractionCounts {
    pub fn new(likes: u64, comments: u64, saves: u64) -> Self {
        Self {
            likes,
            comments,
            saves,
        }
    }
}

/// A post with the counts the rankers consume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostEngagement {
    pub post_id: i64,
    pub author_id: i64,
    pub title: String,
    pub status: PostStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub counts: InteractionCounts,
}

impl PostEngagement {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Post author as shown next to ranked content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Tag attached to a post (batch enrichment row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTag {
    pub post_id: i64,
    pub tag: Tag,
}

/// Trending list entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendingPost {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub likes_count: u64,
    pub comments_count: u64,
    pub saves_count: u64,
    pub trending_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Author>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// One page of the trending list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendingPage {
    pub data: Vec<TrendingPost>,
    pub current_page: usize,
    pub per_page: usize,
    pub total: usize,
    pub last_page: usize,
    pub as_of: DateTime<Utc>,
}

/// "Most popular" entry (likes + saves, no decay)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PopularPost {
    pub id: i64,
    pub title: String,
    pub likes_count: u64,
    pub saves_count: u64,
}

/// "Popular skaters" entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PopularUser {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub total_trending_score: f64,
}
