/// Engagement Repository
///
/// Postgres reads for the rankers. Counts come from correlated subqueries
/// so a post with no likes, comments or saves still yields a row.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error};

use super::EngagementStore;
use crate::error::{AppError, Result};
use crate::models::{Author, InteractionCounts, PostEngagement, PostStatus, PostTag, Tag};

type EngagementRow = (
    i64,
    i64,
    String,
    String,
    Option<DateTime<Utc>>,
    i64,
    i64,
    i64,
);

const ENGAGEMENT_SELECT: &str = r#"
    SELECT
        p.id,
        p.user_id,
        p.title,
        p.status,
        p.created_at,
        l.like_count,
        c.comment_count,
        s.save_count
    FROM posts p
    LEFT JOIN LATERAL (
        SELECT COUNT(*) AS like_count FROM likes WHERE likes.post_id = p.id
    ) l ON TRUE
    LEFT JOIN LATERAL (
        SELECT COUNT(*) AS comment_count FROM comments WHERE comments.post_id = p.id
    ) c ON TRUE
    LEFT JOIN LATERAL (
        SELECT COUNT(*) AS save_count FROM post_saves WHERE post_saves.post_id = p.id
    ) s ON TRUE
"#;

fn count(value: i64) -> u64 {
    value.max(0) as u64
}

fn into_engagement(row: EngagementRow) -> PostEngagement {
    let (post_id, author_id, title, status, created_at, likes, comments, saves) = row;
    PostEngagement {
        post_id,
        author_id,
        title,
        status: PostStatus::from_db(&status),
        created_at,
        counts: InteractionCounts::new(count(likes), count(comments), count(saves)),
    }
}

pub struct PgEngagementRepo {
    pool: PgPool,
}

impl PgEngagementRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementStore for PgEngagementRepo {
    async fn engagement_since(&self, since: DateTime<Utc>) -> Result<Vec<PostEngagement>> {
        let query = format!(
            "{} WHERE p.status = 'published' AND p.created_at IS NOT NULL AND p.created_at >= $1",
            ENGAGEMENT_SELECT
        );

        let rows = sqlx::query_as::<_, EngagementRow>(&query)
            .bind(since)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to load engagement since {}: {}", since, e);
                AppError::Database(e.to_string())
            })?;

        debug!("Loaded {} candidate posts since {}", rows.len(), since);
        Ok(rows.into_iter().map(into_engagement).collect())
    }

    async fn published_engagement(&self) -> Result<Vec<PostEngagement>> {
        let query = format!("{} WHERE p.status = 'published'", ENGAGEMENT_SELECT);

        let rows = sqlx::query_as::<_, EngagementRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to load published engagement: {}", e);
                AppError::Database(e.to_string())
            })?;

        Ok(rows.into_iter().map(into_engagement).collect())
    }

    async fn authors(&self, user_ids: &[i64]) -> Result<Vec<Author>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, (i64, String, String)>(
            r#"
            SELECT id, name, username
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to load {} authors: {}", user_ids.len(), e);
            AppError::Database(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(|(id, name, username)| Author { id, name, username })
            .collect())
    }

    async fn tags_for_posts(&self, post_ids: &[i64]) -> Result<Vec<PostTag>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, (i64, i64, String)>(
            r#"
            SELECT pt.post_id, t.id, t.name
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY pt.post_id, t.name
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to load tags for {} posts: {}", post_ids.len(), e);
            AppError::Database(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(|(post_id, id, name)| PostTag {
                post_id,
                tag: Tag { id, name },
            })
            .collect())
    }
}
