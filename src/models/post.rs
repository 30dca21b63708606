use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A post, annotated with its current like count
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    /// Author email
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Number of likes, computed at read time
    pub like_count: i64,
}

/// Request to create a new post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub email: String,
    pub content: String,
}

/// Request to filter posts by topical relevance
#[derive(Debug, Deserialize)]
pub struct FilterPostsRequest {
    pub topic: String,
    pub posts: Vec<FilterCandidate>,
}

/// A post submitted for relevance filtering
#[derive(Debug, Clone, Deserialize)]
pub struct FilterCandidate {
    pub id: i64,
    pub content: String,
}
