use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A reply to a post
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reply {
    pub id: i64,
    /// Post this reply belongs to
    pub post_id: i64,
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Request to reply to a post
#[derive(Debug, Deserialize)]
pub struct CreateReplyRequest {
    pub post_id: i64,
    pub email: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PostIdQuery {
    pub post_id: i64,
}
