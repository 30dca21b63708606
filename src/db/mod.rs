mod comments;
mod likes;
mod posts;
mod replies;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::{
    Comment, CreateCommentRequest, CreatePostRequest, CreateReplyRequest, LikeToggle, Post, Reply,
};

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a new post; the returned post has a like count of zero
    async fn create_post(&self, req: &CreatePostRequest) -> Result<Post>;

    /// All posts, newest first, with their like counts
    async fn list_posts(&self) -> Result<Vec<Post>>;
}

#[async_trait]
pub trait ReplyStore: Send + Sync {
    /// Insert a reply. Fails with `NotFound` if the post does not exist.
    async fn create_reply(&self, req: &CreateReplyRequest) -> Result<Reply>;

    /// Replies to a post, newest first. Unknown posts yield an empty list.
    async fn list_replies(&self, post_id: i64) -> Result<Vec<Reply>>;
}

#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Add the like if absent, remove it if present, atomically
    async fn toggle_like(&self, post_id: i64, email: &str) -> Result<LikeToggle>;

    async fn count_likes(&self, post_id: i64) -> Result<i64>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create_comment(&self, req: &CreateCommentRequest) -> Result<Comment>;

    /// All comments, newest first
    async fn list_comments(&self) -> Result<Vec<Comment>>;
}

/// Everything the HTTP layer needs from persistence
#[async_trait]
pub trait Store: PostStore + ReplyStore + LikeStore + CommentStore {
    /// Check the store is reachable
    async fn ping(&self) -> Result<()>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for Database {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map a foreign key violation on `post_id` to a 404
fn missing_post(post_id: i64) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::NotFound(format!("Post {} not found", post_id))
        }
        _ => AppError::Database(e),
    }
}
