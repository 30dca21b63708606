use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, CreateCommentRequest};

#[async_trait]
impl super::CommentStore for super::Database {
    async fn create_comment(&self, req: &CreateCommentRequest) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (email, comment, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id, email, comment, created_at
            "#,
        )
        .bind(&req.email)
        .bind(&req.comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_comments(&self) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, email, comment, created_at FROM comments ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
