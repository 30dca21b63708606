use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{CreateReplyRequest, Reply};

#[async_trait]
impl super::ReplyStore for super::Database {
    async fn create_reply(&self, req: &CreateReplyRequest) -> Result<Reply> {
        // Existence check and insert in one statement; the FK backs it up
        sqlx::query_as::<_, Reply>(
            r#"
            INSERT INTO replies (post_id, email, content, created_at)
            SELECT $1, $2, $3, NOW()
            WHERE EXISTS (SELECT 1 FROM posts WHERE id = $1)
            RETURNING id, post_id, email, content, created_at
            "#,
        )
        .bind(req.post_id)
        .bind(&req.email)
        .bind(&req.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(super::missing_post(req.post_id))?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", req.post_id)))
    }

    async fn list_replies(&self, post_id: i64) -> Result<Vec<Reply>> {
        let replies = sqlx::query_as::<_, Reply>(
            r#"
            SELECT id, post_id, email, content, created_at
            FROM replies
            WHERE post_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(replies)
    }
}
