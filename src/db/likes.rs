use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::LikeToggle;

#[async_trait]
impl super::LikeStore for super::Database {
    /// Toggle a like under a row lock on the post.
    ///
    /// Toggles on the same post queue behind `FOR NO KEY UPDATE`, so each one
    /// sees the committed result of the previous and two toggles always
    /// cancel out. The lock does not block the FK check on `likes` inserts.
    async fn toggle_like(&self, post_id: i64, email: &str) -> Result<LikeToggle> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1 FOR NO KEY UPDATE")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO likes (post_id, email, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (post_id, email) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(email)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if !inserted {
            sqlx::query("DELETE FROM likes WHERE post_id = $1 AND email = $2")
                .bind(post_id)
                .bind(email)
                .execute(&mut *tx)
                .await?;
        }

        let like_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(LikeToggle {
            post_id,
            email: email.to_string(),
            liked: inserted,
            like_count,
        })
    }

    async fn count_likes(&self, post_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
