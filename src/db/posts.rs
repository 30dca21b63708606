use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CreatePostRequest, Post};

#[async_trait]
impl super::PostStore for super::Database {
    async fn create_post(&self, req: &CreatePostRequest) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (email, content, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id, email, content, created_at, 0::BIGINT AS like_count
            "#,
        )
        .bind(&req.email)
        .bind(&req.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT
                p.id,
                p.email,
                p.content,
                p.created_at,
                COUNT(l.post_id) AS like_count
            FROM posts p
            LEFT JOIN likes l ON l.post_id = p.id
            GROUP BY p.id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}
