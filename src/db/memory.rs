//! In-memory store used by router tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeSet;
use tokio::sync::RwLock;

use crate::error::{AppError, Result};
use crate::models::{
    Comment, CreateCommentRequest, CreatePostRequest, CreateReplyRequest, LikeToggle, Post, Reply,
};

use super::{CommentStore, LikeStore, PostStore, ReplyStore, Store};

#[derive(Default)]
struct Tables {
    posts: Vec<Post>,
    replies: Vec<Reply>,
    likes: BTreeSet<(i64, String)>,
    comments: Vec<Comment>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn post_exists(&self, post_id: i64) -> bool {
        self.posts.iter().any(|p| p.id == post_id)
    }

    fn like_count(&self, post_id: i64) -> i64 {
        self.likes.iter().filter(|(id, _)| *id == post_id).count() as i64
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, req: &CreatePostRequest) -> Result<Post> {
        let mut tables = self.tables.write().await;
        let post = Post {
            id: tables.next_id(),
            email: req.email.clone(),
            content: req.content.clone(),
            created_at: Utc::now(),
            like_count: 0,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .rev()
            .map(|p| Post {
                like_count: tables.like_count(p.id),
                ..p.clone()
            })
            .collect())
    }
}

#[async_trait]
impl ReplyStore for MemoryStore {
    async fn create_reply(&self, req: &CreateReplyRequest) -> Result<Reply> {
        let mut tables = self.tables.write().await;
        if !tables.post_exists(req.post_id) {
            return Err(AppError::NotFound(format!("Post {} not found", req.post_id)));
        }
        let reply = Reply {
            id: tables.next_id(),
            post_id: req.post_id,
            email: req.email.clone(),
            content: req.content.clone(),
            created_at: Utc::now(),
        };
        tables.replies.push(reply.clone());
        Ok(reply)
    }

    async fn list_replies(&self, post_id: i64) -> Result<Vec<Reply>> {
        let tables = self.tables.read().await;
        Ok(tables
            .replies
            .iter()
            .rev()
            .filter(|r| r.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LikeStore for MemoryStore {
    async fn toggle_like(&self, post_id: i64, email: &str) -> Result<LikeToggle> {
        let mut tables = self.tables.write().await;
        if !tables.post_exists(post_id) {
            return Err(AppError::NotFound(format!("Post {} not found", post_id)));
        }
        let key = (post_id, email.to_string());
        let liked = if tables.likes.remove(&key) {
            false
        } else {
            tables.likes.insert(key)
        };
        Ok(LikeToggle {
            post_id,
            email: email.to_string(),
            liked,
            like_count: tables.like_count(post_id),
        })
    }

    async fn count_likes(&self, post_id: i64) -> Result<i64> {
        Ok(self.tables.read().await.like_count(post_id))
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create_comment(&self, req: &CreateCommentRequest) -> Result<Comment> {
        let mut tables = self.tables.write().await;
        let comment = Comment {
            id: tables.next_id(),
            email: req.email.clone(),
            comment: req.comment.clone(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self) -> Result<Vec<Comment>> {
        Ok(self.tables.read().await.comments.iter().rev().cloned().collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
