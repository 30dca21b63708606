use axum::{extract::State, http::StatusCode, Json};
use futures::stream::{self, StreamExt};

use crate::{
    db::PostStore,
    error::{AppError, Result},
    extract::JsonBody,
    models::{CreatePostRequest, FilterPostsRequest, Post},
    AppState,
};

/// Create a new post
pub async fn create_post(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>)> {
    let post = state.store.create_post(&req).await?;

    tracing::debug!(post_id = post.id, "Post created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// List all posts, newest first, with like counts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>> {
    let posts = state.store.list_posts().await?;
    Ok(Json(posts))
}

/// Upper bound on classifier calls in flight for one filter request
pub const MAX_CONCURRENT_JUDGMENTS: usize = 8;

/// Return the ids of the submitted posts that are about the topic
///
/// At most [`MAX_CONCURRENT_JUDGMENTS`] judgments run at once; ids keep
/// their input order. One failed judgment fails the whole request.
pub async fn filter_posts(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<FilterPostsRequest>,
) -> Result<Json<Vec<i64>>> {
    if req.posts.is_empty() {
        return Ok(Json(vec![]));
    }

    let classifier = state
        .classifier
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("Relevance classifier is not configured".to_string()))?;

    let judgments: Vec<_> = req
        .posts
        .iter()
        .map(|p| classifier.is_relevant(&req.topic, &p.content))
        .collect();

    let verdicts: Vec<_> = stream::iter(judgments)
        .buffered(MAX_CONCURRENT_JUDGMENTS)
        .collect()
        .await;

    let mut relevant = Vec::new();
    for (post, verdict) in req.posts.iter().zip(verdicts) {
        if verdict.map_err(AppError::Classifier)? {
            relevant.push(post.id);
        }
    }

    tracing::debug!(
        topic = %req.topic,
        submitted = req.posts.len(),
        relevant = relevant.len(),
        "Posts filtered"
    );

    Ok(Json(relevant))
}
