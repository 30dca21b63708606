use axum::{extract::State, Json};

use crate::{
    db::LikeStore,
    error::Result,
    extract::{JsonBody, QueryParams},
    models::{LikeCountResponse, LikeToggle, PostIdQuery, ToggleLikeRequest},
    AppState,
};

/// Like a post, or unlike it if this email already liked it
pub async fn toggle_like(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ToggleLikeRequest>,
) -> Result<Json<LikeToggle>> {
    let toggle = state.store.toggle_like(req.post_id, &req.email).await?;

    tracing::debug!(
        post_id = toggle.post_id,
        liked = toggle.liked,
        like_count = toggle.like_count,
        "Like toggled"
    );

    Ok(Json(toggle))
}

/// Like count for a post (`?post_id=`)
pub async fn count_likes(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PostIdQuery>,
) -> Result<Json<LikeCountResponse>> {
    let like_count = state.store.count_likes(query.post_id).await?;
    Ok(Json(LikeCountResponse { like_count }))
}
