use axum::{extract::State, http::StatusCode, Json};

use crate::{
    db::CommentStore,
    error::Result,
    extract::JsonBody,
    models::{Comment, CreateCommentRequest},
    AppState,
};

pub async fn create_comment(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>)> {
    let comment = state.store.create_comment(&req).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_comments(State(state): State<AppState>) -> Result<Json<Vec<Comment>>> {
    let comments = state.store.list_comments().await?;
    Ok(Json(comments))
}
