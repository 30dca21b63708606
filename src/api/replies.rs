use axum::{extract::State, http::StatusCode, Json};

use crate::{
    db::ReplyStore,
    error::Result,
    extract::{JsonBody, QueryParams},
    models::{CreateReplyRequest, PostIdQuery, Reply},
    AppState,
};

/// Reply to a post
pub async fn create_reply(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateReplyRequest>,
) -> Result<(StatusCode, Json<Reply>)> {
    let reply = state.store.create_reply(&req).await?;
    Ok((StatusCode::CREATED, Json(reply)))
}

/// List replies to a post (`?post_id=`), newest first
pub async fn list_replies(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PostIdQuery>,
) -> Result<Json<Vec<Reply>>> {
    let replies = state.store.list_replies(query.post_id).await?;
    Ok(Json(replies))
}
