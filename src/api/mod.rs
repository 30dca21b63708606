mod comments;
mod likes;
mod posts;
mod replies;


use axum::{
    handler::Handler,
    routing::{get, post, MethodRouter},
    Router,
};

use crate::{error::AppError, AppState};

/// Build the API router
pub fn router() -> Router<AppState> {
    Router::new()
        // Posts
        .route("/api/posts/create", post(posts::create_post))
        .route("/api/posts/get", get_only(posts::list_posts))
        .route("/api/posts/filter", post(posts::filter_posts))
        // Replies
        .route("/api/replies/create", post(replies::create_reply))
        .route("/api/replies/add", post(replies::create_reply))
        .route("/api/replies/get", get_only(replies::list_replies))
        // Likes (add is an alias of toggle)
        .route("/api/likes/toggle", post(likes::toggle_like))
        .route("/api/likes/add", post(likes::toggle_like))
        .route("/api/likes/get", get_only(likes::count_likes))
        // Comments
        .route("/api/comments/post", post(comments::create_comment))
        .route("/api/comments/get", get_only(comments::list_comments))
}

/// GET route that does not also answer HEAD
pub(crate) fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).head(method_not_allowed)
}

/// Fallback for a known path with the wrong verb
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Fallback for unknown paths
pub async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}
