use serde::{Deserialize, Serialize};

/// Request to like or unlike a post
#[derive(Debug, Deserialize)]
pub struct ToggleLikeRequest {
    pub post_id: i64,
    pub email: String,
}

/// Outcome of a like toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    pub post_id: i64,
    pub email: String,
    /// true if the like was added, false if it was removed
    pub liked: bool,
    /// Like count for the post after the toggle
    pub like_count: i64,
}

#[derive(Debug, Serialize)]
pub struct LikeCountResponse {
    pub like_count: i64,
}
