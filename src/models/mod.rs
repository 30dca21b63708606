mod comment;
mod like;
mod post;
mod reply;

pub use comment::*;
pub use like::*;
pub use post::*;
pub use reply::*;
