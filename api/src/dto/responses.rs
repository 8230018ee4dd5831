use crate::{models::Post, services::PostPage};
use serde::Serialize;

/// GET /posts response: one page plus the total row count.
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub total: i64,
}

impl From<PostPage> for PostListResponse {
    fn from(page: PostPage) -> Self {
        Self {
            posts: page.posts,
            total: page.total,
        }
    }
}
