use crate::services::PostService;
use std::sync::Arc;

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// Built once at startup and cloned into every handler.
///
/// `PostService` holds the connection pool and the seed client, both of which
/// are cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(posts: PostService, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            posts,
            api_key: api_key.into(),
        }
    }
}
