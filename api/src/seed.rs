//! Client for the third-party endpoint that supplies sample posts.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::Post;

pub const DEFAULT_SEED_URL: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed source unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("seed source answered {0}")]
    Status(StatusCode),
    #[error("seed source returned a malformed body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Supplies the full sample dataset used to populate an empty store.
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Post>, SeedError>;
}

#[derive(Clone, Debug)]
pub struct HttpSeedSource {
    client: Client,
    url: String,
}

impl HttpSeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch_all(&self) -> Result<Vec<Post>, SeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(SeedError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status(status));
        }

        response.json::<Vec<Post>>().await.map_err(SeedError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode as AxumStatus, routing::get};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/posts")
    }

    #[tokio::test]
    async fn fetch_all_decodes_posts_and_ignores_extra_fields() {
        let router = Router::new().route(
            "/posts",
            get(|| async {
                Json(serde_json::json!([
                    { "userId": 1, "id": 1, "title": "first", "body": "one" },
                    { "userId": 1, "id": 2, "title": "second", "body": "two" }
                ]))
            }),
        );
        let source = HttpSeedSource::new(serve(router).await);

        let posts = source.fetch_all().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, 2);
        assert_eq!(posts[1].title, "second");
    }

    #[tokio::test]
    async fn fetch_all_surfaces_non_success_status() {
        let router = Router::new().route("/posts", get(|| async { AxumStatus::BAD_GATEWAY }));
        let source = HttpSeedSource::new(serve(router).await);

        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, SeedError::Status(status) if status.as_u16() == 502));
    }

    #[tokio::test]
    async fn fetch_all_surfaces_malformed_body() {
        let router = Router::new().route("/posts", get(|| async { "not json" }));
        let source = HttpSeedSource::new(serve(router).await);

        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, SeedError::Decode(_)));
    }

    #[tokio::test]
    async fn fetch_all_surfaces_transport_errors() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSeedSource::new(format!("http://{addr}/posts"));
        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, SeedError::Transport(_)));
    }
}
