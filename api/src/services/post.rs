use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    models::{Post, PostChanges},
    seed::{SeedError, SeedSource},
    store::{PostStore, StoreError},
};

#[derive(Debug, Error)]
pub enum PostError {
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Upstream(#[from] SeedError),
    #[error(transparent)]
    Store(sqlx::Error),
}

impl From<StoreError> for PostError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => PostError::NotFound,
            StoreError::Database(e) => PostError::Store(e),
        }
    }
}

/// One page of posts plus the size of the whole table.
#[derive(Debug)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: i64,
}

/// Read path and mutations over posts. Seeds the store from `seed` the first
/// time it is read while empty.
#[derive(Clone)]
pub struct PostService {
    store: PostStore,
    seed: Arc<dyn SeedSource>,
}

impl PostService {
    pub fn new(store: PostStore, seed: Arc<dyn SeedSource>) -> Self {
        Self { store, seed }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub async fn list(&self, skip: u32, take: u32) -> Result<PostPage, PostError> {
        // Only a truly empty table is seeded; a page past the end is just empty.
        if self.store.count().await? == 0 {
            self.seed().await?;
        }

        let posts = self.store.list_range(skip, take).await?;
        let total = self.store.count().await?;

        Ok(PostPage { posts, total })
    }

    /// Pull the sample dataset and load it, skipping ids that already exist.
    /// Safe to run concurrently or repeatedly.
    pub async fn seed(&self) -> Result<u64, PostError> {
        let posts = self.seed.fetch_all().await.inspect_err(|e| {
            warn!("Seeding failed: {}", e);
        })?;

        let inserted = self.store.bulk_insert(&posts).await?;

        info!(
            "Seeded {} of {} posts from seed source",
            inserted,
            posts.len()
        );

        Ok(inserted)
    }

    pub async fn get(&self, id: i64) -> Result<Post, PostError> {
        self.store.find_by_id(id).await?.ok_or(PostError::NotFound)
    }

    pub async fn create(&self, title: &str, body: &str) -> Result<Post, PostError> {
        let post = self.store.create(title, body).await?;

        info!("Post created: {}", post.id);

        Ok(post)
    }

    pub async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, PostError> {
        let post = self.store.update(id, &changes).await?;

        info!("Post updated: {}", post.id);

        Ok(post)
    }

    pub async fn delete(&self, id: i64) -> Result<(), PostError> {
        self.store.delete(id).await?;

        info!("Post deleted: {}", id);

        Ok(())
    }
}
