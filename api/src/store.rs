//! SQLite-backed accessor for the `post` table.

use std::str::FromStr;

use sqlx::{
    QueryBuilder, Sqlite, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use thiserror::Error;

use crate::models::{Post, PostChanges};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Stays well under SQLite's bound-parameter limit (three binds per row).
const BULK_INSERT_CHUNK: usize = 500;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS post (\
    id INTEGER PRIMARY KEY AUTOINCREMENT, \
    title TEXT NOT NULL, \
    body TEXT NOT NULL\
)";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url` (e.g. `sqlite://posts.db?mode=rwc`) and make
    /// sure the `post` table exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Private in-memory database. A single connection that never expires,
    /// since every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Rows ordered by ascending id, skipping `skip` and returning at most `take`.
    pub async fn list_range(&self, skip: u32, take: u32) -> Result<Vec<Post>, StoreError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, body FROM post ORDER BY id ASC LIMIT ? OFFSET ?",
        )
        .bind(i64::from(take))
        .bind(i64::from(skip))
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    /// Insert every post whose id is not already present. Rows with an existing
    /// id are skipped. All chunks share one transaction.
    pub async fn bulk_insert(&self, posts: &[Post]) -> Result<u64, StoreError> {
        if posts.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for chunk in posts.chunks(BULK_INSERT_CHUNK) {
            let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO post (id, title, body) ");
            qb.push_values(chunk, |mut row, post| {
                row.push_bind(post.id)
                    .push_bind(post.title.as_str())
                    .push_bind(post.body.as_str());
            });
            qb.push(" ON CONFLICT(id) DO NOTHING");

            inserted += qb.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_as::<_, Post>("SELECT id, title, body FROM post WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    /// Insert a new row; the id comes from the table's autoincrement sequence.
    pub async fn create(&self, title: &str, body: &str) -> Result<Post, StoreError> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO post (title, body) VALUES (?, ?) RETURNING id, title, body",
        )
        .bind(title)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    pub async fn update(&self, id: i64, changes: &PostChanges) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>(
            "UPDATE post SET title = COALESCE(?, title), body = COALESCE(?, body) \
             WHERE id = ? RETURNING id, title, body",
        )
        .bind(changes.title.as_deref())
        .bind(changes.body.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM post WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
