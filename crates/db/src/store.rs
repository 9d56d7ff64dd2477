//! Repository interface consumed by the HTTP handlers.
//!
//! Two backends implement these traits: [`crate::PgStore`] over PostgreSQL
//! and [`crate::MemoryStore`] for local runs and tests.

use async_trait::async_trait;
use parky_core::types::DbId;

use crate::models::park::Park;
use crate::models::trail::Trail;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{entity} named '{name}' already exists")]
    Duplicate { entity: &'static str, name: String },

    #[error("{entity} with id {id} does not exist")]
    MissingParent { entity: &'static str, id: DbId },
}

impl StoreError {
    /// `true` if the store rejected the write because a unique name was taken.
    ///
    /// Only PostgreSQL constraints following the `uq_` naming convention count.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Duplicate { .. } => true,
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                    && db_err
                        .constraint()
                        .is_some_and(|name| name.starts_with("uq_"))
            }
            _ => false,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Normalized form used for name uniqueness: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Persistence operations for parks.
#[async_trait]
pub trait ParkStore: Send + Sync {
    /// All parks, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Park>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Park>>;

    /// Case-insensitive, whitespace-trimmed name lookup.
    async fn exists_by_name(&self, name: &str) -> StoreResult<bool>;

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool>;

    /// Insert `park`, ignoring its `id` and `created`. Returns the stored row.
    async fn create(&self, park: &Park) -> StoreResult<Park>;

    /// Replace the mutable fields of the row with `park.id`.
    /// Returns `false` if no such row exists.
    async fn update(&self, park: &Park) -> StoreResult<bool>;

    /// Remove the row with `park.id` together with its trails.
    /// Returns `false` if no such row exists.
    async fn delete(&self, park: &Park) -> StoreResult<bool>;
}

/// Persistence operations for trails. Reads populate [`Trail::park`].
#[async_trait]
pub trait TrailStore: Send + Sync {
    /// All trails, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Trail>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Trail>>;

    /// Case-insensitive, whitespace-trimmed name lookup.
    async fn exists_by_name(&self, name: &str) -> StoreResult<bool>;

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool>;

    /// Insert `trail`, ignoring its `id`, `date_created` and `park`.
    async fn create(&self, trail: &Trail) -> StoreResult<Trail>;

    /// Replace the mutable fields of the row with `trail.id`.
    /// `date_created` is never modified.
    async fn update(&self, trail: &Trail) -> StoreResult<bool>;

    async fn delete(&self, trail: &Trail) -> StoreResult<bool>;
}

/// Liveness probe for the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}
