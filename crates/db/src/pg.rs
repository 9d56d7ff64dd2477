//! PostgreSQL-backed store delegating to the repositories.

use async_trait::async_trait;
use parky_core::types::DbId;

use crate::models::park::Park;
use crate::models::trail::Trail;
use crate::repositories::{ParkRepo, TrailRepo};
use crate::store::{ParkStore, StoreHealth, StoreResult, TrailStore};
use crate::DbPool;

/// Store backed by a PostgreSQL connection pool.
///
/// Name uniqueness and the park foreign key are enforced by constraints, so
/// a lost check-then-create race surfaces as a unique violation.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParkStore for PgStore {
    async fn list(&self) -> StoreResult<Vec<Park>> {
        Ok(ParkRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Park>> {
        Ok(ParkRepo::find_by_id(&self.pool, id).await?)
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        Ok(ParkRepo::exists_by_name(&self.pool, name).await?)
    }

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool> {
        Ok(ParkRepo::exists_by_id(&self.pool, id).await?)
    }

    async fn create(&self, park: &Park) -> StoreResult<Park> {
        Ok(ParkRepo::create(&self.pool, park).await?)
    }

    async fn update(&self, park: &Park) -> StoreResult<bool> {
        Ok(ParkRepo::update(&self.pool, park).await?)
    }

    async fn delete(&self, park: &Park) -> StoreResult<bool> {
        Ok(ParkRepo::delete(&self.pool, park.id).await?)
    }
}

#[async_trait]
impl TrailStore for PgStore {
    async fn list(&self) -> StoreResult<Vec<Trail>> {
        Ok(TrailRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Trail>> {
        Ok(TrailRepo::find_by_id(&self.pool, id).await?)
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        Ok(TrailRepo::exists_by_name(&self.pool, name).await?)
    }

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool> {
        Ok(TrailRepo::exists_by_id(&self.pool, id).await?)
    }

    async fn create(&self, trail: &Trail) -> StoreResult<Trail> {
        Ok(TrailRepo::create(&self.pool, trail).await?)
    }

    async fn update(&self, trail: &Trail) -> StoreResult<bool> {
        Ok(TrailRepo::update(&self.pool, trail).await?)
    }

    async fn delete(&self, trail: &Trail) -> StoreResult<bool> {
        Ok(TrailRepo::delete(&self.pool, trail.id).await?)
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
