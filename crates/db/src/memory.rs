//! In-process store used when no `DATABASE_URL` is configured and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parky_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::park::Park;
use crate::models::trail::Trail;
use crate::store::{
    normalize_name, ParkStore, StoreError, StoreHealth, StoreResult, TrailStore,
};

#[derive(Default)]
struct Tables {
    parks: BTreeMap<DbId, Park>,
    trails: BTreeMap<DbId, Trail>,
    last_park_id: DbId,
    last_trail_id: DbId,
}

impl Tables {
    fn park_name_taken(&self, name: &str, except: Option<DbId>) -> bool {
        let wanted = normalize_name(name);
        self.parks
            .values()
            .any(|p| Some(p.id) != except && normalize_name(&p.name) == wanted)
    }

    fn trail_name_taken(&self, name: &str, except: Option<DbId>) -> bool {
        let wanted = normalize_name(name);
        self.trails
            .values()
            .any(|t| Some(t.id) != except && normalize_name(&t.name) == wanted)
    }

    /// Clone a trail and attach its park, as the SQL join does.
    fn load_trail(&self, trail: &Trail) -> Trail {
        Trail {
            park: self.parks.get(&trail.park_id).cloned(),
            ..trail.clone()
        }
    }
}

/// Thread-safe in-memory store holding both parks and trails.
///
/// Every write runs its uniqueness and foreign-key checks under the same
/// write lock as the mutation, so concurrent creates cannot both succeed.
/// Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn park_count(&self) -> usize {
        self.tables.read().await.parks.len()
    }

    pub async fn trail_count(&self) -> usize {
        self.tables.read().await.trails.len()
    }
}

#[async_trait]
impl ParkStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Park>> {
        Ok(self.tables.read().await.parks.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Park>> {
        Ok(self.tables.read().await.parks.get(&id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        Ok(self.tables.read().await.park_name_taken(name, None))
    }

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.read().await.parks.contains_key(&id))
    }

    async fn create(&self, park: &Park) -> StoreResult<Park> {
        let mut tables = self.tables.write().await;
        if tables.park_name_taken(&park.name, None) {
            return Err(StoreError::Duplicate {
                entity: "Park",
                name: park.name.clone(),
            });
        }
        tables.last_park_id += 1;
        let stored = Park {
            id: tables.last_park_id,
            created: Utc::now(),
            ..park.clone()
        };
        tables.parks.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, park: &Park) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.parks.contains_key(&park.id) {
            return Ok(false);
        }
        if tables.park_name_taken(&park.name, Some(park.id)) {
            return Err(StoreError::Duplicate {
                entity: "Park",
                name: park.name.clone(),
            });
        }
        if let Some(existing) = tables.parks.get_mut(&park.id) {
            existing.name = park.name.clone();
            existing.state = park.state.clone();
            existing.picture = park.picture.clone();
            existing.established = park.established;
        }
        Ok(true)
    }

    async fn delete(&self, park: &Park) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.parks.remove(&park.id).is_none() {
            return Ok(false);
        }
        let before = tables.trails.len();
        tables.trails.retain(|_, t| t.park_id != park.id);
        let removed = before - tables.trails.len();
        if removed > 0 {
            tracing::debug!(park_id = park.id, removed, "Cascaded delete to trails");
        }
        Ok(true)
    }
}

#[async_trait]
impl TrailStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Trail>> {
        let tables = self.tables.read().await;
        Ok(tables.trails.values().map(|t| tables.load_trail(t)).collect())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Trail>> {
        let tables = self.tables.read().await;
        Ok(tables.trails.get(&id).map(|t| tables.load_trail(t)))
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        Ok(self.tables.read().await.trail_name_taken(name, None))
    }

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.read().await.trails.contains_key(&id))
    }

    async fn create(&self, trail: &Trail) -> StoreResult<Trail> {
        let mut tables = self.tables.write().await;
        if !tables.parks.contains_key(&trail.park_id) {
            return Err(StoreError::MissingParent {
                entity: "Park",
                id: trail.park_id,
            });
        }
        if tables.trail_name_taken(&trail.name, None) {
            return Err(StoreError::Duplicate {
                entity: "Trail",
                name: trail.name.clone(),
            });
        }
        tables.last_trail_id += 1;
        let stored = Trail {
            id: tables.last_trail_id,
            date_created: Utc::now(),
            park: None,
            ..trail.clone()
        };
        tables.trails.insert(stored.id, stored.clone());
        Ok(tables.load_trail(&stored))
    }

    async fn update(&self, trail: &Trail) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.trails.contains_key(&trail.id) {
            return Ok(false);
        }
        if !tables.parks.contains_key(&trail.park_id) {
            return Err(StoreError::MissingParent {
                entity: "Park",
                id: trail.park_id,
            });
        }
        if tables.trail_name_taken(&trail.name, Some(trail.id)) {
            return Err(StoreError::Duplicate {
                entity: "Trail",
                name: trail.name.clone(),
            });
        }
        if let Some(existing) = tables.trails.get_mut(&trail.id) {
            existing.name = trail.name.clone();
            existing.distance = trail.distance;
            existing.elevation = trail.elevation;
            existing.difficulty = trail.difficulty;
            existing.park_id = trail.park_id;
        }
        Ok(true)
    }

    async fn delete(&self, trail: &Trail) -> StoreResult<bool> {
        Ok(self.tables.write().await.trails.remove(&trail.id).is_some())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
