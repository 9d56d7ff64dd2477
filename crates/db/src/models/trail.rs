//! Trail entity model and DTOs.

use parky_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::difficulty::Difficulty;
use crate::models::not_whitespace;
use crate::models::park::{Park, ParkDto};

/// A trail row from the `trails` table, with its owning park when loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trail {
    pub id: DbId,
    pub name: String,
    pub distance: f64,
    pub elevation: f64,
    pub difficulty: Difficulty,
    pub park_id: DbId,
    pub date_created: Timestamp,
    /// Populated by reads; never written.
    pub park: Option<Park>,
}

/// Read shape for trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailDto {
    pub id: DbId,
    pub name: String,
    pub distance: f64,
    pub elevation: f64,
    pub difficulty: Difficulty,
    pub park_id: DbId,
    pub date_created: Timestamp,
    #[serde(default)]
    pub park: Option<ParkDto>,
}

/// DTO for creating a new trail. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateTrail {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    #[validate(custom(function = "not_whitespace", message = "name must not be blank"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "distance must not be negative"))]
    pub distance: f64,
    #[validate(range(min = 0.0, message = "elevation must not be negative"))]
    pub elevation: f64,
    pub difficulty: Difficulty,
    pub park_id: DbId,
}

/// DTO for replacing a trail's mutable fields. `id` must match the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateTrail {
    pub id: DbId,
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    #[validate(custom(function = "not_whitespace", message = "name must not be blank"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "distance must not be negative"))]
    pub distance: f64,
    #[validate(range(min = 0.0, message = "elevation must not be negative"))]
    pub elevation: f64,
    pub difficulty: Difficulty,
    pub park_id: DbId,
}
