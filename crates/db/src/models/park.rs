//! Park entity model and DTOs.

use chrono::NaiveDate;
use parky_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::not_whitespace;

/// A park row from the `parks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Park {
    pub id: DbId,
    pub name: String,
    pub state: String,
    pub picture: Option<String>,
    pub established: Option<NaiveDate>,
    pub created: Timestamp,
}

/// Read and write shape for parks.
///
/// Used for list/get responses and as the body of create and update.
/// `id` is ignored on create and must match the path on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ParkDto {
    #[serde(default)]
    pub id: DbId,
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    #[validate(custom(function = "not_whitespace", message = "name must not be blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "state must be between 1 and 50 characters"))]
    #[validate(custom(function = "not_whitespace", message = "state must not be blank"))]
    pub state: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub established: Option<NaiveDate>,
    /// Set by the store; optional on input.
    #[serde(default)]
    pub created: Option<Timestamp>,
}
