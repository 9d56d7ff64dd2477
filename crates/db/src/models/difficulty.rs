//! Trail difficulty, stored as SMALLINT.

use serde::{Deserialize, Serialize};

/// Difficulty rating of a trail.
///
/// The discriminant is the value stored in `trails.difficulty`.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy = 0,
    Moderate = 1,
    Difficult = 2,
    Expert = 3,
}
