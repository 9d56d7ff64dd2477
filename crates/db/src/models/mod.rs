//! Entity structs and transfer shapes.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - The `Serialize`/`Deserialize` DTOs accepted or exposed by the API
//!
//! Conversions between the two live in [`crate::mapper`].

pub mod difficulty;
pub mod park;
pub mod trail;

use validator::ValidationError;

/// Rejects values made only of whitespace. Empty values are left to the
/// `length` rule so they report a single message.
pub(crate) fn not_whitespace(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
