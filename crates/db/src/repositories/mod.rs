//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod park_repo;
pub mod trail_repo;

pub use park_repo::ParkRepo;
pub use trail_repo::TrailRepo;
