//! Repository for the `trails` table.
//!
//! Reads join the owning park so [`Trail::park`] is always populated.

use chrono::NaiveDate;
use parky_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::models::difficulty::Difficulty;
use crate::models::park::Park;
use crate::models::trail::Trail;

/// Trail columns followed by the owning park's columns, prefixed `park_`.
const JOINED_COLUMNS: &str = "t.id, t.name, t.distance, t.elevation, t.difficulty, t.park_id, \
     t.date_created, p.name AS park_name, p.state AS park_state, \
     p.picture AS park_picture, p.established AS park_established, \
     p.created AS park_created";

/// A `trails` row joined with its park.
#[derive(Debug, FromRow)]
struct TrailRow {
    id: DbId,
    name: String,
    distance: f64,
    elevation: f64,
    difficulty: Difficulty,
    park_id: DbId,
    date_created: Timestamp,
    park_name: Option<String>,
    park_state: Option<String>,
    park_picture: Option<String>,
    park_established: Option<NaiveDate>,
    park_created: Option<Timestamp>,
}

impl From<TrailRow> for Trail {
    fn from(row: TrailRow) -> Self {
        let park = match (row.park_name, row.park_state, row.park_created) {
            (Some(name), Some(state), Some(created)) => Some(Park {
                id: row.park_id,
                name,
                state,
                picture: row.park_picture,
                established: row.park_established,
                created,
            }),
            _ => None,
        };
        Trail {
            id: row.id,
            name: row.name,
            distance: row.distance,
            elevation: row.elevation,
            difficulty: row.difficulty,
            park_id: row.park_id,
            date_created: row.date_created,
            park,
        }
    }
}

/// Provides CRUD operations for trails.
pub struct TrailRepo;

impl TrailRepo {
    /// Insert a new trail and return it joined with its park.
    pub async fn create(pool: &PgPool, trail: &Trail) -> Result<Trail, sqlx::Error> {
        let query = format!(
            "WITH t AS (
                INSERT INTO trails (name, distance, elevation, difficulty, park_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM t LEFT JOIN parks p ON p.id = t.park_id"
        );
        let row = sqlx::query_as::<_, TrailRow>(&query)
            .bind(&trail.name)
            .bind(trail.distance)
            .bind(trail.elevation)
            .bind(trail.difficulty)
            .bind(trail.park_id)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Trail>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM trails t LEFT JOIN parks p ON p.id = t.park_id
             WHERE t.id = $1"
        );
        let row = sqlx::query_as::<_, TrailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Trail::from))
    }

    /// List all trails ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Trail>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM trails t LEFT JOIN parks p ON p.id = t.park_id
             ORDER BY t.id"
        );
        let rows = sqlx::query_as::<_, TrailRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Trail::from).collect())
    }

    /// Whether a trail with the same trimmed, case-folded name exists.
    pub async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM trails WHERE LOWER(TRIM(name)) = LOWER(TRIM($1)))",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    pub async fn exists_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM trails WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Replace every mutable column. `date_created` is left as is.
    pub async fn update(pool: &PgPool, trail: &Trail) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE trails SET
                name = $2,
                distance = $3,
                elevation = $4,
                difficulty = $5,
                park_id = $6
             WHERE id = $1",
        )
        .bind(trail.id)
        .bind(&trail.name)
        .bind(trail.distance)
        .bind(trail.elevation)
        .bind(trail.difficulty)
        .bind(trail.park_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trails WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
