//! Repository for the `parks` table.

use parky_core::types::DbId;
use sqlx::PgPool;

use crate::models::park::Park;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, state, picture, established, created";

/// Provides CRUD operations for parks.
pub struct ParkRepo;

impl ParkRepo {
    /// Insert a new park, returning the created row. `id` and `created` are
    /// assigned by the database.
    pub async fn create(pool: &PgPool, park: &Park) -> Result<Park, sqlx::Error> {
        let query = format!(
            "INSERT INTO parks (name, state, picture, established)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Park>(&query)
            .bind(&park.name)
            .bind(&park.state)
            .bind(&park.picture)
            .bind(park.established)
            .fetch_one(pool)
            .await
    }

    /// Find a park by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Park>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parks WHERE id = $1");
        sqlx::query_as::<_, Park>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all parks ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Park>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parks ORDER BY id");
        sqlx::query_as::<_, Park>(&query).fetch_all(pool).await
    }

    /// Whether a park with the same trimmed, case-folded name exists.
    pub async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM parks WHERE LOWER(TRIM(name)) = LOWER(TRIM($1)))",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    pub async fn exists_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM parks WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Replace every mutable column. Returns `true` if a row was updated.
    pub async fn update(pool: &PgPool, park: &Park) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE parks SET
                name = $2,
                state = $3,
                picture = $4,
                established = $5
             WHERE id = $1",
        )
        .bind(park.id)
        .bind(&park.name)
        .bind(&park.state)
        .bind(&park.picture)
        .bind(park.established)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a park by ID; trails cascade. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
