//! Repository for the `locations` table.

use locus_core::error::CoreError;
use locus_core::location::normalize_code;
use locus_core::types::DbId;
use sqlx::PgPool;

use crate::error::map_sqlx_error;
use crate::models::location::{CreateLocation, Location, UpdateLocation};
use crate::models::non_empty;
use crate::patch::PatchBuilder;

/// Column list for `locations` queries.
const COLUMNS: &str = "id, name, code, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning its generated id. The code is
    /// stored uppercase.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<DbId, CoreError> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO locations (name, code) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.name)
        .bind(normalize_code(&input.code))
        .fetch_one(pool)
        .await
        .map_err(map_sqlx_error)
    }

    /// List every location, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Location>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM locations ORDER BY created_at, id");
        sqlx::query_as::<_, Location>(&query)
            .fetch_all(pool)
            .await
            .map_err(map_sqlx_error)
    }

    /// Check whether a location exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, CoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM locations WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(map_sqlx_error)
    }

    /// Apply a partial update. Returns the id of the updated row.
    ///
    /// Fields are applied in the order `name`, `code`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<DbId, CoreError> {
        let statement = PatchBuilder::new("locations")
            .set("name", non_empty(&input.name))
            .set("code", non_empty(&input.code).map(normalize_code))
            .filter("id", id)
            .build()?;

        statement
            .fetch_id(pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(CoreError::NotFound {
                entity: "Location",
                id,
            })
    }

    /// Delete a location and, by cascade, its assets.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound {
                entity: "Location",
                id,
            });
        }
        Ok(())
    }
}
