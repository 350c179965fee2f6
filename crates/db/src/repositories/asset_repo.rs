//! Repository for the `assets` table.
//!
//! Every mutation is scoped by both the asset id and the owning location id,
//! so an asset can never be changed through another location's path.

use locus_core::error::CoreError;
use locus_core::types::DbId;
use sqlx::PgPool;

use crate::error::map_sqlx_error;
use crate::models::asset::{Asset, CreateAsset, UpdateAsset};
use crate::models::non_empty;
use crate::patch::PatchBuilder;
use crate::repositories::LocationRepo;

/// Select list for assets joined with their location.
const JOINED_SELECT: &str = "\
    SELECT a.id, a.name, a.status, l.name AS location_name, a.location_id, \
           a.created_at, a.updated_at \
    FROM assets a \
    JOIN locations l ON l.id = a.location_id";

/// Provides CRUD operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset under `location_id`, returning its generated id.
    ///
    /// A missing location surfaces as [`CoreError::MissingReference`] via
    /// the foreign key.
    pub async fn create(
        pool: &PgPool,
        location_id: DbId,
        input: &CreateAsset,
    ) -> Result<DbId, CoreError> {
        let status = input.status()?;
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO assets (name, status, location_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.name)
        .bind(status.as_str())
        .bind(location_id)
        .fetch_one(pool)
        .await
        .map_err(map_sqlx_error)
    }

    /// List every asset with its location name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Asset>, CoreError> {
        let query = format!("{JOINED_SELECT} ORDER BY a.created_at, a.id");
        sqlx::query_as::<_, Asset>(&query)
            .fetch_all(pool)
            .await
            .map_err(map_sqlx_error)
    }

    /// List the assets of one location.
    ///
    /// Fails with [`CoreError::NotFound`] when the location does not exist;
    /// an existing location without assets yields an empty list.
    pub async fn list_by_location(
        pool: &PgPool,
        location_id: DbId,
    ) -> Result<Vec<Asset>, CoreError> {
        if !LocationRepo::exists(pool, location_id).await? {
            return Err(CoreError::NotFound {
                entity: "Location",
                id: location_id,
            });
        }

        let query = format!("{JOINED_SELECT} WHERE a.location_id = $1 ORDER BY a.created_at, a.id");
        sqlx::query_as::<_, Asset>(&query)
            .bind(location_id)
            .fetch_all(pool)
            .await
            .map_err(map_sqlx_error)
    }

    /// Apply a partial update to the asset `asset_id` owned by
    /// `location_id`. Returns the id of the updated row.
    ///
    /// Fields are applied in the order `name`, `status`; the predicate binds
    /// the asset id, then the location id.
    pub async fn update(
        pool: &PgPool,
        location_id: DbId,
        asset_id: DbId,
        input: &UpdateAsset,
    ) -> Result<DbId, CoreError> {
        let status = input.status()?;
        let statement = PatchBuilder::new("assets")
            .set("name", non_empty(&input.name))
            .set("status", status.map(|s| s.as_str()))
            .filter("id", asset_id)
            .filter("location_id", location_id)
            .build()?;

        statement
            .fetch_id(pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(CoreError::NotFound {
                entity: "Asset",
                id: asset_id,
            })
    }

    /// Delete the asset `asset_id` owned by `location_id`.
    pub async fn delete(pool: &PgPool, location_id: DbId, asset_id: DbId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1 AND location_id = $2")
            .bind(asset_id)
            .bind(location_id)
            .execute(pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound {
                entity: "Asset",
                id: asset_id,
            });
        }
        Ok(())
    }
}
