//! Handlers for assets, nested under their owning location.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::Json;
use locus_core::error::CoreError;
use locus_core::validation::check;
use locus_db::models::asset::{CreateAsset, UpdateAsset};
use locus_db::repositories::AssetRepo;

use crate::error::AppResult;
use crate::extract::{json_body, path_id};
use crate::response::{AssetList, IdResponse};
use crate::state::AppState;

/// POST /api/v1/locations/{locationID}/assets
pub async fn create(state: AppState, req: Request) -> AppResult<(StatusCode, Json<IdResponse>)> {
    let location_id = path_id(&req, "locationID")?;
    let input: CreateAsset = json_body(req).await?;
    check(&input)?;

    let id = AssetRepo::create(&state.pool, location_id, &input).await?;
    tracing::info!(%id, %location_id, "Asset created");
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// GET /api/v1/assets
pub async fn list(state: AppState, _req: Request) -> AppResult<Json<AssetList>> {
    let assets = AssetRepo::list(&state.pool).await?;
    Ok(Json(AssetList { assets }))
}

/// GET /api/v1/locations/{locationID}/assets
pub async fn list_by_location(state: AppState, req: Request) -> AppResult<Json<AssetList>> {
    let location_id = path_id(&req, "locationID")?;
    let assets = AssetRepo::list_by_location(&state.pool, location_id).await?;
    Ok(Json(AssetList { assets }))
}

/// PATCH /api/v1/locations/{locationID}/assets/{assetID}
pub async fn update(state: AppState, req: Request) -> AppResult<Json<IdResponse>> {
    let location_id = path_id(&req, "locationID")?;
    let asset_id = path_id(&req, "assetID")?;
    let input: UpdateAsset = json_body(req).await?;
    if input.is_empty() {
        return Err(CoreError::NoFieldsToUpdate.into());
    }
    check(&input)?;

    let id = AssetRepo::update(&state.pool, location_id, asset_id, &input).await?;
    Ok(Json(IdResponse { id }))
}

/// DELETE /api/v1/locations/{locationID}/assets/{assetID}
pub async fn delete(state: AppState, req: Request) -> AppResult<StatusCode> {
    let location_id = path_id(&req, "locationID")?;
    let asset_id = path_id(&req, "assetID")?;
    AssetRepo::delete(&state.pool, location_id, asset_id).await?;
    tracing::info!(%asset_id, %location_id, "Asset deleted");
    Ok(StatusCode::NO_CONTENT)
}
