//! Handlers for the `/locations` resource.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::Json;
use locus_core::error::CoreError;
use locus_core::validation::check;
use locus_db::models::location::{CreateLocation, UpdateLocation};
use locus_db::repositories::LocationRepo;

use crate::error::AppResult;
use crate::extract::{json_body, path_id};
use crate::response::{IdResponse, LocationList};
use crate::state::AppState;

/// POST /api/v1/locations
pub async fn create(state: AppState, req: Request) -> AppResult<(StatusCode, Json<IdResponse>)> {
    let input = json_body::<CreateLocation>(req).await?.normalized();
    check(&input)?;

    let id = LocationRepo::create(&state.pool, &input).await?;
    tracing::info!(%id, name = %input.name, "Location created");
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// GET /api/v1/locations
pub async fn list(state: AppState, _req: Request) -> AppResult<Json<LocationList>> {
    let locations = LocationRepo::list(&state.pool).await?;
    Ok(Json(LocationList { locations }))
}

/// PATCH /api/v1/locations/{id}
pub async fn update(state: AppState, req: Request) -> AppResult<Json<IdResponse>> {
    let id = path_id(&req, "id")?;
    let input: UpdateLocation = json_body(req).await?;
    if input.is_empty() {
        return Err(CoreError::NoFieldsToUpdate.into());
    }
    check(&input)?;

    let id = LocationRepo::update(&state.pool, id, &input).await?;
    Ok(Json(IdResponse { id }))
}

/// DELETE /api/v1/locations/{id}
pub async fn delete(state: AppState, req: Request) -> AppResult<StatusCode> {
    let id = path_id(&req, "id")?;
    LocationRepo::delete(&state.pool, id).await?;
    tracing::info!(%id, "Location deleted");
    Ok(StatusCode::NO_CONTENT)
}
