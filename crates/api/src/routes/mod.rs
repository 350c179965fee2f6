pub mod assets;
pub mod health;
pub mod locations;

use crate::routing::Router;
use crate::state::AppState;

/// Register every resource route on the `/api/v1` group.
///
/// Route hierarchy:
///
/// ```text
/// /health                                         GET
///
/// /locations                                      GET, POST
/// /locations/{id}                                 PATCH, DELETE
/// /locations/{locationID}/assets                  GET, POST
/// /locations/{locationID}/assets/{assetID}        PATCH, DELETE
///
/// /assets                                         GET
/// ```
pub fn mount(api: &Router<AppState>) {
    health::mount(api);
    locations::mount(api);
    assets::mount(api);
}
