use crate::handlers::assets;
use crate::routing::Router;
use crate::state::AppState;

/// Assets are created, changed and deleted through their owning location;
/// `/assets` lists across all locations.
pub fn mount(api: &Router<AppState>) {
    api.post("/locations/{locationID}/assets", assets::create)
        .get("/locations/{locationID}/assets", assets::list_by_location)
        .patch("/locations/{locationID}/assets/{assetID}", assets::update)
        .delete("/locations/{locationID}/assets/{assetID}", assets::delete);

    api.get("/assets", assets::list);
}
