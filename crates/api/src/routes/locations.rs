use crate::handlers::locations;
use crate::routing::Router;
use crate::state::AppState;

pub fn mount(api: &Router<AppState>) {
    api.post("/locations", locations::create)
        .get("/locations", locations::list)
        .patch("/locations/{id}", locations::update)
        .delete("/locations/{id}", locations::delete);
}
