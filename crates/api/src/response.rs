//! Response bodies for the resource handlers.

use locus_core::types::DbId;
use locus_db::models::asset::Asset;
use locus_db::models::location::Location;
use serde::Serialize;

/// `{ "ID": ... }`, returned by create and update.
#[derive(Debug, Serialize)]
pub struct IdResponse {
    #[serde(rename = "ID")]
    pub id: DbId,
}

/// `{ "locations": [...] }`
#[derive(Debug, Serialize)]
pub struct LocationList {
    pub locations: Vec<Location>,
}

/// `{ "assets": [...] }`
#[derive(Debug, Serialize)]
pub struct AssetList {
    pub assets: Vec<Asset>,
}
