//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every method returns
//! [`CoreError`](locus_core::error::CoreError); sqlx errors are translated
//! by [`map_sqlx_error`](crate::error::map_sqlx_error) before they escape.

pub mod asset_repo;
pub mod location_repo;

pub use asset_repo::AssetRepo;
pub use location_repo::LocationRepo;
