//! Domain types and pure logic for the locations/assets service.
//!
//! Nothing in this crate touches the network or the database. The db and
//! api crates build on these types.

pub mod asset;
pub mod error;
pub mod location;
pub mod types;
pub mod validation;
