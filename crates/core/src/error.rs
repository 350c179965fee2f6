use crate::types::DbId;
use crate::validation::FieldErrors;

/// Domain error taxonomy shared by the db and api crates.
///
/// Storage-engine details never appear here: the db crate translates driver
/// errors into one of these variants before returning.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(FieldErrors),

    #[error("no valid fields to update")]
    NoFieldsToUpdate,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
