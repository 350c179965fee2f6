//! Translation of sqlx errors into [`CoreError`].
//!
//! Constraint violations are looked up by constraint name in
//! [`CONSTRAINT_VIOLATIONS`]; everything else is logged here and surfaces as
//! [`CoreError::Internal`]. Driver error codes and SQL text never leave this
//! crate.

use locus_core::error::CoreError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign key violations.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Domain meaning of a violated constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A unique value is already taken.
    Conflict(&'static str),
    /// A referenced row does not exist.
    MissingReference(&'static str),
}

impl Violation {
    fn into_core(self) -> CoreError {
        match self {
            Violation::Conflict(msg) => CoreError::Conflict(msg.to_string()),
            Violation::MissingReference(msg) => CoreError::MissingReference(msg.to_string()),
        }
    }
}

/// Every UNIQUE and FOREIGN KEY constraint declared in `schema.sql`.
pub const CONSTRAINT_VIOLATIONS: &[(&str, Violation)] = &[
    (
        "locations_name_key",
        Violation::Conflict("location already exists"),
    ),
    ("locations_code_key", Violation::Conflict("code already exists")),
    ("assets_name_key", Violation::Conflict("asset already exists")),
    (
        "assets_location_id_fkey",
        Violation::MissingReference("location does not exist"),
    ),
];

/// Look up the domain meaning of a constraint by name.
pub fn lookup_constraint(name: &str) -> Option<Violation> {
    CONSTRAINT_VIOLATIONS
        .iter()
        .find(|(constraint, _)| *constraint == name)
        .map(|(_, violation)| *violation)
}

/// Translate a sqlx error into the domain taxonomy, logging it on the way.
pub fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        let is_constraint = matches!(
            code.as_deref(),
            Some(PG_UNIQUE_VIOLATION | PG_FOREIGN_KEY_VIOLATION)
        );
        if is_constraint {
            if let Some(violation) = db_err.constraint().and_then(lookup_constraint) {
                tracing::debug!(
                    constraint = db_err.constraint().unwrap_or_default(),
                    "Constraint violation"
                );
                return violation.into_core();
            }
        }
    }

    tracing::error!(error = %err, "Database error");
    CoreError::Internal("database operation failed".to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const SCHEMA: &str = include_str!("../schema.sql");

    /// Names of all UNIQUE and FOREIGN KEY constraints declared in the schema.
    fn keyed_constraints() -> Vec<&'static str> {
        SCHEMA
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("CONSTRAINT"))
            .filter(|line| line.contains(" UNIQUE ") || line.contains(" FOREIGN KEY "))
            .filter_map(|line| line.split_whitespace().nth(1))
            .collect()
    }

    #[test]
    fn every_schema_constraint_is_mapped() {
        let names = keyed_constraints();
        assert_eq!(names.len(), 4, "schema parse found {names:?}");
        for name in names {
            assert!(
                lookup_constraint(name).is_some(),
                "constraint {name} has no domain mapping"
            );
        }
    }

    #[test]
    fn foreign_key_maps_to_missing_reference() {
        assert_eq!(
            lookup_constraint("assets_location_id_fkey"),
            Some(Violation::MissingReference("location does not exist"))
        );
    }

    #[test]
    fn unknown_constraint_is_unmapped() {
        assert_eq!(lookup_constraint("locations_code_check"), None);
    }

    #[test]
    fn non_database_errors_become_internal() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert_matches!(err, CoreError::Internal(_));
    }
}
