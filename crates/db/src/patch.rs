//! Dynamic partial-UPDATE builder.
//!
//! A [`PatchBuilder`] collects the present fields of a patch object as
//! ordered `(column, value)` pairs, plus the identifying predicates, and
//! renders them once into a parameterized statement:
//!
//! ```text
//! UPDATE assets SET name = $1, status = $2, updated_at = NOW()
//! WHERE id = $3 AND location_id = $4 RETURNING id
//! ```
//!
//! Placeholder indices are assigned in a single pass at render time, so the
//! order in which columns and predicates are recorded can never drift out of
//! step with the bind order.

use locus_core::error::CoreError;
use locus_core::types::DbId;
use sqlx::PgPool;

/// Column touched on every patch.
const TOUCH_COLUMN: &str = "updated_at";

/// A value bound to one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchValue {
    Text(String),
    Id(DbId),
}

impl From<String> for PatchValue {
    fn from(value: String) -> Self {
        PatchValue::Text(value)
    }
}

impl From<&str> for PatchValue {
    fn from(value: &str) -> Self {
        PatchValue::Text(value.to_string())
    }
}

impl From<DbId> for PatchValue {
    fn from(value: DbId) -> Self {
        PatchValue::Id(value)
    }
}

#[derive(Debug, Clone)]
struct Binding {
    column: &'static str,
    value: PatchValue,
}

/// Accumulates the pieces of a partial UPDATE.
#[derive(Debug)]
pub struct PatchBuilder {
    table: &'static str,
    assignments: Vec<Binding>,
    predicates: Vec<Binding>,
}

impl PatchBuilder {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            predicates: Vec::new(),
        }
    }

    /// Record `column = value` when the field is present; absent fields are
    /// left unchanged.
    pub fn set<V: Into<PatchValue>>(&mut self, column: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.assignments.push(Binding {
                column,
                value: value.into(),
            });
        }
        self
    }

    /// Record an identifying `column = value` predicate. Predicates are
    /// joined with `AND` in the order they are recorded.
    pub fn filter<V: Into<PatchValue>>(&mut self, column: &'static str, value: V) -> &mut Self {
        self.predicates.push(Binding {
            column,
            value: value.into(),
        });
        self
    }

    /// Number of fields that will be updated (excluding the timestamp).
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Render the statement.
    ///
    /// Fails with [`CoreError::NoFieldsToUpdate`] when no field is present,
    /// so no statement is ever issued for an empty patch.
    pub fn build(&self) -> Result<PatchStatement, CoreError> {
        if self.assignments.is_empty() {
            return Err(CoreError::NoFieldsToUpdate);
        }
        if self.predicates.is_empty() {
            return Err(CoreError::Internal(format!(
                "refusing to patch every row of {}",
                self.table
            )));
        }

        let mut binds = Vec::with_capacity(self.assignments.len() + self.predicates.len());
        let mut placeholder = |value: &PatchValue| {
            binds.push(value.clone());
            format!("${}", binds.len())
        };

        let mut set_clauses: Vec<String> = self
            .assignments
            .iter()
            .map(|b| format!("{} = {}", b.column, placeholder(&b.value)))
            .collect();
        set_clauses.push(format!("{TOUCH_COLUMN} = NOW()"));

        let where_clauses: Vec<String> = self
            .predicates
            .iter()
            .map(|b| format!("{} = {}", b.column, placeholder(&b.value)))
            .collect();

        let sql = format!(
            "UPDATE {} SET {} WHERE {} RETURNING id",
            self.table,
            set_clauses.join(", "),
            where_clauses.join(" AND "),
        );

        Ok(PatchStatement { sql, binds })
    }
}

/// A rendered partial UPDATE and its positional bind values.
#[derive(Debug, Clone)]
pub struct PatchStatement {
    sql: String,
    binds: Vec<PatchValue>,
}

impl PatchStatement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind values in placeholder order (`$1` first).
    pub fn binds(&self) -> &[PatchValue] {
        &self.binds
    }

    /// Execute the statement, returning the id of the updated row, or `None`
    /// when the predicates matched nothing.
    pub async fn fetch_id(&self, pool: &PgPool) -> Result<Option<DbId>, sqlx::Error> {
        let mut query = sqlx::query_scalar::<_, DbId>(&self.sql);
        for value in &self.binds {
            query = match value {
                PatchValue::Text(text) => query.bind(text.clone()),
                PatchValue::Id(id) => query.bind(*id),
            };
        }
        query.fetch_optional(pool).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn empty_patch_is_rejected() {
        let mut builder = PatchBuilder::new("locations");
        builder
            .set::<String>("name", None)
            .set::<String>("code", None)
            .filter("id", Uuid::nil());

        assert!(builder.is_empty());
        assert_matches!(builder.build(), Err(CoreError::NoFieldsToUpdate));
    }

    #[test]
    fn missing_predicate_is_rejected() {
        let mut builder = PatchBuilder::new("locations");
        builder.set("name", Some("Warehouse"));
        assert_matches!(builder.build(), Err(CoreError::Internal(_)));
    }

    #[test]
    fn single_field_sets_one_column_plus_timestamp() {
        let id = Uuid::new_v4();
        let mut builder = PatchBuilder::new("locations");
        builder
            .set::<String>("name", None)
            .set("code", Some("ABCD"))
            .filter("id", id);

        let stmt = builder.build().unwrap();
        assert_eq!(
            stmt.sql(),
            "UPDATE locations SET code = $1, updated_at = NOW() WHERE id = $2 RETURNING id"
        );
        assert_eq!(
            stmt.binds(),
            &[PatchValue::Text("ABCD".into()), PatchValue::Id(id)]
        );
    }

    #[test]
    fn all_fields_with_owner_predicate() {
        let asset_id = Uuid::new_v4();
        let location_id = Uuid::new_v4();
        let mut builder = PatchBuilder::new("assets");
        builder
            .set("name", Some("Forklift 7"))
            .set("status", Some("offline"))
            .filter("id", asset_id)
            .filter("location_id", location_id);

        assert_eq!(builder.len(), 2);
        let stmt = builder.build().unwrap();
        assert_eq!(
            stmt.sql(),
            "UPDATE assets SET name = $1, status = $2, updated_at = NOW() \
             WHERE id = $3 AND location_id = $4 RETURNING id"
        );
        assert_eq!(
            stmt.binds(),
            &[
                PatchValue::Text("Forklift 7".into()),
                PatchValue::Text("offline".into()),
                PatchValue::Id(asset_id),
                PatchValue::Id(location_id),
            ]
        );
    }

    #[test]
    fn placeholders_follow_render_order_not_call_order() {
        let id = Uuid::new_v4();
        let mut builder = PatchBuilder::new("locations");
        // Predicate recorded before the field: still bound last.
        builder.filter("id", id).set("name", Some("Depot North"));

        let stmt = builder.build().unwrap();
        assert_eq!(
            stmt.sql(),
            "UPDATE locations SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING id"
        );
        assert_eq!(stmt.binds()[1], PatchValue::Id(id));
    }

    #[test]
    fn placeholder_count_matches_binds() {
        let mut builder = PatchBuilder::new("assets");
        builder
            .set("name", Some("Scanner 12"))
            .filter("id", Uuid::new_v4())
            .filter("location_id", Uuid::new_v4());

        let stmt = builder.build().unwrap();
        let placeholders = stmt.sql().matches('$').count();
        assert_eq!(placeholders, stmt.binds().len());
    }
}
