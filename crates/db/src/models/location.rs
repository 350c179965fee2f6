//! Location models and DTOs.

use locus_core::location::{normalize_code, CREATE_RULES, PATCH_RULES};
use locus_core::types::{DbId, Timestamp};
use locus_core::validation::{Constrained, FieldRules};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{empty_as_none, non_empty};

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    #[serde(rename = "ID")]
    pub id: DbId,
    pub name: String,
    pub code: String,
    #[serde(rename = "createdAtUTC")]
    pub created_at: Timestamp,
    #[serde(rename = "lastUpdatedAtUTC")]
    pub updated_at: Timestamp,
}

/// DTO for creating a location.
///
/// Missing fields decode as empty strings and are reported by the
/// `required` constraint rather than as a JSON error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

impl CreateLocation {
    /// Uppercase the code, so constraints are checked against the value
    /// that will be stored.
    pub fn normalized(mut self) -> Self {
        self.code = normalize_code(&self.code);
        self
    }
}

impl Constrained for CreateLocation {
    const RULES: &'static [FieldRules] = CREATE_RULES;

    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(self.name.as_str()),
            "code" => Some(self.code.as_str()),
            _ => None,
        }
    }
}

/// DTO for patching a location. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocation {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub code: Option<String>,
}

impl UpdateLocation {
    /// Returns `true` when no field would be updated.
    pub fn is_empty(&self) -> bool {
        non_empty(&self.name).is_none() && non_empty(&self.code).is_none()
    }
}

impl Constrained for UpdateLocation {
    const RULES: &'static [FieldRules] = PATCH_RULES;

    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => non_empty(&self.name),
            "code" => non_empty(&self.code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use locus_core::error::CoreError;
    use locus_core::validation::check;

    use super::*;

    #[test]
    fn empty_patch_fields_decode_as_absent() {
        let patch: UpdateLocation = serde_json::from_str(r#"{"name":"","code":""}"#).unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.code, None);
        assert!(patch.is_empty());
    }

    #[test]
    fn constructed_empty_string_counts_as_absent() {
        let patch = UpdateLocation {
            name: Some(String::new()),
            code: None,
        };
        assert!(patch.is_empty());
    }

    #[test]
    fn code_is_checked_after_uppercasing() {
        let input = CreateLocation {
            name: "Depot North".to_string(),
            code: "ßabc".to_string(),
        }
        .normalized();

        assert_eq!(input.code, "SSABC");
        assert_matches!(
            check(&input),
            Err(CoreError::InvalidFields(fields)) if fields["code"] == "code must be 4 letters long"
        );
    }

    #[test]
    fn lowercase_code_normalizes_and_passes() {
        let input = CreateLocation {
            name: "Warehouse One".to_string(),
            code: "abcd".to_string(),
        }
        .normalized();

        assert_eq!(input.code, "ABCD");
        assert!(check(&input).is_ok());
    }
}
