//! Asset models and DTOs.

use locus_core::asset::{AssetStatus, CREATE_RULES, PATCH_RULES};
use locus_core::error::CoreError;
use locus_core::types::{DbId, Timestamp};
use locus_core::validation::{Constrained, FieldRules};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{empty_as_none, non_empty};

/// An asset row joined with the name of its owning location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    #[serde(rename = "ID")]
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub status: AssetStatus,
    /// Name of the owning location.
    #[serde(rename = "location")]
    pub location_name: String,
    #[serde(rename = "locationID")]
    pub location_id: DbId,
    #[serde(rename = "createdAtUTC")]
    pub created_at: Timestamp,
    #[serde(rename = "lastUpdatedAtUTC")]
    pub updated_at: Timestamp,
}

/// DTO for creating an asset. The owning location comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAsset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
}

impl CreateAsset {
    /// Parsed status; fails for values the constraint table would reject.
    pub fn status(&self) -> Result<AssetStatus, CoreError> {
        self.status
            .parse::<AssetStatus>()
            .map_err(|e| CoreError::Validation(e.to_string()))
    }
}

impl Constrained for CreateAsset {
    const RULES: &'static [FieldRules] = CREATE_RULES;

    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(self.name.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

/// DTO for patching an asset. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAsset {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<String>,
}

impl UpdateAsset {
    /// Returns `true` when no field would be updated.
    pub fn is_empty(&self) -> bool {
        non_empty(&self.name).is_none() && non_empty(&self.status).is_none()
    }

    /// Parsed status, if present.
    pub fn status(&self) -> Result<Option<AssetStatus>, CoreError> {
        non_empty(&self.status)
            .map(str::parse::<AssetStatus>)
            .transpose()
            .map_err(|e| CoreError::Validation(e.to_string()))
    }
}

impl Constrained for UpdateAsset {
    const RULES: &'static [FieldRules] = PATCH_RULES;

    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => non_empty(&self.name),
            "status" => non_empty(&self.status),
            _ => None,
        }
    }
}
