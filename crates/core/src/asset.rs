//! Asset status and constraint tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::{FieldRules, Rule};

pub const NAME_MIN_LEN: usize = 5;
pub const NAME_MAX_LEN: usize = 50;

/// Operational status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Online,
    Offline,
}

impl AssetStatus {
    /// Every accepted wire value, in the order reported to clients.
    pub const ALL: &'static [&'static str] = &["online", "offline"];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Online => "online",
            AssetStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known asset status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown asset status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for AssetStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(AssetStatus::Online),
            "offline" => Ok(AssetStatus::Offline),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl TryFrom<String> for AssetStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Constraints for creating an asset.
pub const CREATE_RULES: &[FieldRules] = &[
    FieldRules {
        field: "name",
        rules: &[
            Rule::Required,
            Rule::MinLength(NAME_MIN_LEN),
            Rule::MaxLength(NAME_MAX_LEN),
        ],
    },
    FieldRules {
        field: "status",
        rules: &[Rule::Required, Rule::OneOf(AssetStatus::ALL)],
    },
];

/// Constraints for patching an asset. Every field is optional.
pub const PATCH_RULES: &[FieldRules] = &[
    FieldRules {
        field: "name",
        rules: &[Rule::MinLength(NAME_MIN_LEN), Rule::MaxLength(NAME_MAX_LEN)],
    },
    FieldRules {
        field: "status",
        rules: &[Rule::OneOf(AssetStatus::ALL)],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for raw in AssetStatus::ALL {
            let status: AssetStatus = raw.parse().unwrap();
            assert_eq!(status.as_str(), *raw);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "ONLINE".parse::<AssetStatus>().unwrap_err();
        assert_eq!(err, ParseStatusError("ONLINE".into()));
    }
}
