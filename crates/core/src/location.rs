//! Location constants and normalization rules.

use crate::validation::{FieldRules, Rule};

pub const NAME_MIN_LEN: usize = 5;
pub const NAME_MAX_LEN: usize = 50;

/// Location codes are exactly this many characters.
pub const CODE_LEN: usize = 4;

/// Constraints for creating a location. Code case is normalized afterwards.
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
        field: "code",
        rules: &[Rule::Required, Rule::Length(CODE_LEN)],
    },
];

/// Constraints for patching a location. Every field is optional.
pub const PATCH_RULES: &[FieldRules] = &[
    FieldRules {
        field: "name",
        rules: &[Rule::MinLength(NAME_MIN_LEN), Rule::MaxLength(NAME_MAX_LEN)],
    },
    FieldRules {
        field: "code",
        rules: &[Rule::Uppercase, Rule::Length(CODE_LEN)],
    },
];

/// Codes are stored and compared in uppercase.
pub fn normalize_code(code: &str) -> String {
    code.to_uppercase()
}
