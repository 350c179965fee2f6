//! Constraint table types.

use std::collections::BTreeMap;

/// Field name to human-readable reason, ordered by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// A single constraint on a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present and non-empty.
    Required,
    /// At least this many characters.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
    /// Exactly this many characters.
    Length(usize),
    /// Must equal one of the listed values.
    OneOf(&'static [&'static str]),
    /// Must not contain lowercase characters.
    Uppercase,
}

impl Rule {
    /// Returns `true` when `value` satisfies this rule.
    ///
    /// Only `Required` is evaluated against absent or empty values; every
    /// other rule is skipped by the evaluator in that case.
    pub fn accepts(&self, value: &str) -> bool {
        let len = value.chars().count();
        match *self {
            Rule::Required => !value.is_empty(),
            Rule::MinLength(min) => len >= min,
            Rule::MaxLength(max) => len <= max,
            Rule::Length(exact) => len == exact,
            Rule::OneOf(allowed) => allowed.contains(&value),
            Rule::Uppercase => value == value.to_uppercase(),
        }
    }

    /// Reason reported to the client when `field` fails this rule.
    pub fn message(&self, field: &str) -> String {
        match *self {
            Rule::Required => format!("{field} is required"),
            Rule::MinLength(min) => format!("{field} should have minimum {min} letters"),
            Rule::MaxLength(max) => format!("{field} should have maximum {max} letters"),
            Rule::Length(exact) => format!("{field} must be {exact} letters long"),
            Rule::OneOf(allowed) => format!("{field} must be one of: {}", allowed.join(" ")),
            Rule::Uppercase => format!("{field} must be uppercase"),
        }
    }
}

/// The ordered rules for one field. The first failing rule wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

/// Implemented by request DTOs that carry a constraint table.
pub trait Constrained {
    /// Constraint table, evaluated in order.
    const RULES: &'static [FieldRules];

    /// Current value of `field`, or `None` when absent.
    fn field_value(&self, field: &str) -> Option<&str>;
}
