//! Constraint evaluator -- pure logic, no I/O.

use super::rules::{Constrained, FieldErrors, FieldRules, Rule};
use crate::error::CoreError;

/// Evaluate `table` against the values returned by `lookup`.
///
/// Absent and empty values only fail a [`Rule::Required`]; the remaining
/// rules are skipped for them so optional fields may be omitted.
pub fn evaluate<'a, F>(table: &[FieldRules], lookup: F) -> FieldErrors
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut errors = FieldErrors::new();

    for entry in table {
        let value = lookup(entry.field).filter(|v| !v.is_empty());

        let failed = entry.rules.iter().find(|rule| match value {
            Some(v) => !rule.accepts(v),
            None => **rule == Rule::Required,
        });

        if let Some(rule) = failed {
            errors.insert(entry.field.to_string(), rule.message(entry.field));
        }
    }

    errors
}

/// Validate a DTO against its own constraint table.
pub fn check<T: Constrained>(input: &T) -> Result<(), CoreError> {
    let errors = evaluate(T::RULES, |field| input.field_value(field));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidFields(errors))
    }
}
