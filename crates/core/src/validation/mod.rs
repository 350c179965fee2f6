//! Declarative field constraints.
//!
//! Each request DTO publishes a static table of [`FieldRules`] and exposes
//! its field values through [`Constrained`]; [`check`] evaluates the table
//! uniformly and collects one human-readable reason per failing field.

mod evaluator;
mod rules;

pub use evaluator::{check, evaluate};
pub use rules::{Constrained, FieldErrors, FieldRules, Rule};
