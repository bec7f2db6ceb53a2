//! Core data types: field values, rule specs, compiled rules, and the
//! configuration-error taxonomy.

pub mod error;
pub mod rule;
pub mod value;

pub use error::ValidateError;
pub use rule::{
    AsyncOutcome, AsyncPredicate, AsyncRule, AsyncValidationRules, Predicate, Rule, RuleArg,
    RuleSpec, ValidationRules,
};
pub use value::{FieldValue, FileMeta, FormData};
