//! # vform-validator
//!
//! Declarative, catalog-driven form validation with synchronous and
//! asynchronous rules.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vform_validator::prelude::*;
//!
//! let mut validator = FormValidator::new();
//!
//! let username = validator.generate_rules(
//!     &RuleSpec::new().rule("required").with("min", 3).with("max", 20),
//! )?;
//! let unique = validator.generate_async_rules(
//!     &RuleSpec::new().rule("unique_username"),
//! )?;
//!
//! validator.set_validation_rules(
//!     Some(IndexMap::from([("username".to_owned(), username)])),
//!     Some(IndexMap::from([("username".to_owned(), unique)])),
//! );
//!
//! let form = FormData::new().with("username", "bob");
//! if validator.validate_form(&form).await? {
//!     // submit
//! } else {
//!     eprintln!("{:?}", validator.get_errors());
//! }
//! # Ok::<(), ValidateError>(())
//! ```
//!
//! ## Shape
//!
//! - [`registry`] — rule name → predicate factory tables, sync and async,
//!   with the built-in rule set and override-wins custom entries.
//! - [`catalog`] — per-language message tables (static strings or
//!   formatters over the rule argument).
//! - [`core`] — field values, rule specs, compiled rules, configuration
//!   errors.
//! - [`validator`] — the [`FormValidator`](validator::FormValidator):
//!   compiles specs, evaluates fields (sync rules short-circuit first, then
//!   async rules fan out and join), keeps the error state, fires lifecycle
//!   hooks.
//!
//! Each field reports at most one message: the first failing rule's, in
//! declaration order. Configuration mistakes (unknown rule names, malformed
//! arguments, evaluating before rules are registered) surface as
//! [`ValidateError`](core::ValidateError) — never as validation failures.

pub mod catalog;
pub mod core;
pub mod prelude;
pub mod registry;
pub mod validator;

pub use catalog::{Lang, Message, MessageCatalog};
pub use core::{
    AsyncOutcome, AsyncRule, AsyncValidationRules, FieldValue, FileMeta, FormData, Rule, RuleArg,
    RuleSpec, ValidateError, ValidationRules,
};
pub use registry::{AsyncValidatorRegistry, ValidatorRegistry};
pub use validator::{Callbacks, FormValidator, FormValidatorBuilder};
