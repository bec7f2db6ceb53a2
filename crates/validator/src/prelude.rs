//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use vform_validator::prelude::*;
//! ```

pub use crate::catalog::{Lang, Message, MessageCatalog};
pub use crate::core::{
    AsyncOutcome, AsyncPredicate, AsyncRule, AsyncValidationRules, FieldValue, FileMeta, FormData,
    Predicate, Rule, RuleArg, RuleSpec, ValidateError, ValidationRules,
};
pub use crate::registry::{AsyncValidatorRegistry, ValidatorRegistry};
pub use crate::validator::{Callbacks, FormValidator, FormValidatorBuilder};

// Rule maps are plain ordered maps; re-exported so callers do not need a
// direct indexmap dependency to build them.
pub use indexmap::IndexMap;
