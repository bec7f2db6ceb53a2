//! Declarative rule specs and their compiled form.
//!
//! A [`RuleSpec`] is what callers declare: an ordered map of rule name to
//! argument. The rule compiler resolves each entry against a registry and
//! the message catalog, producing [`Rule`] / [`AsyncRule`] values — a
//! predicate paired with the message reported when it fails. Order matters:
//! the first failing rule wins, so declaration order is preserved all the
//! way through evaluation.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::value::{FieldValue, FormData};

// ============================================================================
// RULE ARGUMENT
// ============================================================================

/// Argument attached to a declared rule.
///
/// Kept as a small closed variant; each rule factory rejects shapes it does
/// not accept at compile time, so a malformed declaration fails before any
/// evaluation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleArg {
    /// No argument (`required`, `email`, ...).
    None,
    /// A single number (`min`, `size`, ...).
    Number(f64),
    /// An inclusive number pair (`between`, `between_values`).
    Pair(f64, f64),
    /// A string (`confirmed`, `is`, ...).
    Str(String),
    /// A list of strings (`one_of`, `ext`, `mimes`, ...).
    List(Vec<String>),
    /// A regular-expression pattern (`regex`), compiled at rule-compile time.
    Pattern(String),
}

impl RuleArg {
    /// The single number, if this argument is one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The number pair, if this argument is one.
    #[must_use]
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            Self::Pair(lo, hi) => Some((*lo, *hi)),
            _ => None,
        }
    }

    /// The string, if this argument is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The string list, if this argument is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<f64> for RuleArg {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for RuleArg {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<(f64, f64)> for RuleArg {
    fn from((lo, hi): (f64, f64)) -> Self {
        Self::Pair(lo, hi)
    }
}

impl From<&str> for RuleArg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for RuleArg {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<String>> for RuleArg {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<&[&str]> for RuleArg {
    fn from(items: &[&str]) -> Self {
        Self::List(items.iter().map(|s| (*s).to_owned()).collect())
    }
}

// ============================================================================
// RULE SPEC
// ============================================================================

/// Ordered declarative rule set for one field.
///
/// # Examples
///
/// ```rust,ignore
/// use vform_validator::core::{RuleArg, RuleSpec};
///
/// let spec = RuleSpec::new()
///     .rule("required")
///     .with("min", RuleArg::Number(5.0))
///     .with("confirmed", RuleArg::Str("password".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    rules: IndexMap<String, RuleArg>,
}

impl RuleSpec {
    /// Creates an empty spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an argument-less rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(self, name: impl Into<String>) -> Self {
        self.with(name, RuleArg::None)
    }

    /// Declares a rule with an argument.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, name: impl Into<String>, arg: impl Into<RuleArg>) -> Self {
        self.rules.insert(name.into(), arg.into());
        self
    }

    /// Iterates declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleArg)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============================================================================
// COMPILED RULES
// ============================================================================

/// A synchronous predicate over a field value and the surrounding form data.
pub type Predicate = Arc<dyn Fn(&FieldValue, &FormData) -> bool + Send + Sync>;

/// Outcome of one asynchronous predicate: a verdict, or an execution fault.
pub type AsyncOutcome = Result<bool, Box<dyn Error + Send + Sync>>;

/// An asynchronous predicate over a field value and the surrounding form
/// data. Inputs are snapshotted per invocation, so the future owns what it
/// needs and stays `'static`.
pub type AsyncPredicate =
    Arc<dyn Fn(FieldValue, FormData) -> BoxFuture<'static, AsyncOutcome> + Send + Sync>;

/// A compiled synchronous rule: predicate plus failure message.
///
/// Immutable once compiled; evaluators reference it, they never copy it.
#[derive(Clone)]
pub struct Rule {
    pub(crate) predicate: Predicate,
    pub(crate) message: String,
}

impl Rule {
    /// Pairs a predicate with its failure message.
    #[must_use]
    pub fn new(predicate: Predicate, message: impl Into<String>) -> Self {
        Self {
            predicate,
            message: message.into(),
        }
    }

    /// The message reported when this rule fails.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Runs the predicate.
    #[must_use]
    pub fn check(&self, value: &FieldValue, form: &FormData) -> bool {
        (self.predicate)(value, form)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A compiled asynchronous rule: deferred predicate plus failure message.
#[derive(Clone)]
pub struct AsyncRule {
    pub(crate) predicate: AsyncPredicate,
    pub(crate) message: String,
}

impl AsyncRule {
    /// Pairs a deferred predicate with its failure message.
    #[must_use]
    pub fn new(predicate: AsyncPredicate, message: impl Into<String>) -> Self {
        Self {
            predicate,
            message: message.into(),
        }
    }

    /// The message reported when this rule fails.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Starts the deferred predicate against a snapshot of the inputs.
    pub fn check(&self, value: &FieldValue, form: &FormData) -> BoxFuture<'static, AsyncOutcome> {
        (self.predicate)(value.clone(), form.clone())
    }
}

impl fmt::Debug for AsyncRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Compiled synchronous rules per field, in declaration order.
pub type ValidationRules = IndexMap<String, Vec<Rule>>;

/// Compiled asynchronous rules per field, in declaration order.
pub type AsyncValidationRules = IndexMap<String, Vec<AsyncRule>>;

// ============================================================================
// TESTS
// ============================================================================
