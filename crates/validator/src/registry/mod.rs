//! Validator registries: rule name → predicate factory.
//!
//! A factory takes the rule's declared argument and returns the predicate
//! closure to run against field values, or a configuration error when the
//! argument shape does not fit the rule. Registries start from the built-in
//! table; custom entries merge in by name, and an entry with a built-in name
//! overrides it for all subsequent compilations.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::core::{
    AsyncOutcome, AsyncPredicate, FieldValue, FormData, Predicate, RuleArg, ValidateError,
};

mod builtin;
mod builtin_async;

/// Factory for synchronous predicates.
pub type Factory = Arc<dyn Fn(&RuleArg) -> Result<Predicate, ValidateError> + Send + Sync>;

/// Factory for asynchronous predicates.
pub type AsyncFactory = Arc<dyn Fn(&RuleArg) -> Result<AsyncPredicate, ValidateError> + Send + Sync>;

// ============================================================================
// SYNC REGISTRY
// ============================================================================

/// Registry of synchronous rule factories.
///
/// # Examples
///
/// ```rust,ignore
/// use vform_validator::registry::ValidatorRegistry;
///
/// let mut registry = ValidatorRegistry::builtin();
/// registry.register_predicate("even", |value, _| {
///     value.as_number().is_some_and(|n| n % 2.0 == 0.0)
/// });
/// ```
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    factories: HashMap<String, Factory>,
}

impl ValidatorRegistry {
    /// Creates a registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in rule table.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        builtin::install(&mut registry);
        registry
    }

    /// Registers a factory under a rule name, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&RuleArg) -> Result<Predicate, ValidateError> + Send + Sync + 'static,
    ) {
        self.register_factory(name, Arc::new(factory));
    }

    /// Registers an already type-erased factory.
    pub fn register_factory(&mut self, name: impl Into<String>, factory: Factory) {
        let name = name.into();
        debug!("Registering validator: {name}");
        self.factories.insert(name, factory);
    }

    /// Registers an argument-free predicate under a rule name.
    ///
    /// Convenience for custom rules that do not inspect their declared
    /// argument.
    pub fn register_predicate(
        &mut self,
        name: impl Into<String>,
        predicate: impl Fn(&FieldValue, &FormData) -> bool + Send + Sync + 'static,
    ) {
        let predicate: Predicate = Arc::new(predicate);
        self.register(name, move |_arg| Ok(Arc::clone(&predicate)));
    }

    /// Looks up a factory.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Factory> {
        self.factories.get(name)
    }

    /// Whether a rule name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered rule names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

// ============================================================================
// ASYNC REGISTRY
// ============================================================================

/// Registry of asynchronous rule factories.
///
/// Same shape as [`ValidatorRegistry`], but predicates resolve to a deferred
/// verdict. The ship-with table holds one illustrative entry,
/// `unique_username`, which simulates a remote lookup against a static
/// taken-set — demo logic, not production.
#[derive(Clone, Default)]
pub struct AsyncValidatorRegistry {
    factories: HashMap<String, AsyncFactory>,
}

impl AsyncValidatorRegistry {
    /// Creates a registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in async table.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        builtin_async::install(&mut registry);
        registry
    }

    /// Registers a factory under a rule name, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&RuleArg) -> Result<AsyncPredicate, ValidateError> + Send + Sync + 'static,
    ) {
        self.register_factory(name, Arc::new(factory));
    }

    /// Registers an already type-erased factory.
    pub fn register_factory(&mut self, name: impl Into<String>, factory: AsyncFactory) {
        let name = name.into();
        debug!("Registering async validator: {name}");
        self.factories.insert(name, factory);
    }

    /// Registers an argument-free deferred predicate under a rule name.
    ///
    /// The predicate closure receives snapshots of the inputs and returns a
    /// boxed future, e.g. `|value, _| Box::pin(async move { Ok(true) })`.
    pub fn register_predicate(
        &mut self,
        name: impl Into<String>,
        predicate: impl Fn(FieldValue, FormData) -> futures::future::BoxFuture<'static, AsyncOutcome>
        + Send
        + Sync
        + 'static,
    ) {
        let predicate: AsyncPredicate = Arc::new(predicate);
        self.register(name, move |_arg| Ok(Arc::clone(&predicate)));
    }

    /// Looks up a factory.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AsyncFactory> {
        self.factories.get(name)
    }

    /// Whether a rule name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered rule names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for AsyncValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncValidatorRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
