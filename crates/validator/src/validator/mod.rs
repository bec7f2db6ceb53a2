//! The form validator: rule compilation, field/form evaluation, error state
//! and lifecycle hooks behind one explicit instance.
//!
//! Construct with [`FormValidator::new`] or [`FormValidator::builder`]; there
//! is no ambient default instance, so independent validators (one per form)
//! coexist without interference.
//!
//! Evaluation order per field: synchronous rules first, in declaration
//! order, short-circuiting on the first failure; only when all of them pass
//! do the field's asynchronous rules run, fanned out concurrently and joined
//! before the verdict. Fields of a form evaluate strictly sequentially so a
//! cross-field rule (`confirmed`) reads settled sibling values.

use futures::future::join_all;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, error, trace};

use crate::catalog::{Lang, Message, MessageCatalog};
use crate::core::{
    AsyncPredicate, AsyncRule, AsyncValidationRules, FieldValue, FormData, Predicate, Rule,
    RuleArg, RuleSpec, ValidateError, ValidationRules,
};
use crate::registry::{AsyncFactory, AsyncValidatorRegistry, Factory, ValidatorRegistry};

mod callbacks;
mod state;

pub use callbacks::{Callbacks, FieldErrorHook, FieldHook};

use state::ErrorState;

/// Scope name passed to the start/end hooks by the form evaluator.
const FORM_SCOPE: &str = "form";

/// Outcome of a field's asynchronous phase.
enum AsyncPhase {
    Passed,
    Failed(String),
    Faulted(String),
}

// ============================================================================
// FORM VALIDATOR
// ============================================================================

/// Declarative form validator.
///
/// # Examples
///
/// ```rust,ignore
/// use vform_validator::prelude::*;
///
/// let mut validator = FormValidator::new();
/// let username = validator.generate_rules(
///     &RuleSpec::new().rule("required").with("min", 3),
/// )?;
/// validator.set_validation_rules(
///     Some(IndexMap::from([("username".to_owned(), username)])),
///     None,
/// );
///
/// let form = FormData::new().with("username", "bo");
/// validator.validate_form(&form).await?;
/// assert!(validator.is_invalid("username"));
/// # Ok::<(), ValidateError>(())
/// ```
#[derive(Debug)]
pub struct FormValidator {
    messages: MessageCatalog,
    validators: ValidatorRegistry,
    async_validators: AsyncValidatorRegistry,
    rules: Option<ValidationRules>,
    async_rules: Option<AsyncValidationRules>,
    auto_focus: bool,
    callbacks: Callbacks,
    state: RwLock<ErrorState>,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormValidator {
    /// Creates a validator with the default configuration: English catalog,
    /// built-in registries, auto-focus tracking on.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a configured validator.
    #[must_use]
    pub fn builder() -> FormValidatorBuilder {
        FormValidatorBuilder::new()
    }

    // ── rule compilation ───────────────────────────────────────────────────

    /// Compiles a declarative spec against the synchronous registry and the
    /// message catalog, preserving declaration order.
    pub fn generate_rules(&self, spec: &RuleSpec) -> Result<Vec<Rule>, ValidateError> {
        spec.iter()
            .map(|(name, arg)| {
                let factory = self
                    .validators
                    .get(name)
                    .ok_or_else(|| ValidateError::UnknownRule(name.to_owned()))?;
                let message = self
                    .messages
                    .resolve(name, arg)
                    .ok_or_else(|| ValidateError::MissingMessage(name.to_owned()))?;
                Ok(Rule::new(factory(arg)?, message))
            })
            .collect()
    }

    /// Compiles a declarative spec against the asynchronous registry and the
    /// message catalog, preserving declaration order.
    pub fn generate_async_rules(&self, spec: &RuleSpec) -> Result<Vec<AsyncRule>, ValidateError> {
        spec.iter()
            .map(|(name, arg)| {
                let factory = self
                    .async_validators
                    .get(name)
                    .ok_or_else(|| ValidateError::UnknownAsyncRule(name.to_owned()))?;
                let message = self
                    .messages
                    .resolve(name, arg)
                    .ok_or_else(|| ValidateError::MissingMessage(name.to_owned()))?;
                Ok(AsyncRule::new(factory(arg)?, message))
            })
            .collect()
    }

    /// Registers the form-wide rule set used by the no-argument entry
    /// points. `None` leaves the corresponding set unchanged.
    pub fn set_validation_rules(
        &mut self,
        rules: Option<ValidationRules>,
        async_rules: Option<AsyncValidationRules>,
    ) {
        if let Some(rules) = rules {
            debug!("Validation rules registered for {} fields", rules.len());
            self.rules = Some(rules);
        }
        if let Some(async_rules) = async_rules {
            debug!(
                "Async validation rules registered for {} fields",
                async_rules.len()
            );
            self.async_rules = Some(async_rules);
        }
    }

    // ── evaluation: registered rule set ────────────────────────────────────

    /// Validates a lone value as the named field, using the registered rule
    /// set.
    pub async fn validate_field(
        &self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), ValidateError> {
        let form = FormData::new().with(field, value);
        self.validate_form_field(field, &form).await
    }

    /// Validates one field of the form, using the registered rule set.
    pub async fn validate_form_field(
        &self,
        field: &str,
        form: &FormData,
    ) -> Result<(), ValidateError> {
        let rules = self.rules.as_ref().ok_or(ValidateError::RulesNotConfigured)?;
        self.validate_form_field_with_rules(field, form, rules, self.async_rules.as_ref())
            .await;
        Ok(())
    }

    /// Validates every declared field, using the registered rule set.
    /// Returns true when no field ended with an error.
    pub async fn validate_form(&self, form: &FormData) -> Result<bool, ValidateError> {
        let rules = self.rules.as_ref().ok_or(ValidateError::RulesNotConfigured)?;
        Ok(self
            .validate_form_with_rules(form, rules, self.async_rules.as_ref())
            .await)
    }

    // ── evaluation: explicit rule set ──────────────────────────────────────

    /// Validates one field against an explicit rule set, mutating the error
    /// state and firing hooks.
    ///
    /// A field with no entry in either rule map is left untouched: no state
    /// change, no hooks. A field with a present-but-empty rule list flows
    /// through and ends evaluated-valid.
    pub async fn validate_form_field_with_rules(
        &self,
        field: &str,
        form: &FormData,
        rules: &ValidationRules,
        async_rules: Option<&AsyncValidationRules>,
    ) {
        let field_rules = rules.get(field).map(Vec::as_slice);
        let field_async = async_rules
            .and_then(|map| map.get(field))
            .map(Vec::as_slice);
        if field_rules.is_none() && field_async.is_none() {
            return;
        }

        self.fire(&self.callbacks.on_validate_start, field);
        self.evaluate_field(field, form, field_rules, field_async)
            .await;
        self.fire(&self.callbacks.on_validate_end, field);
    }

    /// Validates every field declared in `rules`, in insertion order, one
    /// after the other. Returns true when no field ended with an error.
    pub async fn validate_form_with_rules(
        &self,
        form: &FormData,
        rules: &ValidationRules,
        async_rules: Option<&AsyncValidationRules>,
    ) -> bool {
        let mut is_valid = true;
        self.fire(&self.callbacks.on_validate_start, FORM_SCOPE);

        for field in rules.keys() {
            self.validate_form_field_with_rules(field, form, rules, async_rules)
                .await;
            if self.is_invalid(field) {
                is_valid = false;
            }
        }

        self.fire(&self.callbacks.on_validate_end, FORM_SCOPE);
        is_valid
    }

    // ── field evaluation core ──────────────────────────────────────────────

    async fn evaluate_field(
        &self,
        field: &str,
        form: &FormData,
        sync_rules: Option<&[Rule]>,
        async_rules: Option<&[AsyncRule]>,
    ) {
        let value = form.get(field);

        if let Some(rules) = sync_rules {
            for rule in rules {
                if !rule.check(value, form) {
                    trace!("Field {field} failed: {}", rule.message());
                    self.record_failure(field, rule.message().to_owned());
                    return;
                }
            }
        }

        if let Some(rules) = async_rules {
            match self.run_async_rules(field, value, form, rules).await {
                AsyncPhase::Passed => {}
                AsyncPhase::Failed(message) => {
                    trace!("Field {field} failed: {message}");
                    self.record_failure(field, message);
                    return;
                }
                AsyncPhase::Faulted(message) => {
                    // Not an actionable field error: no invalid hook, no
                    // focus tracking, just the generic message.
                    self.state.write().set_fault(field, message);
                    return;
                }
            }
        }

        self.state.write().set_valid(field);
        self.fire(&self.callbacks.on_field_valid, field);
    }

    /// Fans out every async predicate against the same `(value, form)`
    /// snapshot and joins before the verdict. Any execution fault wins over
    /// verdicts; otherwise the first false in declaration order wins.
    async fn run_async_rules(
        &self,
        field: &str,
        value: &FieldValue,
        form: &FormData,
        rules: &[AsyncRule],
    ) -> AsyncPhase {
        let outcomes = join_all(rules.iter().map(|rule| rule.check(value, form))).await;

        if let Some(fault) = outcomes.iter().find_map(|outcome| outcome.as_ref().err()) {
            error!("Async validator execution failed for field {field}: {fault}");
            return AsyncPhase::Faulted(self.messages.generic_failure());
        }

        for (rule, outcome) in rules.iter().zip(outcomes) {
            if matches!(outcome, Ok(false)) {
                return AsyncPhase::Failed(rule.message().to_owned());
            }
        }
        AsyncPhase::Passed
    }

    fn record_failure(&self, field: &str, message: String) {
        self.state
            .write()
            .set_failure(field, message.clone(), self.auto_focus);
        if let Some(hook) = &self.callbacks.on_field_invalid {
            hook(field, &message);
        }
    }

    fn fire(&self, hook: &Option<FieldHook>, field: &str) {
        if let Some(hook) = hook {
            hook(field);
        }
    }

    // ── query surface ──────────────────────────────────────────────────────

    /// Whether the field currently holds a truthy error.
    #[must_use]
    pub fn is_invalid(&self, field: &str) -> bool {
        self.state.read().is_invalid(field)
    }

    /// Whether the field holds a specific error message. Equivalent to
    /// [`is_invalid`](Self::is_invalid) under the message-or-null
    /// representation; kept as a distinct query on purpose.
    #[must_use]
    pub fn has_error(&self, field: &str) -> bool {
        self.state.read().is_invalid(field)
    }

    /// The field's current error message, if any. A never-evaluated field
    /// and an evaluated-valid field both read as `None`.
    #[must_use]
    pub fn get_error(&self, field: &str) -> Option<String> {
        self.state.read().get(field)
    }

    /// Snapshot of the whole error map. `None` values are evaluated-valid
    /// fields; absent keys were never evaluated.
    #[must_use]
    pub fn get_errors(&self) -> IndexMap<String, Option<String>> {
        self.state.read().snapshot()
    }

    /// Clears one field's error and releases the focus pointer if it was
    /// aimed at the field.
    pub fn clear_error(&self, field: &str) {
        self.state.write().clear(field);
    }

    /// Clears every error and the focus pointer.
    pub fn reset_errors(&self) {
        self.state.write().reset();
    }

    /// The first field (by evaluation order) currently in error, when
    /// auto-focus tracking is enabled. The UI layer decides what to do
    /// with it.
    #[must_use]
    pub fn first_invalid_field(&self) -> Option<String> {
        self.state.read().first_invalid()
    }

    // ── registries and catalog ─────────────────────────────────────────────

    /// Adds (or overrides) a synchronous rule together with its message.
    pub fn add_custom_validator(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&RuleArg) -> Result<Predicate, ValidateError> + Send + Sync + 'static,
        message: impl Into<Message>,
    ) {
        let name = name.into();
        self.messages.insert(name.clone(), message);
        self.validators.register(name, factory);
    }

    /// Adds (or overrides) an asynchronous rule together with its message.
    pub fn add_custom_async_validator(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&RuleArg) -> Result<AsyncPredicate, ValidateError> + Send + Sync + 'static,
        message: impl Into<Message>,
    ) {
        let name = name.into();
        self.messages.insert(name.clone(), message);
        self.async_validators.register(name, factory);
    }

    /// The synchronous rule registry.
    #[must_use]
    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    /// The asynchronous rule registry.
    #[must_use]
    pub fn async_validators(&self) -> &AsyncValidatorRegistry {
        &self.async_validators
    }

    /// The active message catalog.
    #[must_use]
    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    // ── callbacks ──────────────────────────────────────────────────────────

    /// Replaces the whole hook set.
    pub fn set_callbacks(&mut self, callbacks: Callbacks) {
        self.callbacks = callbacks;
    }

    /// Sets the validation-start hook.
    pub fn set_on_validate_start(&mut self, hook: impl Fn(&str) + Send + Sync + 'static) {
        self.callbacks.on_validate_start = Some(Box::new(hook));
    }

    /// Sets the validation-end hook.
    pub fn set_on_validate_end(&mut self, hook: impl Fn(&str) + Send + Sync + 'static) {
        self.callbacks.on_validate_end = Some(Box::new(hook));
    }

    /// Sets the field-valid hook.
    pub fn set_on_field_valid(&mut self, hook: impl Fn(&str) + Send + Sync + 'static) {
        self.callbacks.on_field_valid = Some(Box::new(hook));
    }

    /// Sets the field-invalid hook.
    pub fn set_on_field_invalid(&mut self, hook: impl Fn(&str, &str) + Send + Sync + 'static) {
        self.callbacks.on_field_invalid = Some(Box::new(hook));
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for a configured [`FormValidator`].
///
/// # Examples
///
/// ```rust,ignore
/// use vform_validator::prelude::*;
///
/// let validator = FormValidator::builder()
///     .lang(Lang::It)
///     .auto_focus(false)
///     .extra_messages(MessageCatalog::new().with("required", "Serve un valore"))
///     .build();
/// ```
pub struct FormValidatorBuilder {
    lang: Lang,
    catalog: Option<MessageCatalog>,
    extra_messages: Option<MessageCatalog>,
    custom_validators: Vec<(String, Factory)>,
    custom_async_validators: Vec<(String, AsyncFactory)>,
    auto_focus: bool,
}

impl std::fmt::Debug for FormValidatorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidatorBuilder")
            .field("lang", &self.lang)
            .field("has_catalog", &self.catalog.is_some())
            .field("has_extra_messages", &self.extra_messages.is_some())
            .field(
                "custom_validators",
                &self
                    .custom_validators
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>(),
            )
            .field(
                "custom_async_validators",
                &self
                    .custom_async_validators
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>(),
            )
            .field("auto_focus", &self.auto_focus)
            .finish()
    }
}

impl Default for FormValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormValidatorBuilder {
    /// Starts from the defaults: English catalog, auto-focus on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lang: Lang::default(),
            catalog: None,
            extra_messages: None,
            custom_validators: Vec::new(),
            custom_async_validators: Vec::new(),
            auto_focus: true,
        }
    }

    /// Picks a built-in catalog by language.
    #[must_use = "builder methods must be chained or built"]
    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    /// Supplies a full custom catalog instead of a built-in one.
    #[must_use = "builder methods must be chained or built"]
    pub fn catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Message overrides merged on top of the chosen catalog.
    #[must_use = "builder methods must be chained or built"]
    pub fn extra_messages(mut self, overrides: MessageCatalog) -> Self {
        self.extra_messages = Some(overrides);
        self
    }

    /// Adds a custom synchronous rule factory; a built-in name overrides the
    /// built-in. Its message must come from the catalog or `extra_messages`.
    #[must_use = "builder methods must be chained or built"]
    pub fn custom_validator(
        mut self,
        name: impl Into<String>,
        factory: impl Fn(&RuleArg) -> Result<Predicate, ValidateError> + Send + Sync + 'static,
    ) -> Self {
        self.custom_validators
            .push((name.into(), std::sync::Arc::new(factory)));
        self
    }

    /// Adds a custom asynchronous rule factory; same override semantics as
    /// [`custom_validator`](Self::custom_validator).
    #[must_use = "builder methods must be chained or built"]
    pub fn custom_async_validator(
        mut self,
        name: impl Into<String>,
        factory: impl Fn(&RuleArg) -> Result<AsyncPredicate, ValidateError> + Send + Sync + 'static,
    ) -> Self {
        self.custom_async_validators
            .push((name.into(), std::sync::Arc::new(factory)));
        self
    }

    /// Enables or disables first-invalid-field tracking (default: enabled).
    #[must_use = "builder methods must be chained or built"]
    pub fn auto_focus(mut self, enabled: bool) -> Self {
        self.auto_focus = enabled;
        self
    }

    /// Builds the validator.
    #[must_use]
    pub fn build(self) -> FormValidator {
        let mut messages = self
            .catalog
            .unwrap_or_else(|| MessageCatalog::for_lang(self.lang));
        if let Some(overrides) = self.extra_messages {
            messages.merge(overrides);
        }

        let mut validators = ValidatorRegistry::builtin();
        for (name, factory) in self.custom_validators {
            validators.register_factory(name, factory);
        }

        let mut async_validators = AsyncValidatorRegistry::builtin();
        for (name, factory) in self.custom_async_validators {
            async_validators.register_factory(name, factory);
        }

        FormValidator {
            messages,
            validators,
            async_validators,
            rules: None,
            async_rules: None,
            auto_focus: self.auto_focus,
            callbacks: Callbacks::default(),
            state: RwLock::new(ErrorState::default()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
