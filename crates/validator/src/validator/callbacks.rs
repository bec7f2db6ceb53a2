//! Lifecycle callback hooks.
//!
//! Optional caller-supplied hooks fired around field evaluation: validation
//! start/end, field valid, field invalid. Hooks run synchronously on the
//! evaluation flow; keep them cheap.

use std::fmt;

/// Hook receiving a field name.
pub type FieldHook = Box<dyn Fn(&str) + Send + Sync>;

/// Hook receiving a field name and its error message.
pub type FieldErrorHook = Box<dyn Fn(&str, &str) + Send + Sync>;

/// The full hook set. Replacing it via `set_callbacks` drops any hook not
/// present in the replacement.
///
/// # Examples
///
/// ```rust,ignore
/// use vform_validator::validator::Callbacks;
///
/// let callbacks = Callbacks::new()
///     .on_field_invalid(|field, message| eprintln!("{field}: {message}"))
///     .on_validate_end(|field| println!("done: {field}"));
/// ```
#[derive(Default)]
pub struct Callbacks {
    pub(crate) on_validate_start: Option<FieldHook>,
    pub(crate) on_validate_end: Option<FieldHook>,
    pub(crate) on_field_valid: Option<FieldHook>,
    pub(crate) on_field_invalid: Option<FieldErrorHook>,
}

impl Callbacks {
    /// Creates an empty hook set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hook fired when a field (or the form) starts validating.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_validate_start(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_validate_start = Some(Box::new(hook));
        self
    }

    /// Sets the hook fired when a field (or the form) finishes validating.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_validate_end(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_validate_end = Some(Box::new(hook));
        self
    }

    /// Sets the hook fired when a field passes all its rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_field_valid(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_field_valid = Some(Box::new(hook));
        self
    }

    /// Sets the hook fired when a field fails a rule, with the message.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_field_invalid(mut self, hook: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        self.on_field_invalid = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_validate_start", &self.on_validate_start.is_some())
            .field("on_validate_end", &self.on_validate_end.is_some())
            .field("on_field_valid", &self.on_field_valid.is_some())
            .field("on_field_invalid", &self.on_field_invalid.is_some())
            .finish()
    }
}
