//! Message catalogs: rule name → error message, per language.
//!
//! A catalog entry is either a static string or a formatter invoked with the
//! rule's declared argument. Catalogs for different languages carry identical
//! key sets; caller-supplied overrides merge on top, override-wins. Lookup
//! failure for a known rule is a configuration error surfaced at rule-compile
//! time, not at resolve time.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::RuleArg;

pub mod en;
pub mod it;

/// Fallback when a catalog is missing the `validation_error` entry.
const GENERIC_FAILURE: &str = "An error occurred during validation.";

// ============================================================================
// LANGUAGE
// ============================================================================

/// Built-in catalog identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English messages.
    #[default]
    En,
    /// Italian messages.
    It,
}

// ============================================================================
// MESSAGE
// ============================================================================

/// One catalog entry: a static string, or a formatter over the rule argument.
#[derive(Clone)]
pub enum Message {
    /// Returned unmodified; the rule argument is ignored.
    Static(Cow<'static, str>),
    /// Invoked with the rule argument to produce the message.
    Format(Arc<dyn Fn(&RuleArg) -> String + Send + Sync>),
}

impl Message {
    /// Wraps a formatter closure.
    pub fn from_fn(f: impl Fn(&RuleArg) -> String + Send + Sync + 'static) -> Self {
        Self::Format(Arc::new(f))
    }

    /// Produces the message for the given argument.
    #[must_use]
    pub fn resolve(&self, arg: &RuleArg) -> String {
        match self {
            Self::Static(text) => text.clone().into_owned(),
            Self::Format(f) => f(arg),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Self::Format(_) => f.debug_tuple("Format").field(&"<fn>").finish(),
        }
    }
}

impl From<&'static str> for Message {
    fn from(text: &'static str) -> Self {
        Self::Static(Cow::Borrowed(text))
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Static(Cow::Owned(text))
    }
}

// ============================================================================
// MESSAGE CATALOG
// ============================================================================

/// Rule name → [`Message`] table.
///
/// # Examples
///
/// ```rust,ignore
/// use vform_validator::catalog::{Lang, Message, MessageCatalog};
///
/// let mut catalog = MessageCatalog::for_lang(Lang::En);
/// catalog.insert("required", "Please fill this in");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: HashMap<String, Message>,
}

impl MessageCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in catalog for a language.
    #[must_use]
    pub fn for_lang(lang: Lang) -> Self {
        match lang {
            Lang::En => en::catalog(),
            Lang::It => it::catalog(),
        }
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, rule: impl Into<String>, message: impl Into<Message>) {
        self.entries.insert(rule.into(), message.into());
    }

    /// Inserts or replaces a formatter entry.
    pub fn insert_fmt(
        &mut self,
        rule: impl Into<String>,
        f: impl Fn(&RuleArg) -> String + Send + Sync + 'static,
    ) {
        self.entries.insert(rule.into(), Message::from_fn(f));
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, rule: impl Into<String>, message: impl Into<Message>) -> Self {
        self.insert(rule, message);
        self
    }

    /// Merges `overrides` on top of this catalog; overrides win on collision.
    pub fn merge(&mut self, overrides: MessageCatalog) {
        self.entries.extend(overrides.entries);
    }

    /// Looks up an entry.
    #[must_use]
    pub fn get(&self, rule: &str) -> Option<&Message> {
        self.entries.get(rule)
    }

    /// Whether the catalog has an entry for the rule.
    #[must_use]
    pub fn contains(&self, rule: &str) -> bool {
        self.entries.contains_key(rule)
    }

    /// Resolves the message for a rule and argument, or `None` when the rule
    /// has no entry.
    #[must_use]
    pub fn resolve(&self, rule: &str, arg: &RuleArg) -> Option<String> {
        self.entries.get(rule).map(|message| message.resolve(arg))
    }

    /// The generic message reported when an async predicate faults.
    #[must_use]
    pub fn generic_failure(&self) -> String {
        self.resolve("validation_error", &RuleArg::None)
            .unwrap_or_else(|| GENERIC_FAILURE.to_owned())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// FORMATTER HELPERS
// ============================================================================
// Rendering of rule arguments inside catalog formatters. The "?" fallback
// only shows up when a formatter is paired with an argument shape its rule
// would have rejected at compile time.

pub(crate) fn num(arg: &RuleArg) -> String {
    match arg {
        RuleArg::Number(n) => n.to_string(),
        _ => "?".to_owned(),
    }
}

pub(crate) fn pair(arg: &RuleArg) -> (String, String) {
    match arg {
        RuleArg::Pair(lo, hi) => (lo.to_string(), hi.to_string()),
        _ => ("?".to_owned(), "?".to_owned()),
    }
}

pub(crate) fn text(arg: &RuleArg) -> String {
    match arg {
        RuleArg::Str(s) => s.clone(),
        RuleArg::Number(n) => n.to_string(),
        _ => "?".to_owned(),
    }
}

pub(crate) fn list(arg: &RuleArg) -> String {
    match arg {
        RuleArg::List(items) => items.join(", "),
        _ => "?".to_owned(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
