//! Field values and form data.
//!
//! A form field holds one of a small closed set of value shapes. Built-in
//! rules are deliberately lenient about mismatched shapes: a length rule on
//! a non-textual value simply evaluates false instead of faulting, so
//! mismatches surface as ordinary validation failures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD VALUE
// ============================================================================

/// The current value of a single form field.
///
/// # Examples
///
/// ```rust,ignore
/// use vform_validator::core::FieldValue;
///
/// let v: FieldValue = "hello".into();
/// assert_eq!(v.as_str(), Some("hello"));
///
/// let n: FieldValue = 42.into();
/// assert_eq!(n.as_number(), Some(42.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
    /// No value (unset field).
    #[default]
    Null,
    /// Boolean value (checkboxes, toggles).
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Textual value.
    Text(String),
    /// An uploaded file, described by its metadata.
    File(FileMeta),
}

impl FieldValue {
    /// Returns true for `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the textual content, if this value is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the numeric content: a number directly, or text that parses
    /// as a finite number after trimming.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Returns the file metadata, if this value is a file.
    #[must_use]
    pub fn as_file(&self) -> Option<&FileMeta> {
        match self {
            Self::File(meta) => Some(meta),
            _ => None,
        }
    }

    /// Length of the textual content in Unicode scalar values.
    #[must_use]
    pub fn text_len(&self) -> Option<usize> {
        self.as_str().map(|s| s.chars().count())
    }

    /// Empty-ish check used by the `length` rule: `Null`, empty text,
    /// zero and `false` are all falsy.
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Number(n) => *n == 0.0,
            Self::Text(text) => text.is_empty(),
            Self::File(_) => false,
        }
    }

    /// Membership comparison against a listed string: text matches as-is,
    /// numbers match their display form.
    #[must_use]
    pub fn matches_str(&self, candidate: &str) -> bool {
        match self {
            Self::Text(text) => text == candidate,
            Self::Number(n) => n.to_string() == candidate,
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<FileMeta> for FieldValue {
    fn from(value: FileMeta) -> Self {
        Self::File(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// FILE METADATA
// ============================================================================

/// Metadata describing an uploaded file, as seen by the file rules
/// (`image`, `size`, `ext`, `mimes`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// File name, including extension.
    pub name: String,
    /// Media type, e.g. `image/png`.
    pub media_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileMeta {
    /// Creates file metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
        }
    }
}

// ============================================================================
// FORM DATA
// ============================================================================

/// The current values of a form, keyed by field name.
///
/// Read-only from the validator's perspective. `get` returns [`FieldValue::Null`]
/// for absent fields, so rules never observe "missing" as a distinct state —
/// in particular, `confirmed` between two absent fields passes.
///
/// # Examples
///
/// ```rust,ignore
/// use vform_validator::core::FormData;
///
/// let form = FormData::new()
///     .with("username", "bob")
///     .with("age", 34);
/// assert_eq!(form.get("username").as_str(), Some("bob"));
/// assert!(form.get("missing").is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    fields: IndexMap<String, FieldValue>,
}

impl FormData {
    /// Creates empty form data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field value, replacing any previous value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns the value of a field, or `Null` when absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &FieldValue {
        static NULL: FieldValue = FieldValue::Null;
        self.fields.get(name).unwrap_or(&NULL)
    }

    /// Whether the field has an entry (even a `Null` one).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the form holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
