//! Configuration errors raised when declaring or compiling rules.
//!
//! These are programming mistakes in the form's declaration — an unknown
//! rule name, a malformed argument, evaluation before registration — and
//! are surfaced immediately as `Err`, never swallowed. Ordinary validation
//! failures are not errors; they land in the error state as messages.

use thiserror::Error;

/// Error raised while compiling rule specs or driving the convenience
/// evaluation entry points.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidateError {
    /// A rule name has no entry in the synchronous validator registry.
    #[error("unknown validation rule `{0}`")]
    UnknownRule(String),

    /// A rule name has no entry in the asynchronous validator registry.
    #[error("unknown async validation rule `{0}`")]
    UnknownAsyncRule(String),

    /// The message catalog has no entry for a known rule.
    #[error("no message registered for rule `{0}`")]
    MissingMessage(String),

    /// A rule was declared with an argument of the wrong shape.
    #[error("rule `{rule}` expects a {expected} argument")]
    InvalidArg {
        /// Rule that rejected the argument.
        rule: String,
        /// Human description of the accepted shape, e.g. `"number"`.
        expected: &'static str,
    },

    /// A `regex` rule was declared with a pattern that does not compile.
    #[error("invalid pattern for rule `{rule}`: {source}")]
    InvalidPattern {
        /// Rule that carried the pattern.
        rule: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A no-argument evaluation entry point was called before
    /// `set_validation_rules`.
    #[error("validation rules not configured; call set_validation_rules() first")]
    RulesNotConfigured,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_names_the_rule() {
        let err = ValidateError::UnknownRule("nope".into());
        assert_eq!(err.to_string(), "unknown validation rule `nope`");
    }

    #[test]
    fn invalid_arg_names_expected_shape() {
        let err = ValidateError::InvalidArg {
            rule: "min".into(),
            expected: "number",
        };
        assert_eq!(err.to_string(), "rule `min` expects a number argument");
    }
}
