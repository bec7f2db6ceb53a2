//! Built-in synchronous rule table.
//!
//! Predicates are lenient about mismatched value shapes: a rule that expects
//! text (or a file) evaluates false on anything else instead of faulting, so
//! a shape mismatch reads as an ordinary validation failure.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::core::{FieldValue, FormData, Predicate, RuleArg, ValidateError};
use crate::registry::ValidatorRegistry;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?|ftp)://[^\s/$.?#].[^\s]*$").expect("url pattern"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?(\d.*){3,}$").expect("phone pattern"));

fn pred(f: impl Fn(&FieldValue, &FormData) -> bool + Send + Sync + 'static) -> Predicate {
    Arc::new(f)
}

// ── argument shape checks ──────────────────────────────────────────────────

fn require_number(rule: &'static str, arg: &RuleArg) -> Result<f64, ValidateError> {
    arg.as_number().ok_or(ValidateError::InvalidArg {
        rule: rule.into(),
        expected: "number",
    })
}

fn require_pair(rule: &'static str, arg: &RuleArg) -> Result<(f64, f64), ValidateError> {
    arg.as_pair().ok_or(ValidateError::InvalidArg {
        rule: rule.into(),
        expected: "number pair",
    })
}

fn require_str(rule: &'static str, arg: &RuleArg) -> Result<String, ValidateError> {
    arg.as_str()
        .map(str::to_owned)
        .ok_or(ValidateError::InvalidArg {
            rule: rule.into(),
            expected: "string",
        })
}

fn require_list(rule: &'static str, arg: &RuleArg) -> Result<Vec<String>, ValidateError> {
    arg.as_list()
        .map(<[String]>::to_vec)
        .ok_or(ValidateError::InvalidArg {
            rule: rule.into(),
            expected: "string list",
        })
}

/// `is` / `is_not` compare strictly against a string or number argument.
fn require_comparable(rule: &'static str, arg: &RuleArg) -> Result<FieldValue, ValidateError> {
    match arg {
        RuleArg::Str(s) => Ok(FieldValue::Text(s.clone())),
        RuleArg::Number(n) => Ok(FieldValue::Number(*n)),
        _ => Err(ValidateError::InvalidArg {
            rule: rule.into(),
            expected: "string or number",
        }),
    }
}

fn matches_text(value: &FieldValue, regex: &Regex) -> bool {
    value.as_str().is_some_and(|s| regex.is_match(s))
}

/// Installs the built-in rule table.
pub(crate) fn install(reg: &mut ValidatorRegistry) {
    reg.register("string", |_| {
        Ok(pred(|value, _| matches!(value, FieldValue::Text(_))))
    });

    reg.register("min", |arg| {
        let min = require_number("min", arg)? as usize;
        Ok(pred(move |value, _| {
            value.text_len().is_some_and(|len| len >= min)
        }))
    });

    reg.register("max", |arg| {
        let max = require_number("max", arg)? as usize;
        Ok(pred(move |value, _| {
            value.text_len().is_some_and(|len| len <= max)
        }))
    });

    reg.register("between", |arg| {
        let (lo, hi) = require_pair("between", arg)?;
        let (lo, hi) = (lo as usize, hi as usize);
        Ok(pred(move |value, _| {
            value.text_len().is_some_and(|len| len >= lo && len <= hi)
        }))
    });

    reg.register("number", |_| {
        Ok(pred(|value, _| value.as_number().is_some()))
    });

    reg.register("email", |_| {
        Ok(pred(|value, _| matches_text(value, &EMAIL_REGEX)))
    });

    reg.register("url", |_| {
        Ok(pred(|value, _| matches_text(value, &URL_REGEX)))
    });

    reg.register("phone", |_| {
        Ok(pred(|value, _| matches_text(value, &PHONE_REGEX)))
    });

    reg.register("required", |_| {
        Ok(pred(|value, _| match value {
            FieldValue::Null => false,
            FieldValue::Text(text) => !text.trim().is_empty(),
            _ => true,
        }))
    });

    reg.register("image", |_| {
        Ok(pred(|value, _| {
            value
                .as_file()
                .is_some_and(|file| file.media_type.starts_with("image/"))
        }))
    });

    reg.register("regex", |arg| {
        let RuleArg::Pattern(pattern) = arg else {
            return Err(ValidateError::InvalidArg {
                rule: "regex".into(),
                expected: "pattern",
            });
        };
        let regex = Regex::new(pattern).map_err(|source| ValidateError::InvalidPattern {
            rule: "regex".into(),
            source,
        })?;
        Ok(pred(move |value, _| matches_text(value, &regex)))
    });

    reg.register("size", |arg| {
        let max_kb = require_number("size", arg)?;
        Ok(pred(move |value, _| {
            value
                .as_file()
                .is_some_and(|file| file.size as f64 <= max_kb * 1024.0)
        }))
    });

    reg.register("confirmed", |arg| {
        let other = require_str("confirmed", arg)?;
        Ok(pred(move |value, form| *value == *form.get(&other)))
    });

    reg.register("one_of", |arg| {
        let list = require_list("one_of", arg)?;
        Ok(pred(move |value, _| {
            list.iter().any(|item| value.matches_str(item))
        }))
    });

    reg.register("not_one_of", |arg| {
        let list = require_list("not_one_of", arg)?;
        Ok(pred(move |value, _| {
            !list.iter().any(|item| value.matches_str(item))
        }))
    });

    reg.register("ext", |arg| {
        let extensions = require_list("ext", arg)?;
        Ok(pred(move |value, _| {
            value.as_file().is_some_and(|file| {
                extensions.iter().any(|ext| file.name.ends_with(ext.as_str()))
            })
        }))
    });

    reg.register("integer", |_| {
        Ok(pred(|value, _| match value {
            FieldValue::Number(n) => n.is_finite() && n.fract() == 0.0,
            FieldValue::Text(text) => text.trim().parse::<i64>().is_ok(),
            _ => false,
        }))
    });

    reg.register("is", |arg| {
        let expected = require_comparable("is", arg)?;
        Ok(pred(move |value, _| *value == expected))
    });

    reg.register("is_not", |arg| {
        let expected = require_comparable("is_not", arg)?;
        Ok(pred(move |value, _| *value != expected))
    });

    // False whenever the value or the declared length is falsy, like the
    // source semantics it reproduces.
    reg.register("length", |arg| {
        let expected = require_number("length", arg)? as usize;
        Ok(pred(move |value, _| {
            !value.is_falsy() && expected != 0 && value.text_len() == Some(expected)
        }))
    });

    reg.register("max_value", |arg| {
        let max = require_number("max_value", arg)?;
        Ok(pred(move |value, _| {
            value.as_number().is_some_and(|n| n <= max)
        }))
    });

    reg.register("min_value", |arg| {
        let min = require_number("min_value", arg)?;
        Ok(pred(move |value, _| {
            value.as_number().is_some_and(|n| n >= min)
        }))
    });

    // Length-based, like `between`, but without the textual type guard in
    // the source; non-text still evaluates false here.
    reg.register("between_values", |arg| {
        let (lo, hi) = require_pair("between_values", arg)?;
        let (lo, hi) = (lo as usize, hi as usize);
        Ok(pred(move |value, _| {
            value.text_len().is_some_and(|len| len >= lo && len <= hi)
        }))
    });

    reg.register("mimes", |arg| {
        let types = require_list("mimes", arg)?;
        Ok(pred(move |value, _| {
            value
                .as_file()
                .is_some_and(|file| types.iter().any(|t| *t == file.media_type))
        }))
    });
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileMeta;

    fn check(rule: &str, arg: &RuleArg, value: &FieldValue) -> bool {
        let registry = ValidatorRegistry::builtin();
        let factory = registry.get(rule).expect("builtin rule");
        let predicate = factory(arg).expect("valid arg");
        predicate(value, &FormData::new())
    }

    #[test]
    fn string_accepts_text_only() {
        assert!(check("string", &RuleArg::None, &"x".into()));
        assert!(!check("string", &RuleArg::None, &42.into()));
        assert!(!check("string", &RuleArg::None, &FieldValue::Null));
    }

    #[test]
    fn min_counts_chars() {
        let arg = RuleArg::Number(5.0);
        assert!(check("min", &arg, &"abcde".into()));
        assert!(check("min", &arg, &"héllò".into()));
        assert!(!check("min", &arg, &"abcd".into()));
        assert!(!check("min", &arg, &42.into())); // non-text is lenient-false
    }

    #[test]
    fn between_is_inclusive() {
        let arg = RuleArg::Pair(2.0, 4.0);
        assert!(check("between", &arg, &"ab".into()));
        assert!(check("between", &arg, &"abcd".into()));
        assert!(!check("between", &arg, &"a".into()));
        assert!(!check("between", &arg, &"abcde".into()));
    }

    #[test]
    fn number_parses_text() {
        assert!(check("number", &RuleArg::None, &42.into()));
        assert!(check("number", &RuleArg::None, &"42.5".into()));
        assert!(!check("number", &RuleArg::None, &"abc".into()));
        assert!(!check("number", &RuleArg::None, &FieldValue::Null));
    }

    #[test]
    fn email_permissive_pattern() {
        assert!(check("email", &RuleArg::None, &"user@example.com".into()));
        assert!(check("email", &RuleArg::None, &"a@b.c".into()));
        assert!(!check("email", &RuleArg::None, &"not-an-email".into()));
        assert!(!check("email", &RuleArg::None, &"user@nodot".into()));
        assert!(!check("email", &RuleArg::None, &"spa ce@x.y".into()));
    }

    #[test]
    fn url_schemes() {
        assert!(check("url", &RuleArg::None, &"http://example.com".into()));
        assert!(check("url", &RuleArg::None, &"https://example.com/p?q=1".into()));
        assert!(check("url", &RuleArg::None, &"ftp://files.example.com".into()));
        assert!(!check("url", &RuleArg::None, &"gopher://old.example".into()));
        assert!(!check("url", &RuleArg::None, &"example.com".into()));
    }

    #[test]
    fn phone_digit_groups() {
        assert!(check("phone", &RuleArg::None, &"+39 055 123456".into()));
        assert!(check("phone", &RuleArg::None, &"5551234".into()));
        assert!(!check("phone", &RuleArg::None, &"+1".into()));
        assert!(!check("phone", &RuleArg::None, &"no digits".into()));
    }

    #[test]
    fn required_trims_whitespace() {
        assert!(check("required", &RuleArg::None, &"bob".into()));
        assert!(check("required", &RuleArg::None, &0.into()));
        assert!(check("required", &RuleArg::None, &false.into()));
        assert!(!check("required", &RuleArg::None, &"   ".into()));
        assert!(!check("required", &RuleArg::None, &"".into()));
        assert!(!check("required", &RuleArg::None, &FieldValue::Null));
    }

    #[test]
    fn image_checks_media_type() {
        let png = FieldValue::from(FileMeta::new("a.png", "image/png", 10));
        let pdf = FieldValue::from(FileMeta::new("a.pdf", "application/pdf", 10));
        assert!(check("image", &RuleArg::None, &png));
        assert!(!check("image", &RuleArg::None, &pdf));
        assert!(!check("image", &RuleArg::None, &"a.png".into()));
    }

    #[test]
    fn regex_compiles_at_factory_time() {
        let arg = RuleArg::Pattern(r"^\d{3}$".into());
        assert!(check("regex", &arg, &"123".into()));
        assert!(!check("regex", &arg, &"12x".into()));

        let registry = ValidatorRegistry::builtin();
        let factory = registry.get("regex").unwrap();
        assert!(matches!(
            factory(&RuleArg::Pattern("(unclosed".into())),
            Err(ValidateError::InvalidPattern { .. })
        ));
        assert!(matches!(
            factory(&RuleArg::None),
            Err(ValidateError::InvalidArg { .. })
        ));
    }

    #[test]
    fn size_is_kilobytes() {
        let arg = RuleArg::Number(2.0);
        let small = FieldValue::from(FileMeta::new("a.bin", "application/octet-stream", 2048));
        let big = FieldValue::from(FileMeta::new("b.bin", "application/octet-stream", 2049));
        assert!(check("size", &arg, &small));
        assert!(!check("size", &arg, &big));
    }

    #[test]
    fn confirmed_reads_sibling_field() {
        let registry = ValidatorRegistry::builtin();
        let predicate = registry.get("confirmed").unwrap()(&RuleArg::Str("password".into())).unwrap();
        let form = FormData::new().with("password", "x").with("password_confirmation", "x");
        assert!(predicate(form.get("password_confirmation"), &form));

        let form = FormData::new().with("password", "x").with("password_confirmation", "y");
        assert!(!predicate(form.get("password_confirmation"), &form));

        // Both fields absent: Null == Null.
        let form = FormData::new();
        assert!(predicate(form.get("password_confirmation"), &form));
    }

    #[test]
    fn one_of_membership() {
        let arg = RuleArg::from(["red", "green", "42"].as_slice());
        assert!(check("one_of", &arg, &"red".into()));
        assert!(check("one_of", &arg, &42.into()));
        assert!(!check("one_of", &arg, &"blue".into()));
        assert!(check("not_one_of", &arg, &"blue".into()));
        assert!(!check("not_one_of", &arg, &"green".into()));
    }

    #[test]
    fn ext_matches_suffix() {
        let arg = RuleArg::from([".png", ".jpg"].as_slice());
        let png = FieldValue::from(FileMeta::new("photo.png", "image/png", 1));
        let gif = FieldValue::from(FileMeta::new("anim.gif", "image/gif", 1));
        assert!(check("ext", &arg, &png));
        assert!(!check("ext", &arg, &gif));
    }

    #[test]
    fn integer_rejects_fractions() {
        assert!(check("integer", &RuleArg::None, &42.into()));
        assert!(check("integer", &RuleArg::None, &"17".into()));
        assert!(!check("integer", &RuleArg::None, &42.5.into()));
        assert!(!check("integer", &RuleArg::None, &"42.9".into()));
        assert!(!check("integer", &RuleArg::None, &"abc".into()));
    }

    #[test]
    fn is_and_is_not_strict_equality() {
        assert!(check("is", &RuleArg::Str("yes".into()), &"yes".into()));
        assert!(!check("is", &RuleArg::Str("yes".into()), &"no".into()));
        assert!(check("is", &RuleArg::Number(5.0), &5.into()));
        // Text "5" is not strictly the number 5.
        assert!(!check("is", &RuleArg::Number(5.0), &"5".into()));
        assert!(check("is_not", &RuleArg::Str("admin".into()), &"bob".into()));
        assert!(!check("is_not", &RuleArg::Str("admin".into()), &"admin".into()));
    }

    #[test]
    fn length_falsy_rules() {
        assert!(check("length", &RuleArg::Number(3.0), &"abc".into()));
        assert!(!check("length", &RuleArg::Number(3.0), &"ab".into()));
        assert!(!check("length", &RuleArg::Number(0.0), &"".into()));
        assert!(!check("length", &RuleArg::Number(3.0), &FieldValue::Null));
    }

    #[test]
    fn value_bounds() {
        assert!(check("max_value", &RuleArg::Number(10.0), &10.into()));
        assert!(!check("max_value", &RuleArg::Number(10.0), &11.into()));
        assert!(check("min_value", &RuleArg::Number(18.0), &"21".into()));
        assert!(!check("min_value", &RuleArg::Number(18.0), &17.into()));
        assert!(!check("min_value", &RuleArg::Number(18.0), &"abc".into()));
    }

    #[test]
    fn between_values_is_length_based() {
        let arg = RuleArg::Pair(2.0, 4.0);
        assert!(check("between_values", &arg, &"abc".into()));
        assert!(!check("between_values", &arg, &"a".into()));
        assert!(!check("between_values", &arg, &3.into()));
    }

    #[test]
    fn mimes_exact_match() {
        let arg = RuleArg::from(["image/png", "image/jpeg"].as_slice());
        let png = FieldValue::from(FileMeta::new("a.png", "image/png", 1));
        let webp = FieldValue::from(FileMeta::new("a.webp", "image/webp", 1));
        assert!(check("mimes", &arg, &png));
        assert!(!check("mimes", &arg, &webp));
    }

    #[test]
    fn wrong_arg_shapes_are_rejected() {
        let registry = ValidatorRegistry::builtin();
        for (rule, bad) in [
            ("min", RuleArg::Str("5".into())),
            ("between", RuleArg::Number(2.0)),
            ("confirmed", RuleArg::None),
            ("one_of", RuleArg::Str("red".into())),
            ("is", RuleArg::List(vec!["x".into()])),
        ] {
            let factory = registry.get(rule).unwrap();
            assert!(
                matches!(factory(&bad), Err(ValidateError::InvalidArg { .. })),
                "`{rule}` accepted a bad arg"
            );
        }
    }
}
