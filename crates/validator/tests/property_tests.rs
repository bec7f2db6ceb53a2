//! Property-based coherence checks over the built-in rule table.

use proptest::prelude::*;
use vform_validator::prelude::*;

fn compiled(spec: &RuleSpec) -> Vec<Rule> {
    FormValidator::new()
        .generate_rules(spec)
        .expect("spec compiles")
}

fn passes(rules: &[Rule], value: &FieldValue) -> bool {
    let form = FormData::new().with("field", value.clone());
    rules.iter().all(|rule| rule.check(form.get("field"), &form))
}

proptest! {
    /// `between(lo, hi)` agrees with `min(lo)` AND `max(hi)` on text.
    #[test]
    fn between_is_min_and_max(text in ".{0,40}", lo in 0u32..20, span in 0u32..20) {
        let hi = lo + span;
        let between = compiled(&RuleSpec::new().with("between", (f64::from(lo), f64::from(hi))));
        let min_max = compiled(
            &RuleSpec::new()
                .with("min", f64::from(lo))
                .with("max", f64::from(hi)),
        );
        let value = FieldValue::from(text);
        prop_assert_eq!(passes(&between, &value), passes(&min_max, &value));
    }

    /// `one_of` and `not_one_of` are exact complements for the same list.
    #[test]
    fn one_of_complements_not_one_of(
        value in "[a-z]{0,4}",
        list in proptest::collection::vec("[a-z]{0,4}", 0..6),
    ) {
        let arg = RuleArg::List(list);
        let one_of = compiled(&RuleSpec::new().with("one_of", arg.clone()));
        let not_one_of = compiled(&RuleSpec::new().with("not_one_of", arg));
        let value = FieldValue::from(value);
        prop_assert_ne!(passes(&one_of, &value), passes(&not_one_of, &value));
    }

    /// `required` accepts any text with at least one non-whitespace char.
    #[test]
    fn required_accepts_non_blank_text(text in "\\S[\\s\\S]{0,20}") {
        let required = compiled(&RuleSpec::new().rule("required"));
        prop_assert!(passes(&required, &FieldValue::from(text)));
    }

    /// Strict equality: `is(x)` passes exactly the text it names.
    #[test]
    fn is_matches_only_its_argument(expected in "[a-z]{1,6}", candidate in "[a-z]{1,6}") {
        let rules = compiled(&RuleSpec::new().with("is", expected.as_str()));
        let outcome = passes(&rules, &FieldValue::from(candidate.as_str()));
        prop_assert_eq!(outcome, expected == candidate);
    }
}
