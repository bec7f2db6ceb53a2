//! Rule specs and field values are serde types, so forms can be declared in
//! configuration and compiled at startup.

use pretty_assertions::assert_eq;
use serde_json::json;
use vform_validator::prelude::*;

#[test]
fn rule_spec_round_trips_in_declaration_order() {
    let spec = RuleSpec::new()
        .rule("required")
        .with("min", 3)
        .with("confirmed", "password");

    let encoded = serde_json::to_value(&spec).unwrap();
    let decoded: RuleSpec = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, spec);

    let names: Vec<&str> = decoded.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["required", "min", "confirmed"]);
}

#[test]
fn spec_declared_as_json_compiles() {
    let spec: RuleSpec = serde_json::from_value(json!({
        "rules": {
            "required": "none",
            "min": { "number": 5.0 },
            "one_of": { "list": ["alpha", "beta"] }
        }
    }))
    .unwrap();

    let validator = FormValidator::new();
    let rules = validator.generate_rules(&spec).unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[1].message(), "Must be at least 5 characters");
}

#[test]
fn field_value_wire_shape() {
    assert_eq!(
        serde_json::to_value(FieldValue::from("bob")).unwrap(),
        json!({ "text": "bob" })
    );
    assert_eq!(
        serde_json::to_value(FieldValue::from(2.5)).unwrap(),
        json!({ "number": 2.5 })
    );
    assert_eq!(
        serde_json::to_value(FieldValue::Null).unwrap(),
        json!("null")
    );
    assert_eq!(
        serde_json::to_value(FieldValue::from(FileMeta::new("a.png", "image/png", 12))).unwrap(),
        json!({ "file": { "name": "a.png", "media_type": "image/png", "size": 12 } })
    );
}

#[test]
fn form_data_round_trips() {
    let form = FormData::new()
        .with("username", "bob")
        .with("age", 34)
        .with("subscribed", true);

    let encoded = serde_json::to_string(&form).unwrap();
    let decoded: FormData = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, form);
    assert_eq!(decoded.get("age").as_number(), Some(34.0));
}
