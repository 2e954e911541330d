//! End-to-end scenarios exercising the public surface: compiling a schema and
//! validating instances against it, including the error-tree shape.
use std::sync::Arc;

use jschema::{CancellationToken, Draft, Error, JSONSchema, Loader, ValidationErrorContext, ValidationErrorKind};
use serde_json::json;
use test_case::test_case;

#[test_case(json!({"type": "string"}), json!("hi"), true; "matching type passes")]
#[test_case(json!({"type": "string"}), json!(1), false; "mismatched type fails")]
#[test_case(json!({"type": ["string", "null"]}), json!(null), true; "type list accepts any member")]
#[test_case(json!({"minimum": 3}), json!(3), true; "minimum is inclusive")]
#[test_case(json!({"exclusiveMinimum": 3}), json!(3), false; "exclusive minimum excludes the bound")]
fn basic_type_and_bound_checks(schema: serde_json::Value, instance: serde_json::Value, expected: bool) {
    let compiled = JSONSchema::compile(&schema).unwrap();
    assert_eq!(compiled.is_valid(&instance), expected);
}

#[test]
fn type_mismatch_reports_instance_and_schema_pointers() {
    let schema = json!({"properties": {"age": {"type": "integer"}}});
    let instance = json!({"age": "old"});
    let compiled = JSONSchema::compile(&schema).unwrap();
    let err = compiled.validate(&instance).unwrap_err();
    assert!(matches!(err.kind, ValidationErrorKind::Type { .. }));
    assert_eq!(err.instance_path.to_string(), "#/age");
    assert_eq!(err.schema_path.to_string(), "#/properties/age/type");
}

#[test]
fn scenario_1_nested_property_type_mismatch() {
    // spec §8 scenario 1, verbatim.
    let schema = json!({
        "type": "object",
        "properties": {"bar": {"type": "string"}},
        "required": ["bar"]
    });
    let instance = json!({"bar": 1234});
    let compiled = JSONSchema::compile(&schema).unwrap();
    let err = compiled.validate(&instance).unwrap_err();
    assert_eq!(err.instance_path.to_string(), "#/bar");
    assert_eq!(err.schema_path.to_string(), "#/properties/bar/type");
    match err.kind {
        ValidationErrorKind::Type { expected, actual } => {
            assert_eq!(expected, vec![jschema::PrimitiveType::String]);
            assert_eq!(actual, jschema::PrimitiveType::Number);
        }
        other => panic!("expected Type, got {:?}", other),
    }
}

#[test]
fn ref_failure_is_wrapped_as_a_cause_rooted_at_the_referent() {
    let schema = json!({
        "$ref": "#/definitions/node",
        "definitions": {
            "node": { "type": "object", "properties": { "value": { "type": "integer" } } }
        }
    });
    let compiled = JSONSchema::compile(&schema).unwrap();
    let err = compiled.validate(&json!({"value": "not an integer"})).unwrap_err();
    assert!(matches!(err.kind, ValidationErrorKind::Ref { .. }));
    assert_eq!(err.schema_path.to_string(), "#/$ref");
    assert_eq!(err.causes.len(), 1);
    let cause = &err.causes[0];
    assert!(matches!(cause.kind, ValidationErrorKind::Type { .. }));
    assert_eq!(cause.schema_path.to_string(), "#/definitions/node/properties/value/type");
}

#[test]
fn missing_required_properties_carry_pointer_context() {
    let schema = json!({"required": ["id", "name"]});
    let instance = json!({"id": 1});
    let compiled = JSONSchema::compile(&schema).unwrap();
    let err = compiled.validate(&instance).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::Required);
    match err.context {
        Some(ValidationErrorContext::Required { missing }) => {
            assert_eq!(missing.len(), 1);
            assert_eq!(missing[0].to_string(), "#/name");
        }
        other => panic!("expected Required context, got {:?}", other),
    }
}

#[test]
fn all_of_failure_carries_one_indexed_cause_per_failing_branch() {
    let schema = json!({"allOf": [{"minimum": 5}, {"type": "integer"}]});
    let instance = json!(2.5);
    let compiled = JSONSchema::compile(&schema).unwrap();
    let err = compiled.validate(&instance).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::AllOf);
    assert_eq!(err.causes.len(), 2);
    assert_eq!(err.causes[0].schema_path.to_string(), "#/allOf/0/minimum");
    assert_eq!(err.causes[1].schema_path.to_string(), "#/allOf/1/type");
}

#[test]
fn one_of_failure_distinguishes_zero_valid_from_multiple_valid() {
    let schema = json!({"oneOf": [{"minimum": 0}, {"maximum": 100}]});
    let compiled = JSONSchema::compile(&schema).unwrap();

    // 50 satisfies both branches.
    let err = compiled.validate(&json!(50)).unwrap_err();
    assert!(matches!(err.kind, ValidationErrorKind::OneOfMultipleValid { .. }));

    // -50 satisfies neither.
    let schema_both_fail = json!({"oneOf": [{"minimum": 0, "maximum": 10}, {"minimum": 20, "maximum": 30}]});
    let compiled = JSONSchema::compile(&schema_both_fail).unwrap();
    let err = compiled.validate(&json!(-5)).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::OneOfNoneValid);
    assert_eq!(err.causes.len(), 2);
}

#[test]
fn self_referential_ref_cycle_compiles_and_validates_in_finite_time() {
    let schema = json!({
        "$ref": "#/definitions/node",
        "definitions": {
            "node": {
                "type": "object",
                "properties": {
                    "value": { "type": "integer" },
                    "next": { "$ref": "#/definitions/node" }
                }
            }
        }
    });
    let compiled = JSONSchema::compile(&schema).unwrap();
    let instance = json!({"value": 1, "next": {"value": 2, "next": {"value": 3}}});
    assert!(compiled.is_valid(&instance));

    let broken = json!({"value": 1, "next": {"value": "not an integer"}});
    assert!(!compiled.is_valid(&broken));
}

#[test]
fn draft4_exclusive_minimum_boolean_matches_draft6_numeric_form() {
    let draft4 = json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "minimum": 3,
        "exclusiveMinimum": true
    });
    let draft6 = json!({
        "$schema": "http://json-schema.org/draft-06/schema#",
        "exclusiveMinimum": 3
    });
    let a = JSONSchema::compile(&draft4).unwrap();
    let b = JSONSchema::compile(&draft6).unwrap();
    for value in [json!(2), json!(3), json!(4)] {
        assert_eq!(a.is_valid(&value), b.is_valid(&value), "value {} disagreed between draft4 and draft6 forms", value);
    }
}

#[test]
fn unique_items_treats_equal_numbers_and_reordered_objects_as_duplicates() {
    let schema = json!({"uniqueItems": true});
    let compiled = JSONSchema::compile(&schema).unwrap();
    assert!(!compiled.is_valid(&json!([1, 1.0])));
    assert!(!compiled.is_valid(&json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}])));
    assert!(compiled.is_valid(&json!([1, 2, 3])));
}

#[test]
fn unknown_schema_draft_is_rejected_up_front() {
    let schema = json!({"$schema": "http://example.com/not-a-real-draft#"});
    let err = JSONSchema::compile(&schema).unwrap_err();
    assert!(matches!(err, Error::UnknownDraft { .. }));
}

#[test]
fn base64_loader_resolves_an_external_ref() {
    // `{"type":"integer"}` base64-encoded, addressed as an external resource.
    let schema = json!({"$ref": "base64://eyJ0eXBlIjogImludGVnZXIifQ=="});
    let compiled = JSONSchema::options().compile(&schema).unwrap();
    assert!(compiled.is_valid(&json!(1)));
    assert!(!compiled.is_valid(&json!("x")));
}

struct StaticLoader;

impl Loader for StaticLoader {
    fn load(&self, _token: &CancellationToken, url: &str) -> Result<Vec<u8>, Error> {
        if url == "mem://root" {
            Ok(br#"{"type": "boolean"}"#.to_vec())
        } else {
            Err(Error::Load { url: url.to_owned(), message: "no such resource".to_owned() })
        }
    }
}

#[test]
fn custom_loader_override_is_used_for_compile_url() {
    let compiled = JSONSchema::options().with_loader(Arc::new(StaticLoader)).compile_url("mem://root").unwrap();
    assert!(compiled.is_valid(&json!(true)));
    assert!(!compiled.is_valid(&json!(1)));
}

#[test]
fn with_annotations_extracts_title_and_default_without_affecting_validity() {
    let schema = json!({"type": "string", "title": "Name", "default": "anonymous"});
    let compiled = JSONSchema::options().with_annotations().compile(&schema).unwrap();
    assert!(compiled.is_valid(&json!("x")));
    assert!(!compiled.is_valid(&json!(1)));
}

#[test]
fn draft_builder_overrides_default_when_schema_is_silent() {
    let schema = json!({"minimum": 1, "exclusiveMinimum": true});
    let compiled = JSONSchema::options().with_draft(Draft::Draft4).compile(&schema).unwrap();
    assert!(!compiled.is_valid(&json!(1)));
    assert!(compiled.is_valid(&json!(2)));
}
