use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jschema::JSONSchema;
use serde_json::json;

macro_rules! bench_validate {
    ($b:ident, $name:expr, $schema:tt, $data: tt) => {
        fn $b(c: &mut Criterion) {
            let schema = json!($schema);
            let validator = JSONSchema::compile(&schema).unwrap();
            let data = black_box(json!($data));
            c.bench_function($name, |b| b.iter(|| validator.is_valid(&data)));
        }
    };
}

macro_rules! bench_compile {
    ($b:ident, $name:expr, $schema:tt) => {
        fn $b(c: &mut Criterion) {
            let schema = black_box(json!($schema));
            c.bench_function($name, |b| b.iter(|| JSONSchema::compile(&schema)));
        }
    };
}

bench_validate!(
    additional_properties_valid,
    "additional properties valid",
    {
        "properties": {"foo": {}, "bar": {}},
        "additionalProperties": {"type": "boolean"}
    },
    {"foo" : 1, "bar" : 2, "quux" : true}
);
bench_validate!(
    additional_properties_invalid,
    "additional properties invalid",
    {
        "properties": {"foo": {}, "bar": {}},
        "additionalProperties": {"type": "boolean"}
    },
    {"foo" : 1, "bar" : 2, "quux" : 12}
);
bench_validate!(all_of_valid, "allOf valid", {"allOf": [{"type": "integer"}, {"minimum": 2}]}, 4);
bench_validate!(all_of_invalid, "allOf invalid", {"allOf": [{"type": "integer"}, {"minimum": 2}]}, 1);
bench_validate!(any_of_valid, "anyOf valid", {"anyOf": [{"type": "integer"}, {"minimum": 2}]}, 1);
bench_validate!(one_of_valid, "oneOf valid", {"oneOf": [{"type": "integer"}, {"minimum": 2}]}, 1);
bench_validate!(enum_valid, "enum valid", {"enum": [1, 2, 3, 4]}, 4);
bench_validate!(enum_invalid, "enum invalid", {"enum": [1, 2, 3, 4]}, 5);
bench_validate!(contains_valid, "contains valid", {"contains": {"minimum": 5}}, [5]);
bench_validate!(const_valid, "const valid", {"const": 1}, 1);
bench_validate!(false_schema, "false schema", false, 1);
bench_validate!(format_ipv4_valid, "format ipv4 valid", {"format": "ipv4"}, "127.0.0.1");
bench_validate!(format_ipv4_invalid, "format ipv4 invalid", {"format": "ipv4"}, "127.0.0.999");
bench_validate!(not_valid, "not valid", {"not": {"type": "null"}}, 1);
bench_validate!(min_items_valid, "min items valid", {"minItems": 2}, [1, 2]);
bench_validate!(max_length_valid, "max length valid", {"maxLength": 3}, "123");
bench_validate!(exclusive_minimum_valid, "exclusive minimum valid", {"exclusiveMinimum": 3}, 5);
bench_validate!(minimum_valid, "minimum valid", {"minimum": 3}, 5);
bench_validate!(type_string_valid, "type string valid", {"type": "string"}, "1");
bench_validate!(type_string_invalid, "type string invalid", {"type": "string"}, 1);
bench_validate!(type_integer_valid, "type integer valid", {"type": "integer"}, 1);
bench_validate!(type_integer_invalid, "type integer invalid", {"type": "integer"}, 1.4);
bench_validate!(unique_items_valid, "unique items valid", {"uniqueItems": true}, [1, 2, 3, 4, 5]);
bench_validate!(unique_items_invalid, "unique items invalid", {"uniqueItems": true}, [1, 2, 3, 4, 5, 1]);
bench_validate!(multiple_of_integer_valid, "multipleOf integer valid", {"multipleOf": 5}, 125);
bench_validate!(pattern_valid, "pattern valid", {"pattern": "A[0-9]{2}Z"}, "A11Z");
bench_validate!(properties_valid, "properties valid", {"properties": {"foo": {"type": "string"}}}, {"foo": "bar"});
bench_validate!(required_valid, "required valid", {"required": ["a"]}, {"a": 1});
bench_validate!(ref_valid, "ref valid", {"items": [{"type": "integer"},{"$ref": "#/items/0"}]}, [1, 2]);

bench_compile!(c_required, "compile required", {"required": ["a", "b", "c"]});
bench_compile!(c_properties, "compile properties", {"properties": {"a": true, "b": true, "c": true}});
bench_compile!(c_dependencies, "compile dependencies", {"dependencies": {"bar": ["foo"]}});
bench_compile!(c_enum, "compile enum", {"enum": [1, 2, "3"]});
bench_compile!(c_additional_properties, "compile additional properties", {"properties": {"foo": {}, "bar": {}}, "additionalProperties": false});

criterion_group!(
    benches,
    additional_properties_valid,
    additional_properties_invalid,
    all_of_valid,
    all_of_invalid,
    any_of_valid,
    one_of_valid,
    enum_valid,
    enum_invalid,
    contains_valid,
    const_valid,
    false_schema,
    format_ipv4_valid,
    format_ipv4_invalid,
    not_valid,
    min_items_valid,
    max_length_valid,
    exclusive_minimum_valid,
    minimum_valid,
    type_string_valid,
    type_string_invalid,
    type_integer_valid,
    type_integer_invalid,
    unique_items_valid,
    unique_items_invalid,
    multiple_of_integer_valid,
    pattern_valid,
    properties_valid,
    required_valid,
    ref_valid,
    c_required,
    c_properties,
    c_dependencies,
    c_enum,
    c_additional_properties,
);
criterion_main!(benches);
