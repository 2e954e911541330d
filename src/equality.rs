//! Canonical JSON equality used by `const`, `enum` and `uniqueItems`.
//!
//! Two JSON values are equal when they have the same type and the same content:
//! objects compare by key set and recursively by value (key order does not matter),
//! arrays compare element-wise, and numbers compare as arbitrary-precision decimals
//! so `1` and `1.0` are equal even though their lexemes differ.
use serde_json::Value;

use crate::decimal::Decimal;

pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (Decimal::from_number(a), Decimal::from_number(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| json_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, value)| b.get(key).map_or(false, |other| json_equal(value, other)))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_equals_float_lexeme() {
        assert!(json_equal(&json!(1), &json!(1.0)));
    }

    #[test]
    fn object_key_order_does_not_matter() {
        assert!(json_equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
    }

    #[test]
    fn arrays_compare_element_wise() {
        assert!(json_equal(&json!([1, "a", null]), &json!([1.0, "a", null])));
        assert!(!json_equal(&json!([1, 2]), &json!([1, 2, 3])));
    }

    #[test]
    fn different_types_are_unequal() {
        assert!(!json_equal(&json!(1), &json!("1")));
        assert!(!json_equal(&json!(null), &json!(false)));
    }

    #[test]
    fn objects_with_extra_keys_are_unequal() {
        assert!(!json_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }
}
