use std::{convert::TryFrom, fmt};

use serde_json::Value;

use crate::decimal::Decimal;

/// One of the seven JSON type tags a schema's `type` keyword can name (spec §3).
///
/// Matching against this enum rather than a string keeps `type` checks branch-predictable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Array => write!(f, "array"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Object => write!(f, "object"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

impl TryFrom<&str> for PrimitiveType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "array" => Ok(PrimitiveType::Array),
            "boolean" => Ok(PrimitiveType::Boolean),
            "integer" => Ok(PrimitiveType::Integer),
            "null" => Ok(PrimitiveType::Null),
            "number" => Ok(PrimitiveType::Number),
            "object" => Ok(PrimitiveType::Object),
            "string" => Ok(PrimitiveType::String),
            _ => Err(()),
        }
    }
}

/// The JSON type of a value, with `integer` recognised as a refinement of `number`
/// (spec §3: "the tag 'integer' matches a number whose exact value is an integer").
pub fn json_type_of(value: &Value) -> PrimitiveType {
    match value {
        Value::Null => PrimitiveType::Null,
        Value::Bool(_) => PrimitiveType::Boolean,
        Value::Number(n) => {
            if Decimal::from_number(n).map(|d| d.is_integer()).unwrap_or(false) {
                PrimitiveType::Integer
            } else {
                PrimitiveType::Number
            }
        }
        Value::String(_) => PrimitiveType::String,
        Value::Array(_) => PrimitiveType::Array,
        Value::Object(_) => PrimitiveType::Object,
    }
}

/// Whether `actual` satisfies a `type` keyword naming `expected`: `integer` instances
/// also satisfy `type: "number"`.
pub fn matches_type(actual: PrimitiveType, expected: PrimitiveType) -> bool {
    actual == expected || (actual == PrimitiveType::Integer && expected == PrimitiveType::Number)
}

impl PrimitiveType {
    /// Collapses the `integer` refinement back to `number`. `type` keyword matching
    /// (`matches_type`) needs the refined tag; reporting a `type` failure's actual JSON
    /// type does not — every number is just `"number"` there (spec §3, §8 scenario 1).
    pub fn coarse(self) -> PrimitiveType {
        if self == PrimitiveType::Integer {
            PrimitiveType::Number
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_valued_float_is_integer() {
        assert_eq!(json_type_of(&json!(1.0)), PrimitiveType::Integer);
        assert_eq!(json_type_of(&json!(1.5)), PrimitiveType::Number);
    }

    #[test]
    fn coarse_collapses_integer_to_number() {
        assert_eq!(PrimitiveType::Integer.coarse(), PrimitiveType::Number);
        assert_eq!(PrimitiveType::String.coarse(), PrimitiveType::String);
    }

    #[test]
    fn scientific_notation_integer_is_integer() {
        let value: Value = serde_json::from_str("1e0").unwrap();
        assert_eq!(json_type_of(&value), PrimitiveType::Integer);
    }

    #[test]
    fn integer_matches_number_type() {
        assert!(matches_type(PrimitiveType::Integer, PrimitiveType::Number));
        assert!(!matches_type(PrimitiveType::Number, PrimitiveType::Integer));
    }

    #[test]
    fn display_matches_json_schema_names() {
        assert_eq!(PrimitiveType::Array.to_string(), "array");
        assert_eq!(PrimitiveType::Integer.to_string(), "integer");
    }
}
