//! The crate-wide error enum (spec §7) and the structured `ValidationError` model (spec §4.5).
use std::fmt;

use serde_json::Value;

use crate::paths::JsonPointer;
use crate::primitive_type::PrimitiveType;

/// Every way compilation or loading can fail, as one type so callers can match on it
/// regardless of which phase produced it (spec §7).
#[derive(Debug)]
pub enum Error {
    /// A URL scheme has no registered `Loader`, or the registered one failed.
    Load { url: String, message: String },
    /// A loaded document was not well-formed JSON.
    Parse { url: String, message: String },
    /// A loaded schema document failed its draft's meta-schema.
    Schema(Box<ValidationError>),
    /// `$schema` names a draft this crate does not support.
    UnknownDraft { url: String },
    /// A `$ref` could not be resolved.
    InvalidRef { reference: String, message: String },
    /// A JSON pointer fragment was malformed or pointed nowhere.
    InvalidPointer { pointer: String },
    /// A `pattern`/`patternProperties` regex failed to compile.
    BadRegex { pattern: String, message: String },
    /// An instance failed to validate against a compiled schema.
    Validation(Box<ValidationError>),
    /// An instance tree contained a value outside the seven JSON types.
    InvalidJsonType { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Load { url, message } => write!(f, "failed to load '{}': {}", url, message),
            Error::Parse { url, message } => write!(f, "failed to parse '{}': {}", url, message),
            Error::Schema(inner) => write!(f, "schema is invalid: {}", inner),
            Error::UnknownDraft { url } => write!(f, "unknown or unsupported draft for '{}'", url),
            Error::InvalidRef { reference, message } => {
                write!(f, "invalid reference '{}': {}", reference, message)
            }
            Error::InvalidPointer { pointer } => write!(f, "invalid JSON pointer '{}'", pointer),
            Error::BadRegex { pattern, message } => {
                write!(f, "invalid regex '{}': {}", pattern, message)
            }
            Error::Validation(inner) => fmt::Display::fmt(inner, f),
            Error::InvalidJsonType { message } => write!(f, "invalid JSON type: {}", message),
        }
    }
}

impl std::error::Error for Error {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(Box::new(err))
    }
}

impl Error {
    pub(crate) fn load(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Load { url: url.into(), message: message.into() }
    }
    pub(crate) fn parse(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse { url: url.into(), message: message.into() }
    }
    pub(crate) fn schema(err: ValidationError) -> Self {
        Error::Schema(Box::new(err))
    }
    pub(crate) fn unknown_draft(url: impl Into<String>) -> Self {
        Error::UnknownDraft { url: url.into() }
    }
    pub(crate) fn invalid_ref(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidRef { reference: reference.into(), message: message.into() }
    }
    pub(crate) fn invalid_pointer(pointer: impl Into<String>) -> Self {
        Error::InvalidPointer { pointer: pointer.into() }
    }
    pub(crate) fn bad_regex(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Error::BadRegex { pattern: pattern.into(), message: message.into() }
    }
}

/// The typed, reserved `context` slot on a `ValidationError` (spec §4.5).
///
/// Only `required`'s missing-property list is populated today; other keywords attach
/// no context, but the slot stays open for them.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorContext {
    Required { missing: Vec<JsonPointer> },
}

/// Why a single keyword check failed, named by keyword rather than by a free-form string
/// so callers can match on failure kind (mirrors the teacher's mature `ValidationErrorKind`).
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    Type { expected: Vec<PrimitiveType>, actual: PrimitiveType },
    Constant { expected: Value },
    Enum { message: String },
    Format { name: String },
    Not,
    AllOf,
    AnyOf,
    OneOfNoneValid,
    OneOfMultipleValid { indices: Vec<usize> },
    MinProperties { limit: i64, actual: usize },
    MaxProperties { limit: i64, actual: usize },
    Required,
    AdditionalProperties { unexpected: Vec<String> },
    PropertyNames,
    RegexProperties,
    Dependencies { property: String },
    MinItems { limit: i64, actual: usize },
    MaxItems { limit: i64, actual: usize },
    UniqueItems { indices: (usize, usize) },
    AdditionalItems,
    Contains,
    MinLength { limit: i64, actual: usize },
    MaxLength { limit: i64, actual: usize },
    Pattern { pattern: String },
    ContentEncoding { encoding: String },
    ContentMediaType { media_type: String },
    Minimum { limit: String },
    Maximum { limit: String },
    ExclusiveMinimum { limit: String },
    ExclusiveMaximum { limit: String },
    MultipleOf { divisor: String },
    Extension { name: String, message: String },
    /// `$ref`: the referent failed, carried as this error's sole cause, rooted at the
    /// referent's own schema location rather than nested under this node's (spec §4.3).
    Ref { target: String },
    /// Two or more keyword failures at the same node, wrapped per spec §4.3's aggregation rule.
    Aggregate,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::Type { expected, actual } => {
                let names: Vec<String> = expected.iter().map(|t| t.to_string()).collect();
                write!(f, "'{}' is not of type '{}'", actual, names.join("', '"))
            }
            ValidationErrorKind::Constant { expected } => {
                write!(f, "value does not match constant '{}'", expected)
            }
            ValidationErrorKind::Enum { message } => write!(f, "{}", message),
            ValidationErrorKind::Format { name } => write!(f, "value does not conform to format '{}'", name),
            ValidationErrorKind::Not => write!(f, "value must not validate against the 'not' schema"),
            ValidationErrorKind::AllOf => write!(f, "value does not validate against all subschemas of 'allOf'"),
            ValidationErrorKind::AnyOf => write!(f, "value does not validate against any subschema of 'anyOf'"),
            ValidationErrorKind::OneOfNoneValid => write!(f, "value does not validate against any subschema of 'oneOf'"),
            ValidationErrorKind::OneOfMultipleValid { indices } => write!(
                f,
                "value validates against more than one subschema of 'oneOf': indices {:?}",
                indices
            ),
            ValidationErrorKind::MinProperties { limit, actual } => {
                write!(f, "{} is less than the minimum of {} properties", actual, limit)
            }
            ValidationErrorKind::MaxProperties { limit, actual } => {
                write!(f, "{} is greater than the maximum of {} properties", actual, limit)
            }
            ValidationErrorKind::Required => write!(f, "required properties are missing"),
            ValidationErrorKind::AdditionalProperties { unexpected } => write!(
                f,
                "additional properties are not allowed ({} unexpected)",
                unexpected.join(", ")
            ),
            ValidationErrorKind::PropertyNames => write!(f, "property name does not validate against 'propertyNames'"),
            ValidationErrorKind::RegexProperties => write!(f, "property name is not a valid regex"),
            ValidationErrorKind::Dependencies { property } => {
                write!(f, "dependency of '{}' is not satisfied", property)
            }
            ValidationErrorKind::MinItems { limit, actual } => {
                write!(f, "{} is less than the minimum of {} items", actual, limit)
            }
            ValidationErrorKind::MaxItems { limit, actual } => {
                write!(f, "{} is greater than the maximum of {} items", actual, limit)
            }
            ValidationErrorKind::UniqueItems { indices } => {
                write!(f, "items at indices {} and {} are equal", indices.0, indices.1)
            }
            ValidationErrorKind::AdditionalItems => write!(f, "additional items are not allowed"),
            ValidationErrorKind::Contains => write!(f, "no item validates against 'contains'"),
            ValidationErrorKind::MinLength { limit, actual } => {
                write!(f, "{} is less than the minimum length of {}", actual, limit)
            }
            ValidationErrorKind::MaxLength { limit, actual } => {
                write!(f, "{} is greater than the maximum length of {}", actual, limit)
            }
            ValidationErrorKind::Pattern { pattern } => write!(f, "value does not match pattern '{}'", pattern),
            ValidationErrorKind::ContentEncoding { encoding } => {
                write!(f, "value is not valid '{}' content", encoding)
            }
            ValidationErrorKind::ContentMediaType { media_type } => {
                write!(f, "value is not valid '{}' content", media_type)
            }
            ValidationErrorKind::Minimum { limit } => write!(f, "value is less than the minimum of {}", limit),
            ValidationErrorKind::Maximum { limit } => write!(f, "value is greater than the maximum of {}", limit),
            ValidationErrorKind::ExclusiveMinimum { limit } => {
                write!(f, "value is less than or equal to the exclusive minimum of {}", limit)
            }
            ValidationErrorKind::ExclusiveMaximum { limit } => {
                write!(f, "value is greater than or equal to the exclusive maximum of {}", limit)
            }
            ValidationErrorKind::MultipleOf { divisor } => {
                write!(f, "value is not a multiple of {}", divisor)
            }
            ValidationErrorKind::Extension { name, message } => write!(f, "[{}] {}", name, message),
            ValidationErrorKind::Ref { target } => write!(f, "does not validate against referenced schema '{}'", target),
            ValidationErrorKind::Aggregate => write!(f, "validation failed"),
        }
    }
}

/// A single, precisely located validation failure (spec §4.5).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub instance: Value,
    pub kind: ValidationErrorKind,
    pub instance_path: JsonPointer,
    pub schema_path: JsonPointer,
    pub context: Option<ValidationErrorContext>,
    pub causes: Vec<ValidationError>,
}

impl ValidationError {
    pub(crate) fn new(instance: Value, kind: ValidationErrorKind) -> Self {
        ValidationError {
            instance,
            kind,
            instance_path: JsonPointer::root(),
            schema_path: JsonPointer::root(),
            context: None,
            causes: Vec::new(),
        }
    }

    pub(crate) fn with_context(mut self, context: ValidationErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    pub(crate) fn with_causes(mut self, causes: Vec<ValidationError>) -> Self {
        self.causes = causes;
        self
    }

}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.kind, self.instance_path)
    }
}

impl std::error::Error for ValidationError {}

/// Aggregates zero, one, or many keyword failures at one schema node (spec §4.3).
///
/// Zero failures is `None` (pass); one is returned unwrapped; two or more are wrapped
/// as causes of a synthetic `Aggregate` ("validation failed") error.
pub(crate) fn aggregate(instance: &Value, mut errors: Vec<ValidationError>) -> Option<ValidationError> {
    match errors.len() {
        0 => None,
        1 => Some(errors.remove(0)),
        _ => Some(ValidationError::new(instance.clone(), ValidationErrorKind::Aggregate).with_causes(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aggregate_empty_is_none() {
        assert!(aggregate(&json!(1), vec![]).is_none());
    }

    #[test]
    fn aggregate_single_unwraps() {
        let err = ValidationError::new(json!(1), ValidationErrorKind::Not);
        let result = aggregate(&json!(1), vec![err.clone()]).unwrap();
        assert_eq!(result, err);
    }

    #[test]
    fn aggregate_many_wraps_as_causes() {
        let a = ValidationError::new(json!(1), ValidationErrorKind::Not);
        let b = ValidationError::new(json!(1), ValidationErrorKind::Contains);
        let result = aggregate(&json!(1), vec![a, b]).unwrap();
        assert_eq!(result.kind, ValidationErrorKind::Aggregate);
        assert_eq!(result.causes.len(), 2);
    }
}
