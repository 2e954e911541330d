//! # jschema
//!
//! A compiler and validator for JSON Schema drafts 4, 6 and 7. A schema is compiled
//! once into a graph of resolved, typed nodes; validating an instance walks that
//! graph rather than re-interpreting the raw JSON on every call.
//!
//! Supports:
//!   - JSON Schema drafts 4, 6, 7;
//!   - `$ref`/`$id` resolution across resources, including cycles;
//!   - Loading remote documents via `file://`, `base64://`, and (with the `reqwest`
//!     feature) `http(s)://`;
//!   - Third-party keywords through the [`Extension`] trait.
//!
//! ## Example:
//!
//! ```rust
//! use jschema::JSONSchema;
//! use serde_json::json;
//!
//! let schema = json!({"maxLength": 5});
//! let instance = json!("foo");
//! let compiled = JSONSchema::compile(&schema).unwrap();
//! if let Err(error) = compiled.validate(&instance) {
//!     println!("validation error: {}", error);
//! }
//! ```
#![warn(
    clippy::doc_markdown,
    clippy::redundant_closure,
    clippy::explicit_iter_loop,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::print_stdout,
    clippy::trivially_copy_pass_by_ref,
    clippy::needless_pass_by_value,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    variant_size_differences
)]
mod checks;
mod compiler;
mod content_media_type;
mod content_type;
mod decimal;
mod draft;
mod equality;
mod error;
mod extension;
mod formats;
mod loader;
mod node;
mod options;
mod paths;
mod pointer;
mod primitive_type;
mod resolver;
mod resource;
mod validator;

pub use draft::Draft;
pub use error::{Error, ValidationError, ValidationErrorContext, ValidationErrorKind};
pub use extension::{Extension, ExtensionContext};
pub use loader::{load, register, CancellationToken, Loader};
pub use options::CompilationOptions;
pub use primitive_type::PrimitiveType;
pub use validator::JSONSchema;

use serde_json::Value;

/// A shortcut for validating `instance` against `schema` with default options.
/// Draft version is detected from `$schema`, falling back to the latest supported
/// draft.
///
/// ```rust
/// use jschema::is_valid;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// let instance = json!("foo");
/// assert!(is_valid(&schema, &instance));
/// ```
///
/// Panics if `schema` itself fails to compile.
#[must_use]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let compiled = JSONSchema::compile(schema).expect("invalid schema");
    compiled.is_valid(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_valid() {
        let schema = json!({"minLength": 5});
        assert!(is_valid(&schema, &json!("foobar")));
        assert!(!is_valid(&schema, &json!("foo")));
    }
}
