//! The public validation handle (spec §4.2 flow: "Schema tree" → `Validate`).
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, ValidationError};
use crate::node::{Arena, NodeId};
use crate::options::CompilationOptions;
use crate::paths::PathStack;

/// A compiled schema, ready to validate instances against.
///
/// Cheap to clone (an `Arc` bump) and safe to share across threads: the arena it
/// wraps is immutable once compilation finishes (spec §5 "Concurrency & Resource
/// Model"). Only compilation itself — the `Compiler`/`CompilationOptions` that
/// produced this — is single-threaded.
#[derive(Clone, Debug)]
pub struct JSONSchema {
    arena: Arc<Arena>,
    root: NodeId,
}

impl JSONSchema {
    pub(crate) fn new(arena: Arena, root: NodeId) -> Self {
        JSONSchema { arena: Arc::new(arena), root }
    }

    /// Compiles `schema` with default options: latest supported draft when
    /// `$schema` is absent, annotations off.
    pub fn compile(schema: &Value) -> Result<Self, Error> {
        CompilationOptions::new().compile(schema)
    }

    /// Starts a [`CompilationOptions`] builder for non-default compilation.
    pub fn options() -> CompilationOptions {
        CompilationOptions::new()
    }

    /// Validates `instance`, returning the first aggregated error tree if it fails
    /// (spec §4.3; see `ValidationError` for how multiple failures nest).
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationError> {
        let instance_path = PathStack::new();
        let schema_path = PathStack::new();
        match self.arena.get(self.root).validate(&self.arena, instance, &instance_path, &schema_path) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_keyword() {
        let compiled = JSONSchema::compile(&json!({"type": "string"})).unwrap();
        assert!(compiled.validate(&json!("AB")).is_ok());
        assert!(compiled.validate(&json!(1)).is_err());
    }

    #[test]
    fn resolves_internal_ref() {
        let schema = json!({
            "definitions": { "a": { "type": "integer" } },
            "$ref": "#/definitions/a"
        });
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&json!(1)));
        assert!(!compiled.is_valid(&json!("x")));
    }

    #[test]
    fn clone_is_cheap_and_shares_the_arena() {
        let compiled = JSONSchema::compile(&json!({"type": "boolean"})).unwrap();
        let cloned = compiled.clone();
        assert!(cloned.is_valid(&json!(true)));
        assert!(!cloned.is_valid(&json!(1)));
    }
}
