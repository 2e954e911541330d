//! Builder for compiler configuration (spec §4.2, §10.4). A `CompilationOptions`
//! wraps a [`Compiler`](crate::compiler::Compiler) and exposes a chainable surface
//! that mirrors the teacher's `compilation/options.rs`, minus its borrowed-schema
//! lifetime — the compiled [`JSONSchema`] this produces owns its arena outright.
use std::sync::Arc;

use serde_json::Value;

use crate::compiler::Compiler;
use crate::draft::Draft;
use crate::error::Error;
use crate::extension::Extension;
use crate::loader::{CancellationToken, Loader};
use crate::node::{ContentDecoder, FormatChecker, MediaTypeChecker};
use crate::validator::JSONSchema;

pub struct CompilationOptions {
    compiler: Compiler,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        CompilationOptions { compiler: Compiler::new() }
    }
}

impl CompilationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft assumed for a resource whose document names no `$schema` (default: latest).
    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.compiler.set_default_draft(draft);
        self
    }

    /// Populates `title`/`description`/`default`/`readOnly`/`writeOnly`/`examples` on
    /// compiled nodes. Off by default (spec §4.2 "extractAnnotations").
    pub fn with_annotations(mut self) -> Self {
        self.compiler.set_extract_annotations(true);
        self
    }

    /// Overrides the process-wide scheme-keyed loader registry for this compilation.
    pub fn with_loader(mut self, loader: Arc<dyn Loader>) -> Self {
        self.compiler.set_loader(loader);
        self
    }

    pub fn with_format(mut self, name: impl Into<String>, checker: FormatChecker) -> Self {
        self.compiler.formats_mut().with(name, checker);
        self
    }

    pub fn without_format(mut self, name: impl Into<String>) -> Self {
        self.compiler.formats_mut().without(name);
        self
    }

    pub fn with_content_encoding(mut self, name: impl Into<String>, decoder: ContentDecoder) -> Self {
        self.compiler.decoders_mut().with(name, decoder);
        self
    }

    pub fn without_content_encoding_support(mut self, name: impl Into<String>) -> Self {
        self.compiler.decoders_mut().without(name);
        self
    }

    pub fn with_content_media_type(mut self, name: impl Into<String>, checker: MediaTypeChecker) -> Self {
        self.compiler.media_types_mut().with(name, checker);
        self
    }

    pub fn without_content_media_type_support(mut self, name: impl Into<String>) -> Self {
        self.compiler.media_types_mut().without(name);
        self
    }

    pub fn with_extension(mut self, extension: Arc<dyn Extension>) -> Self {
        self.compiler.push_extension(extension);
        self
    }

    /// Compiles an in-memory schema document.
    pub fn compile(mut self, schema: &Value) -> Result<JSONSchema, Error> {
        let root = self.compiler.compile_schema(schema.clone())?;
        Ok(JSONSchema::new(self.compiler.into_arena(), root))
    }

    /// Compiles a schema reached through a URL, fetching it (and anything it
    /// references across resources) through the configured loader.
    pub fn compile_url(mut self, url: &str) -> Result<JSONSchema, Error> {
        let token = CancellationToken::new();
        let root = self.compiler.compile_url(&token, url)?;
        Ok(JSONSchema::new(self.compiler.into_arena(), root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn annotations_are_off_by_default() {
        let compiled = CompilationOptions::new().compile(&json!({"title": "x"})).unwrap();
        assert!(compiled.is_valid(&json!(1)));
    }

    #[test]
    fn without_format_disables_a_builtin_checker() {
        let schema = json!({"type": "string", "format": "email"});
        let compiled = CompilationOptions::new().without_format("email").compile(&schema).unwrap();
        assert!(compiled.is_valid(&json!("not-an-email")));
    }

    #[test]
    fn draft4_default_normalises_exclusive_minimum() {
        let schema = json!({"minimum": 2, "exclusiveMinimum": true});
        let compiled = CompilationOptions::new().with_draft(Draft::Draft4).compile(&schema).unwrap();
        assert!(compiled.validate(&json!(2)).is_err());
        assert!(compiled.validate(&json!(3)).is_ok());
    }
}
