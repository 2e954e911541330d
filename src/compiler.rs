//! The compiler (spec §4.2): resolves a schema URL, meta-validates it against its
//! draft, and recursively translates the raw JSON into the arena of compiled
//! [`Schema`](crate::node::Schema) nodes that [`crate::validator::JSONSchema`] validates
//! instances against.
//!
//! Grounded on `original_source/compiler.go`'s `Compiler`/`compileRef`/`compileMap`, with
//! the two-phase stub-then-fill cycle-breaking pattern (spec §9) implemented through
//! `Arena::stub`/`Arena::get_mut` instead of a shared mutable graph node.
use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};
use url::Url;

use crate::content_media_type::MediaTypeRegistry;
use crate::content_type::DecoderRegistry;
use crate::draft::Draft;
use crate::error::Error;
use crate::extension::{CompiledExtension, Extension, ExtensionContext};
use crate::formats::FormatRegistry;
use crate::loader::{self, CancellationToken, Loader};
use crate::node::{Arena, BoolOrSchema, Dependency, Items, NodeId};
use crate::paths::PathStack;
use crate::pointer;
use crate::primitive_type::PrimitiveType;
use crate::resolver::resolve_ids;
use crate::resource::Resource;

/// Synthetic base URL assigned to schemas compiled directly from an in-memory `Value`
/// rather than fetched from a URL.
const ANONYMOUS_BASE: &str = "jschema:///";

/// Entry point of compilation (spec §4.2 "State"). Seeds itself with the three
/// supported drafts' embedded meta-schemas at construction; everything after that is
/// driven by [`Compiler::compile_url`] / [`Compiler::compile_schema`].
pub struct Compiler {
    pub(crate) arena: Arena,
    resources: HashMap<String, Resource>,
    default_draft: Draft,
    extract_annotations: bool,
    extensions: Vec<Arc<dyn Extension>>,
    formats: FormatRegistry,
    decoders: DecoderRegistry,
    media_types: MediaTypeRegistry,
    loader_override: Option<Arc<dyn Loader>>,
    meta_roots: HashMap<Draft, NodeId>,
    extension_meta_roots: HashMap<String, NodeId>,
    anon_counter: u32,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        let mut compiler = Compiler {
            arena: Arena::new(),
            resources: HashMap::new(),
            default_draft: Draft::default(),
            extract_annotations: false,
            extensions: Vec::new(),
            formats: FormatRegistry::default(),
            decoders: DecoderRegistry::default(),
            media_types: MediaTypeRegistry::default(),
            loader_override: None,
            meta_roots: HashMap::new(),
            extension_meta_roots: HashMap::new(),
            anon_counter: 0,
        };
        compiler.bootstrap_meta_schemas();
        compiler
    }

    /// Compiles each draft's own embedded meta-schema through the ordinary `compile_ref`
    /// path. `meta_roots` is empty while this runs, so `validate_schema` is a silent
    /// no-op for these calls — a draft's meta-schema never meta-validates itself
    /// (mirrors `original_source/draft4.go`'s `init()`, where a fresh `Compiler`'s
    /// `Draft4.meta` is still nil during its own bootstrap compile).
    fn bootstrap_meta_schemas(&mut self) {
        for draft in [Draft::Draft4, Draft::Draft6, Draft::Draft7] {
            let url = draft.meta_schema_url().to_owned();
            let doc = draft.meta_schema_value().clone();
            self.resources.insert(url.clone(), Resource { url, draft: Some(draft), doc, schemas: HashMap::new() });
        }
        let token = CancellationToken::new();
        for draft in [Draft::Draft4, Draft::Draft6, Draft::Draft7] {
            let url = draft.meta_schema_url().to_owned();
            let root = self
                .compile_ref(&token, &url, &url, "#")
                .expect("embedded meta-schema compiles");
            self.meta_roots.insert(draft, root);
        }
    }

    pub(crate) fn set_default_draft(&mut self, draft: Draft) {
        self.default_draft = draft;
    }

    pub(crate) fn set_extract_annotations(&mut self, enabled: bool) {
        self.extract_annotations = enabled;
    }

    pub(crate) fn set_loader(&mut self, loader: Arc<dyn Loader>) {
        self.loader_override = Some(loader);
    }

    pub(crate) fn formats_mut(&mut self) -> &mut FormatRegistry {
        &mut self.formats
    }

    pub(crate) fn decoders_mut(&mut self) -> &mut DecoderRegistry {
        &mut self.decoders
    }

    pub(crate) fn media_types_mut(&mut self) -> &mut MediaTypeRegistry {
        &mut self.media_types
    }

    pub(crate) fn push_extension(&mut self, extension: Arc<dyn Extension>) {
        self.extensions.push(extension);
    }

    /// Parses `bytes` as JSON and stores the result as a `Resource` keyed by `url`
    /// (spec §4.2 "AddResource").
    pub fn add_resource(&mut self, url: impl Into<String>, bytes: &[u8]) -> Result<(), Error> {
        let url = url.into();
        let doc: Value = serde_json::from_slice(bytes).map_err(|err| Error::parse(&url, err.to_string()))?;
        self.add_resource_value(url, doc);
        Ok(())
    }

    pub fn add_resource_value(&mut self, url: String, doc: Value) {
        self.resources.insert(url.clone(), Resource::new(url, doc));
    }

    /// Compiles a schema document that has no URL of its own, assigning it a synthetic
    /// base. This is the common entry point for validating an in-memory `Value`.
    pub fn compile_schema(&mut self, schema: Value) -> Result<NodeId, Error> {
        self.anon_counter += 1;
        let url = format!("{}anon-{}", ANONYMOUS_BASE, self.anon_counter);
        self.add_resource_value(url.clone(), schema);
        self.ensure_draft(&url)?;
        let token = CancellationToken::new();
        self.compile_ref(&token, &url, &url, "#")
    }

    /// `Compile(url)` (spec §4.2): splits `url`, loading and registering the base
    /// resource if it isn't already known, determines its draft, and delegates to
    /// `compile_ref` for the fragment.
    pub fn compile_url(&mut self, token: &CancellationToken, url: &str) -> Result<NodeId, Error> {
        let (base, fragment) = pointer::split(url);
        let base = base.to_owned();
        let fragment = fragment.to_owned();
        if !self.resources.contains_key(&base) {
            let bytes = self.load(token, &base)?;
            self.add_resource(base.clone(), &bytes)?;
        }
        self.ensure_draft(&base)?;
        let _span = tracing::debug_span!("compile", url = %base).entered();
        // `split` strips the leading `#`; restore it so `reference` always has the same
        // shape a `$ref` keyword value would (spec §4.1).
        let reference = if fragment.is_empty() { String::new() } else { format!("#{}", fragment) };
        self.compile_ref(token, &base, &base, &reference)
    }

    fn load(&self, token: &CancellationToken, url: &str) -> Result<Vec<u8>, Error> {
        match &self.loader_override {
            Some(loader) => loader.load(token, url),
            None => loader::load(token, url),
        }
    }

    fn ensure_draft(&mut self, resource_url: &str) -> Result<(), Error> {
        let default_draft = self.default_draft;
        let resource = self.resources.get_mut(resource_url).expect("resource registered before use");
        if resource.draft.is_some() {
            return Ok(());
        }
        let draft = Draft::from_schema_document(&resource.doc, default_draft).map_err(Error::unknown_draft)?;
        resource.draft = Some(draft);
        Ok(())
    }

    fn draft_of(&self, resource_url: &str) -> Draft {
        self.resources[resource_url].draft.expect("draft resolved before compileRef")
    }

    /// `compileRef(resource, base, ref)` (spec §4.2): the three dispatch branches for a
    /// `$ref`/fragment target, each caching its result under the resource's `schemas` map
    /// before descending so cycles resolve to the stub.
    fn compile_ref(&mut self, token: &CancellationToken, resource_url: &str, base: &str, reference: &str) -> Result<NodeId, Error> {
        if pointer::root_fragment(reference) {
            self.compile_root(token, resource_url, base)
        } else if reference.starts_with("#/") {
            self.compile_local_pointer(token, resource_url, base, reference)
        } else {
            self.compile_external_ref(token, resource_url, base, reference)
        }
    }

    fn compile_root(&mut self, token: &CancellationToken, resource_url: &str, base: &str) -> Result<NodeId, Error> {
        if let Some(id) = self.resources[resource_url].schemas.get("#") {
            return Ok(*id);
        }
        let draft = self.draft_of(resource_url);
        let doc = self.resources[resource_url].doc.clone();
        self.validate_schema(draft, &doc)?;
        let (url_part, _) = pointer::split(base);
        let stub = self.arena.stub(url_part.to_owned(), "#".to_owned());
        self.resources.get_mut(resource_url).unwrap().schemas.insert("#".to_owned(), stub);
        self.compile_value(token, resource_url, stub, base, &doc)?;
        Ok(stub)
    }

    fn compile_local_pointer(&mut self, token: &CancellationToken, resource_url: &str, base: &str, reference: &str) -> Result<NodeId, Error> {
        if let Some(id) = self.resources[resource_url].schemas.get(reference) {
            return Ok(*id);
        }
        let doc_root = self.resources[resource_url].doc.clone();
        let sub = pointer::resolve_ptr(&doc_root, reference)?.clone();
        let draft = self.draft_of(resource_url);
        self.validate_schema(draft, &sub)?;
        let (url_part, _) = pointer::split(base);
        let stub = self.arena.stub(url_part.to_owned(), reference.to_owned());
        self.resources.get_mut(resource_url).unwrap().schemas.insert(reference.to_owned(), stub);
        self.compile_value(token, resource_url, stub, base, &sub)?;
        Ok(stub)
    }

    fn compile_external_ref(&mut self, token: &CancellationToken, resource_url: &str, base: &str, reference: &str) -> Result<NodeId, Error> {
        let base_url = Url::parse(base).map_err(|err| Error::invalid_ref(reference, err.to_string()))?;
        let ref_url = pointer::resolve_url(&base_url, reference)?;
        let ref_url_str = ref_url.to_string();

        if let Some(id) = self.resources[resource_url].schemas.get(&ref_url_str) {
            return Ok(*id);
        }

        let draft = self.draft_of(resource_url);
        let resource_base = Url::parse(resource_url).map_err(|err| Error::invalid_ref(reference, err.to_string()))?;
        let doc_root = self.resources[resource_url].doc.clone();
        let mut ids = HashMap::new();
        resolve_ids(draft, &resource_base, &doc_root, &mut ids)?;

        if let Some(anchored) = ids.get(&ref_url_str).cloned() {
            self.validate_schema(draft, &anchored)?;
            let (url_part, ptr_part) = pointer::split(&ref_url_str);
            let ptr = if ptr_part.is_empty() { "#".to_owned() } else { ptr_part.to_owned() };
            let stub = self.arena.stub(url_part.to_owned(), ptr);
            self.resources.get_mut(resource_url).unwrap().schemas.insert(ref_url_str.clone(), stub);
            self.compile_value(token, resource_url, stub, &ref_url_str, &anchored)?;
            return Ok(stub);
        }

        let (ref_base, _) = pointer::split(&ref_url_str);
        if ref_base == resource_url {
            return Err(Error::invalid_ref(ref_url_str, "no matching $id anchor in this resource"));
        }
        self.compile_url(token, &ref_url_str)
    }

    /// Validates a schema document against its draft's compiled meta-schema before it is
    /// compiled (spec §4.2 "Meta-validation"). A missing meta-root means the draft's own
    /// meta-schema is still being bootstrapped, and the check is silently skipped —
    /// mirroring `original_source/compiler.go`'s `validateSchema`'s `if meta == nil`.
    fn validate_schema(&mut self, draft: Draft, doc: &Value) -> Result<(), Error> {
        if let Some(meta_root) = self.meta_roots.get(&draft).copied() {
            if let Some(err) = self.run_meta_validate(meta_root, doc) {
                return Err(Error::schema(err));
            }
        }
        for extension in self.extensions.clone() {
            let Some(meta_doc) = extension.meta_schema().cloned() else { continue };
            let name = extension.name().to_owned();
            let root = match self.extension_meta_roots.get(&name).copied() {
                Some(root) => root,
                None => {
                    let url = format!("{}extensions/{}", ANONYMOUS_BASE, name);
                    self.resources.insert(
                        url.clone(),
                        Resource { url: url.clone(), draft: Some(self.default_draft), doc: meta_doc, schemas: HashMap::new() },
                    );
                    let token = CancellationToken::new();
                    let root = self.compile_ref(&token, &url, &url, "#")?;
                    self.extension_meta_roots.insert(name, root);
                    root
                }
            };
            if let Some(err) = self.run_meta_validate(root, doc) {
                return Err(Error::schema(err));
            }
        }
        Ok(())
    }

    fn run_meta_validate(&self, root: NodeId, doc: &Value) -> Option<crate::error::ValidationError> {
        let instance_path = PathStack::new();
        let schema_path = PathStack::new();
        self.arena.get(root).validate(&self.arena, doc, &instance_path, &schema_path)
    }

    /// `compile(resource, schemaOut, base, raw)` (spec §4.2): dispatches a raw schema
    /// value onto an already-stubbed node.
    fn compile_value(&mut self, token: &CancellationToken, resource_url: &str, id: NodeId, base: &str, raw: &Value) -> Result<(), Error> {
        match raw {
            Value::Bool(b) => {
                self.arena.get_mut(id).always = Some(*b);
                Ok(())
            }
            Value::Object(map) => self.compile_map(token, resource_url, id, base, map),
            other => Err(Error::invalid_ref(
                base,
                format!("schema must be a boolean or object, got {}", crate::primitive_type::json_type_of(other)),
            )),
        }
    }

    /// Compiles an inline (non-`$ref`, non-anchored) nested schema: a fresh node each
    /// time, uncached, matching `original_source/compiler.go`'s `loadSchema` passing
    /// `s = nil`.
    fn compile_child(&mut self, token: &CancellationToken, resource_url: &str, base: &str, raw: &Value) -> Result<NodeId, Error> {
        let (url_part, _) = pointer::split(base);
        let id = self.arena.stub(url_part.to_owned(), String::new());
        self.compile_value(token, resource_url, id, base, raw)?;
        Ok(id)
    }

    /// `compileMap(resource, s, base, m)` (spec §4.2 step 3): extracts every keyword in
    /// source order into the node at `id`.
    fn compile_map(&mut self, token: &CancellationToken, resource_url: &str, id: NodeId, base: &str, map: &Map<String, Value>) -> Result<(), Error> {
        let draft = self.draft_of(resource_url);

        let mut current_base = base.to_owned();
        if let Some(id_value) = map.get(draft.id_keyword()).and_then(Value::as_str) {
            let parsed = Url::parse(&current_base).map_err(|err| Error::invalid_ref(id_value, err.to_string()))?;
            current_base = pointer::resolve_url(&parsed, id_value)?.to_string();
        }

        if let Some(Value::String(reference)) = map.get("$ref") {
            let (base_no_fragment, _) = pointer::split(&current_base);
            let ref_id = self.compile_ref(token, resource_url, base_no_fragment, reference)?;
            self.arena.get_mut(id).ref_ = Some(ref_id);
            return Ok(());
        }

        match map.get("type") {
            Some(Value::String(name)) => {
                let ty = PrimitiveType::try_from(name.as_str())
                    .map_err(|_| Error::invalid_ref(&current_base, format!("unknown type '{}'", name)))?;
                self.arena.get_mut(id).types = vec![ty];
            }
            Some(Value::Array(list)) => {
                let mut types = Vec::with_capacity(list.len());
                for item in list {
                    if let Value::String(name) = item {
                        types.push(
                            PrimitiveType::try_from(name.as_str())
                                .map_err(|_| Error::invalid_ref(&current_base, format!("unknown type '{}'", name)))?,
                        );
                    }
                }
                self.arena.get_mut(id).types = types;
            }
            _ => {}
        }

        if let Some(Value::Array(values)) = map.get("enum") {
            let message = enum_error_message(values);
            let node = self.arena.get_mut(id);
            node.enum_values = Some(values.clone());
            node.enum_error = Some(message);
        }

        if let Some(raw) = map.get("not") {
            let not_id = self.compile_child(token, resource_url, &current_base, raw)?;
            self.arena.get_mut(id).not = Some(not_id);
        }
        if let Some(Value::Array(list)) = map.get("allOf") {
            let mut ids = Vec::with_capacity(list.len());
            for item in list {
                ids.push(self.compile_child(token, resource_url, &current_base, item)?);
            }
            self.arena.get_mut(id).all_of = ids;
        }
        if let Some(Value::Array(list)) = map.get("anyOf") {
            let mut ids = Vec::with_capacity(list.len());
            for item in list {
                ids.push(self.compile_child(token, resource_url, &current_base, item)?);
            }
            self.arena.get_mut(id).any_of = ids;
        }
        if let Some(Value::Array(list)) = map.get("oneOf") {
            let mut ids = Vec::with_capacity(list.len());
            for item in list {
                ids.push(self.compile_child(token, resource_url, &current_base, item)?);
            }
            self.arena.get_mut(id).one_of = ids;
        }

        let multiple_of = load_decimal(map, "multipleOf")?;
        let mut minimum = load_decimal(map, "minimum")?;
        let mut maximum = load_decimal(map, "maximum")?;
        let mut exclusive_minimum = load_decimal(map, "exclusiveMinimum")?;
        let mut exclusive_maximum = load_decimal(map, "exclusiveMaximum")?;
        if let Some(Value::Bool(true)) = map.get("exclusiveMinimum") {
            exclusive_minimum = minimum.take();
        }
        if let Some(Value::Bool(true)) = map.get("exclusiveMaximum") {
            exclusive_maximum = maximum.take();
        }

        {
            let node = self.arena.get_mut(id);
            node.min_properties = load_int(map, "minProperties");
            node.max_properties = load_int(map, "maxProperties");
            node.min_items = load_int(map, "minItems");
            node.max_items = load_int(map, "maxItems");
            node.min_length = load_int(map, "minLength");
            node.max_length = load_int(map, "maxLength");
            node.unique_items = map.get("uniqueItems").and_then(Value::as_bool).unwrap_or(false);
            node.regex_properties = map.get("regexProperties").and_then(Value::as_bool).unwrap_or(false);
            node.minimum = minimum;
            node.maximum = maximum;
            node.exclusive_minimum = exclusive_minimum;
            node.exclusive_maximum = exclusive_maximum;
            node.multiple_of = multiple_of;
        }

        if let Some(Value::Array(list)) = map.get("required") {
            self.arena.get_mut(id).required = list.iter().filter_map(|v| v.as_str().map(str::to_owned)).collect();
        }

        if let Some(Value::Object(props)) = map.get("properties") {
            let mut compiled = HashMap::new();
            for (name, raw) in props {
                let child = self.compile_child(token, resource_url, &current_base, raw)?;
                compiled.insert(name.clone(), child);
            }
            self.arena.get_mut(id).properties = compiled;
        }

        if let Some(Value::Object(props)) = map.get("patternProperties") {
            let mut compiled = Vec::with_capacity(props.len());
            for (pattern, raw) in props {
                let regex = Regex::new(pattern).map_err(|err| Error::bad_regex(pattern.clone(), err.to_string()))?;
                let child = self.compile_child(token, resource_url, &current_base, raw)?;
                compiled.push((regex, child));
            }
            self.arena.get_mut(id).pattern_properties = compiled;
        }

        match map.get("additionalProperties") {
            None | Some(Value::Bool(true)) => {}
            Some(Value::Bool(false)) => self.arena.get_mut(id).additional_properties = BoolOrSchema::False,
            Some(raw) => {
                let child = self.compile_child(token, resource_url, &current_base, raw)?;
                self.arena.get_mut(id).additional_properties = BoolOrSchema::Schema(child);
            }
        }

        if let Some(Value::Object(deps)) = map.get("dependencies") {
            let mut compiled = HashMap::new();
            for (name, raw) in deps {
                let dependency = match raw {
                    Value::Array(list) => Dependency::Properties(list.iter().filter_map(|v| v.as_str().map(str::to_owned)).collect()),
                    other => Dependency::Schema(self.compile_child(token, resource_url, &current_base, other)?),
                };
                compiled.insert(name.clone(), dependency);
            }
            self.arena.get_mut(id).dependencies = compiled;
        }

        match map.get("items") {
            None => {}
            Some(Value::Array(list)) => {
                let mut ids = Vec::with_capacity(list.len());
                for item in list {
                    ids.push(self.compile_child(token, resource_url, &current_base, item)?);
                }
                self.arena.get_mut(id).items = Items::Tuple(ids);
                match map.get("additionalItems") {
                    None | Some(Value::Bool(true)) => {}
                    Some(Value::Bool(false)) => self.arena.get_mut(id).additional_items = BoolOrSchema::False,
                    Some(raw) => {
                        let child = self.compile_child(token, resource_url, &current_base, raw)?;
                        self.arena.get_mut(id).additional_items = BoolOrSchema::Schema(child);
                    }
                }
            }
            Some(raw) => {
                let child = self.compile_child(token, resource_url, &current_base, raw)?;
                self.arena.get_mut(id).items = Items::Single(child);
            }
        }

        if let Some(Value::String(pattern)) = map.get("pattern") {
            let regex = Regex::new(pattern).map_err(|err| Error::bad_regex(pattern.clone(), err.to_string()))?;
            self.arena.get_mut(id).pattern = Some(regex);
        }

        if let Some(Value::String(name)) = map.get("format") {
            if let Some(checker) = self.formats.get(name) {
                self.arena.get_mut(id).format = Some((name.clone(), checker));
            }
        }

        if self.extract_annotations {
            let node = self.arena.get_mut(id);
            node.title = map.get("title").and_then(Value::as_str).map(str::to_owned);
            node.description = map.get("description").and_then(Value::as_str).map(str::to_owned);
            node.default = map.get("default").cloned();
            if draft.version() >= 7 {
                node.read_only = map.get("readOnly").and_then(Value::as_bool);
                node.write_only = map.get("writeOnly").and_then(Value::as_bool);
                node.examples = map.get("examples").and_then(Value::as_array).cloned();
            }
        }

        if draft.version() >= 6 {
            if map.contains_key("const") {
                self.arena.get_mut(id).constant = map.get("const").cloned();
            }
            if let Some(raw) = map.get("propertyNames") {
                let child = self.compile_child(token, resource_url, &current_base, raw)?;
                self.arena.get_mut(id).property_names = Some(child);
            }
            if let Some(raw) = map.get("contains") {
                let child = self.compile_child(token, resource_url, &current_base, raw)?;
                self.arena.get_mut(id).contains = Some(child);
            }
        }

        if draft.version() >= 7 {
            if map.get("if").is_some() && (map.get("then").is_some() || map.get("else").is_some()) {
                let if_id = self.compile_child(token, resource_url, &current_base, map.get("if").unwrap())?;
                self.arena.get_mut(id).if_ = Some(if_id);
                if let Some(then_raw) = map.get("then") {
                    let then_id = self.compile_child(token, resource_url, &current_base, then_raw)?;
                    self.arena.get_mut(id).then = Some(then_id);
                }
                if let Some(else_raw) = map.get("else") {
                    let else_id = self.compile_child(token, resource_url, &current_base, else_raw)?;
                    self.arena.get_mut(id).else_ = Some(else_id);
                }
            }
            if let Some(Value::String(name)) = map.get("contentEncoding") {
                if let Some(decoder) = self.decoders.get(name) {
                    self.arena.get_mut(id).content_encoding = Some((name.clone(), decoder));
                }
            }
            if let Some(Value::String(name)) = map.get("contentMediaType") {
                if let Some(checker) = self.media_types.get(name) {
                    self.arena.get_mut(id).content_media_type = Some((name.clone(), checker));
                }
            }
        }

        for extension in self.extensions.clone() {
            let context = ExtensionContext { url: resource_url, draft };
            if let Some(compiled) = CompiledExtension::compile(extension, &context, map)? {
                self.arena.get_mut(id).extensions.push(compiled);
            }
        }

        Ok(())
    }

    /// Hands ownership of the compiled arena to the caller, alongside the root node
    /// produced by whichever `compile_*` call finished compilation.
    pub(crate) fn into_arena(self) -> Arena {
        self.arena
    }
}

fn load_int(map: &Map<String, Value>, key: &str) -> i64 {
    map.get(key).and_then(Value::as_i64).unwrap_or(-1)
}

fn load_decimal(map: &Map<String, Value>, key: &str) -> Result<Option<crate::decimal::Decimal>, Error> {
    match map.get(key) {
        Some(Value::Number(n)) => crate::decimal::Decimal::from_number(n).map(Some).map_err(|err| Error::invalid_ref(key, err.to_string())),
        _ => Ok(None),
    }
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Precomputes a human-readable `enum` failure message (spec §4.2 step 3 "enum").
fn enum_error_message(values: &[Value]) -> String {
    if !values.iter().all(is_primitive) {
        return "enum failed".to_owned();
    }
    if values.len() == 1 {
        format!("value must be {}", values[0])
    } else {
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        format!("value must be one of {}", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bootstraps_meta_schemas_for_all_drafts() {
        let compiler = Compiler::new();
        assert_eq!(compiler.meta_roots.len(), 3);
    }

    #[test]
    fn compiles_trivial_schema() {
        let mut compiler = Compiler::new();
        let id = compiler.compile_schema(json!({"type": "string"})).unwrap();
        let arena = compiler.into_arena();
        assert_eq!(arena.get(id).types, vec![PrimitiveType::String]);
    }

    #[test]
    fn compiles_self_referential_ref_cycle() {
        let mut compiler = Compiler::new();
        let schema = json!({
            "$ref": "#/definitions/node",
            "definitions": {
                "node": {
                    "type": "object",
                    "properties": { "next": { "$ref": "#/definitions/node" } }
                }
            }
        });
        let id = compiler.compile_schema(schema).unwrap();
        let arena = compiler.into_arena();
        let root = arena.get(id);
        assert!(root.ref_.is_some());
    }

    #[test]
    fn draft4_exclusive_minimum_boolean_moves_bound() {
        let mut compiler = Compiler::new();
        let schema = json!({"$schema": "http://json-schema.org/draft-04/schema#", "minimum": 3, "exclusiveMinimum": true});
        let id = compiler.compile_schema(schema).unwrap();
        let arena = compiler.into_arena();
        let node = arena.get(id);
        assert!(node.minimum.is_none());
        assert!(node.exclusive_minimum.is_some());
    }

    #[test]
    fn rejects_unknown_schema_draft() {
        let mut compiler = Compiler::new();
        let err = compiler.compile_schema(json!({"$schema": "http://example.com/not-a-draft#"}));
        assert!(matches!(err, Err(Error::UnknownDraft { .. })));
    }

    #[test]
    fn enum_error_message_singular_and_plural() {
        assert_eq!(enum_error_message(&[json!(1)]), "value must be 1");
        assert_eq!(enum_error_message(&[json!(1), json!(2)]), "value must be one of 1, 2");
        assert_eq!(enum_error_message(&[json!({"a": 1})]), "enum failed");
    }
}
