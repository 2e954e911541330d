//! The compiled schema graph: an arena of `Schema` nodes addressed by `NodeId` handles,
//! and the recursive `validate` procedure that walks it (spec §3, §4.3).
//!
//! Chosen per spec §9: an arena of handles rather than `Rc<RefCell<_>>` nodes, so
//! reference cycles (`$ref`) are plain integer indices instead of shared mutable graph
//! nodes, and `Schema` stays `Send + Sync` without interior mutability.
use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};

use crate::decimal::Decimal;
use crate::error::{ValidationError, ValidationErrorContext, ValidationErrorKind};
use crate::extension::CompiledExtension;
use crate::paths::{PathGuard, PathStack};
use crate::primitive_type::{json_type_of, matches_type, PrimitiveType};

/// A handle into an `Arena`. Cheap to copy, stable for the arena's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// Owns every compiled `Schema` reachable from one compilation. `$ref` cycles are
/// plain `NodeId` back-edges, so the arena itself is acyclic as a data structure even
/// when the schema graph it represents is not.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Schema>,
}

impl Arena {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    /// Inserts a placeholder node and returns its id, reserving a slot for a schema
    /// whose body hasn't been compiled yet. Breaks `$ref` recursion: a self-reference
    /// resolves to this id before the stub's fields are ever populated.
    pub(crate) fn stub(&mut self, url: String, ptr: String) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Schema::stub(url, ptr));
        id
    }

    pub fn get(&self, id: NodeId) -> &Schema {
        &self.nodes[id.0 as usize]
    }

    /// Mutates a stubbed (or already-filled) node's fields in place during compilation.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Schema {
        &mut self.nodes[id.0 as usize]
    }
}

/// `additionalProperties` / `additionalItems`: `Unset | False | Schema` (spec §9).
#[derive(Debug)]
pub enum BoolOrSchema {
    Unset,
    False,
    Schema(NodeId),
}

impl BoolOrSchema {
    pub(crate) fn is_unset(&self) -> bool {
        matches!(self, BoolOrSchema::Unset)
    }
}

/// `items`: absent, one schema applied to every element, or an ordered per-position list.
#[derive(Debug)]
pub enum Items {
    Unset,
    Single(NodeId),
    Tuple(Vec<NodeId>),
}

/// `dependencies[name]`: either a whole-instance subschema or a list of sibling names.
#[derive(Debug)]
pub enum Dependency {
    Schema(NodeId),
    Properties(Vec<String>),
}

pub(crate) type FormatChecker = Arc<dyn Fn(&str) -> bool + Send + Sync>;
pub(crate) type ContentDecoder = Arc<dyn Fn(&str) -> Result<Vec<u8>, String> + Send + Sync>;
pub(crate) type MediaTypeChecker = Arc<dyn Fn(&[u8]) -> Result<(), String> + Send + Sync>;

/// One compiled schema position: spec §3 "Compiled Schema node".
#[derive(Debug)]
pub struct Schema {
    pub url: String,
    pub ptr: String,

    pub always: Option<bool>,
    pub ref_: Option<NodeId>,
    pub types: Vec<PrimitiveType>,
    pub enum_values: Option<Vec<Value>>,
    pub enum_error: Option<String>,
    pub constant: Option<Value>,
    pub not: Option<NodeId>,
    pub all_of: Vec<NodeId>,
    pub any_of: Vec<NodeId>,
    pub one_of: Vec<NodeId>,
    pub if_: Option<NodeId>,
    pub then: Option<NodeId>,
    pub else_: Option<NodeId>,
    pub format: Option<(String, FormatChecker)>,

    pub min_properties: i64,
    pub max_properties: i64,
    pub required: Vec<String>,
    pub properties: HashMap<String, NodeId>,
    pub pattern_properties: Vec<(Regex, NodeId)>,
    pub additional_properties: BoolOrSchema,
    pub property_names: Option<NodeId>,
    pub regex_properties: bool,
    pub dependencies: HashMap<String, Dependency>,

    pub min_items: i64,
    pub max_items: i64,
    pub unique_items: bool,
    pub items: Items,
    pub additional_items: BoolOrSchema,
    pub contains: Option<NodeId>,

    pub min_length: i64,
    pub max_length: i64,
    pub pattern: Option<Regex>,
    pub content_encoding: Option<(String, ContentDecoder)>,
    pub content_media_type: Option<(String, MediaTypeChecker)>,

    pub minimum: Option<Decimal>,
    pub exclusive_minimum: Option<Decimal>,
    pub maximum: Option<Decimal>,
    pub exclusive_maximum: Option<Decimal>,
    pub multiple_of: Option<Decimal>,

    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub read_only: Option<bool>,
    pub write_only: Option<bool>,
    pub examples: Option<Vec<Value>>,

    pub extensions: Vec<CompiledExtension>,
}

impl Schema {
    pub(crate) fn stub(url: String, ptr: String) -> Self {
        Schema {
            url,
            ptr,
            always: None,
            ref_: None,
            types: Vec::new(),
            enum_values: None,
            enum_error: None,
            constant: None,
            not: None,
            all_of: Vec::new(),
            any_of: Vec::new(),
            one_of: Vec::new(),
            if_: None,
            then: None,
            else_: None,
            format: None,
            min_properties: -1,
            max_properties: -1,
            required: Vec::new(),
            properties: HashMap::new(),
            pattern_properties: Vec::new(),
            additional_properties: BoolOrSchema::Unset,
            property_names: None,
            regex_properties: false,
            dependencies: HashMap::new(),
            min_items: -1,
            max_items: -1,
            unique_items: false,
            items: Items::Unset,
            additional_items: BoolOrSchema::Unset,
            contains: None,
            min_length: -1,
            max_length: -1,
            pattern: None,
            content_encoding: None,
            content_media_type: None,
            minimum: None,
            exclusive_minimum: None,
            maximum: None,
            exclusive_maximum: None,
            multiple_of: None,
            title: None,
            description: None,
            default: None,
            read_only: None,
            write_only: None,
            examples: None,
            extensions: Vec::new(),
        }
    }

    /// Recursively validates `instance`, accumulating every keyword failure at this
    /// node before aggregating (spec §4.3). Entry point from the public API rebuilds
    /// the rooted paths at `#`; internal recursion threads live path stacks.
    pub(crate) fn validate(
        &self,
        arena: &Arena,
        instance: &Value,
        instance_path: &PathStack,
        schema_path: &PathStack,
    ) -> Option<ValidationError> {
        if let Some(always) = self.always {
            return if always {
                None
            } else {
                Some(self.error(instance, instance_path, schema_path, ValidationErrorKind::Not))
            };
        }

        if let Some(ref_id) = self.ref_ {
            let referent = arena.get(ref_id);
            let ref_schema_path = PathStack::new();
            for token in crate::pointer::fragment_tokens(&referent.ptr) {
                ref_schema_path.push(token);
            }
            return match referent.validate(arena, instance, instance_path, &ref_schema_path) {
                Some(cause) => {
                    let target = if referent.url == self.url {
                        referent.ptr.clone()
                    } else {
                        format!("{}{}", referent.url, referent.ptr)
                    };
                    let _guard = PathGuard::new(schema_path, "$ref");
                    Some(
                        self.error(instance, instance_path, schema_path, ValidationErrorKind::Ref { target })
                            .with_causes(vec![cause]),
                    )
                }
                None => None,
            };
        }

        let mut errors = Vec::new();
        let actual = json_type_of(instance);

        if !self.types.is_empty() && !self.types.iter().any(|t| matches_type(actual, *t)) {
            let _guard = PathGuard::new(schema_path, "type");
            errors.push(self.error(
                instance,
                instance_path,
                schema_path,
                ValidationErrorKind::Type { expected: self.types.clone(), actual: actual.coarse() },
            ));
            // type mismatch short-circuits: later keywords assume a matching type (spec §9).
            return crate::error::aggregate(instance, errors);
        }

        if let Some(constant) = &self.constant {
            if !crate::equality::json_equal(instance, constant) {
                let _guard = PathGuard::new(schema_path, "const");
                errors.push(self.error(
                    instance,
                    instance_path,
                    schema_path,
                    ValidationErrorKind::Constant { expected: constant.clone() },
                ));
            }
        }

        if let Some(values) = &self.enum_values {
            if !values.iter().any(|v| crate::equality::json_equal(instance, v)) {
                let _guard = PathGuard::new(schema_path, "enum");
                errors.push(self.error(
                    instance,
                    instance_path,
                    schema_path,
                    ValidationErrorKind::Enum {
                        message: self.enum_error.clone().unwrap_or_else(|| "enum failed".to_owned()),
                    },
                ));
            }
        }

        if let Some((name, checker)) = &self.format {
            if let Value::String(s) = instance {
                if !checker(s) {
                    let _guard = PathGuard::new(schema_path, "format");
                    errors.push(self.error(
                        instance,
                        instance_path,
                        schema_path,
                        ValidationErrorKind::Format { name: name.clone() },
                    ));
                }
            }
        }

        if let Some(not_id) = self.not {
            let _guard = PathGuard::new(schema_path, "not");
            if arena.get(not_id).validate(arena, instance, instance_path, schema_path).is_none() {
                errors.push(self.error(instance, instance_path, schema_path, ValidationErrorKind::Not));
            }
        }

        if !self.all_of.is_empty() {
            let _guard = PathGuard::new(schema_path, "allOf");
            let mut causes = Vec::new();
            for (idx, id) in self.all_of.iter().enumerate() {
                let _idx_guard = PathGuard::new(schema_path, idx);
                if let Some(err) = arena.get(*id).validate(arena, instance, instance_path, schema_path) {
                    causes.push(err);
                }
            }
            if !causes.is_empty() {
                errors.push(
                    self.error(instance, instance_path, schema_path, ValidationErrorKind::AllOf)
                        .with_causes(causes),
                );
            }
        }

        if !self.any_of.is_empty() {
            let _guard = PathGuard::new(schema_path, "anyOf");
            let mut causes = Vec::new();
            let mut any_passed = false;
            for (idx, id) in self.any_of.iter().enumerate() {
                let _idx_guard = PathGuard::new(schema_path, idx);
                match arena.get(*id).validate(arena, instance, instance_path, schema_path) {
                    None => any_passed = true,
                    Some(err) => causes.push(err),
                }
            }
            if !any_passed {
                errors.push(
                    self.error(instance, instance_path, schema_path, ValidationErrorKind::AnyOf)
                        .with_causes(causes),
                );
            }
        }

        if !self.one_of.is_empty() {
            let _guard = PathGuard::new(schema_path, "oneOf");
            let mut causes = Vec::new();
            let mut passed_indices = Vec::new();
            for (idx, id) in self.one_of.iter().enumerate() {
                let _idx_guard = PathGuard::new(schema_path, idx);
                match arena.get(*id).validate(arena, instance, instance_path, schema_path) {
                    None => passed_indices.push(idx),
                    Some(err) => causes.push(err),
                }
            }
            match passed_indices.len() {
                1 => {}
                0 => {
                    errors.push(
                        self.error(instance, instance_path, schema_path, ValidationErrorKind::OneOfNoneValid)
                            .with_causes(causes),
                    );
                }
                _ => {
                    errors.push(self.error(
                        instance,
                        instance_path,
                        schema_path,
                        ValidationErrorKind::OneOfMultipleValid { indices: passed_indices },
                    ));
                }
            }
        }

        if let Some(if_id) = self.if_ {
            let if_passed = {
                let _guard = PathGuard::new(schema_path, "if");
                arena.get(if_id).validate(arena, instance, instance_path, schema_path).is_none()
            };
            let branch = if if_passed { self.then } else { self.else_ };
            let token = if if_passed { "then" } else { "else" };
            if let Some(branch_id) = branch {
                let _guard = PathGuard::new(schema_path, token);
                if let Some(err) = arena.get(branch_id).validate(arena, instance, instance_path, schema_path) {
                    errors.push(err);
                }
            }
        }

        match instance {
            Value::Object(map) => self.validate_object(arena, map, instance, instance_path, schema_path, &mut errors),
            Value::Array(items) => self.validate_array(arena, items, instance, instance_path, schema_path, &mut errors),
            Value::String(s) => self.validate_string(s, instance, instance_path, schema_path, &mut errors),
            Value::Number(n) => self.validate_number(n, instance, instance_path, schema_path, &mut errors),
            _ => {}
        }

        for extension in &self.extensions {
            if let Some(err) = extension.validate(instance) {
                let mut err = err;
                err.instance_path = instance_path.to_pointer();
                let mut path = schema_path.to_pointer();
                path.push(extension.name().to_owned());
                err.schema_path = path;
                errors.push(err);
            }
        }

        crate::error::aggregate(instance, errors)
    }

    fn error(
        &self,
        instance: &Value,
        instance_path: &PathStack,
        schema_path: &PathStack,
        kind: ValidationErrorKind,
    ) -> ValidationError {
        let mut err = ValidationError::new(instance.clone(), kind);
        err.instance_path = instance_path.to_pointer();
        err.schema_path = schema_path.to_pointer();
        err
    }

    fn validate_object(
        &self,
        arena: &Arena,
        map: &Map<String, Value>,
        instance: &Value,
        instance_path: &PathStack,
        schema_path: &PathStack,
        errors: &mut Vec<ValidationError>,
    ) {
        if self.min_properties >= 0 && (map.len() as i64) < self.min_properties {
            let _guard = PathGuard::new(schema_path, "minProperties");
            errors.push(self.error(
                instance,
                instance_path,
                schema_path,
                ValidationErrorKind::MinProperties { limit: self.min_properties, actual: map.len() },
            ));
        }
        if self.max_properties >= 0 && (map.len() as i64) > self.max_properties {
            let _guard = PathGuard::new(schema_path, "maxProperties");
            errors.push(self.error(
                instance,
                instance_path,
                schema_path,
                ValidationErrorKind::MaxProperties { limit: self.max_properties, actual: map.len() },
            ));
        }

        if !self.required.is_empty() {
            let missing: Vec<_> = self.required.iter().filter(|name| !map.contains_key(*name)).collect();
            if !missing.is_empty() {
                let _guard = PathGuard::new(schema_path, "required");
                let missing_pointers = missing
                    .iter()
                    .map(|name| {
                        let mut p = instance_path.to_pointer();
                        p.push((*name).clone());
                        p
                    })
                    .collect();
                errors.push(
                    self.error(instance, instance_path, schema_path, ValidationErrorKind::Required)
                        .with_context(ValidationErrorContext::Required { missing: missing_pointers }),
                );
            }
        }

        let additional_tracking = !self.additional_properties.is_unset();
        let mut additional: std::collections::HashSet<&str> =
            if additional_tracking { map.keys().map(String::as_str).collect() } else { Default::default() };

        for (name, value) in map {
            if let Some(id) = self.properties.get(name) {
                let _name_guard = PathGuard::new(instance_path, name.clone());
                let _schema_guard = PathGuard::new(schema_path, "properties");
                let _prop_guard = PathGuard::new(schema_path, name.clone());
                if let Some(err) = arena.get(*id).validate(arena, value, instance_path, schema_path) {
                    errors.push(err);
                }
                additional.remove(name.as_str());
            }
            for (regex, id) in &self.pattern_properties {
                if regex.is_match(name) {
                    let _name_guard = PathGuard::new(instance_path, name.clone());
                    let _schema_guard = PathGuard::new(schema_path, "patternProperties");
                    let _prop_guard = PathGuard::new(schema_path, regex.as_str().to_owned());
                    if let Some(err) = arena.get(*id).validate(arena, value, instance_path, schema_path) {
                        errors.push(err);
                    }
                    additional.remove(name.as_str());
                }
            }
        }

        match &self.additional_properties {
            BoolOrSchema::Unset => {}
            BoolOrSchema::False => {
                if !additional.is_empty() {
                    let mut names: Vec<_> = additional.iter().map(|s| s.to_string()).collect();
                    names.sort();
                    let _guard = PathGuard::new(schema_path, "additionalProperties");
                    errors.push(self.error(
                        instance,
                        instance_path,
                        schema_path,
                        ValidationErrorKind::AdditionalProperties { unexpected: names },
                    ));
                }
            }
            BoolOrSchema::Schema(id) => {
                let _schema_guard = PathGuard::new(schema_path, "additionalProperties");
                for name in additional {
                    let _name_guard = PathGuard::new(instance_path, name.to_owned());
                    if let Some(err) = arena.get(*id).validate(arena, &map[name], instance_path, schema_path) {
                        errors.push(err);
                    }
                }
            }
        }

        if let Some(id) = self.property_names {
            let _guard = PathGuard::new(schema_path, "propertyNames");
            for name in map.keys() {
                let as_value = Value::String(name.clone());
                if arena.get(id).validate(arena, &as_value, instance_path, schema_path).is_some() {
                    errors.push(self.error(instance, instance_path, schema_path, ValidationErrorKind::PropertyNames));
                    break;
                }
            }
        }

        if self.regex_properties {
            let _guard = PathGuard::new(schema_path, "regexProperties");
            for name in map.keys() {
                if Regex::new(name).is_err() {
                    errors.push(self.error(instance, instance_path, schema_path, ValidationErrorKind::RegexProperties));
                    break;
                }
            }
        }

        for (name, dependency) in &self.dependencies {
            if !map.contains_key(name) {
                continue;
            }
            match dependency {
                Dependency::Schema(id) => {
                    let _guard = PathGuard::new(schema_path, "dependencies");
                    let _name_guard = PathGuard::new(schema_path, name.clone());
                    if let Some(err) = arena.get(*id).validate(arena, instance, instance_path, schema_path) {
                        errors.push(err);
                    }
                }
                Dependency::Properties(siblings) => {
                    if siblings.iter().any(|sibling| !map.contains_key(sibling)) {
                        let _guard = PathGuard::new(schema_path, "dependencies");
                        errors.push(self.error(
                            instance,
                            instance_path,
                            schema_path,
                            ValidationErrorKind::Dependencies { property: name.clone() },
                        ));
                    }
                }
            }
        }
    }

    fn validate_array(
        &self,
        arena: &Arena,
        items: &[Value],
        instance: &Value,
        instance_path: &PathStack,
        schema_path: &PathStack,
        errors: &mut Vec<ValidationError>,
    ) {
        if self.min_items >= 0 && (items.len() as i64) < self.min_items {
            let _guard = PathGuard::new(schema_path, "minItems");
            errors.push(self.error(
                instance,
                instance_path,
                schema_path,
                ValidationErrorKind::MinItems { limit: self.min_items, actual: items.len() },
            ));
        }
        if self.max_items >= 0 && (items.len() as i64) > self.max_items {
            let _guard = PathGuard::new(schema_path, "maxItems");
            errors.push(self.error(
                instance,
                instance_path,
                schema_path,
                ValidationErrorKind::MaxItems { limit: self.max_items, actual: items.len() },
            ));
        }

        if self.unique_items {
            let _guard = PathGuard::new(schema_path, "uniqueItems");
            for i in 0..items.len() {
                for j in (i + 1)..items.len() {
                    if crate::equality::json_equal(&items[i], &items[j]) {
                        errors.push(self.error(
                            instance,
                            instance_path,
                            schema_path,
                            ValidationErrorKind::UniqueItems { indices: (i, j) },
                        ));
                    }
                }
            }
        }

        match &self.items {
            Items::Unset => {}
            Items::Single(id) => {
                let _guard = PathGuard::new(schema_path, "items");
                for (idx, item) in items.iter().enumerate() {
                    let _idx_guard = PathGuard::new(instance_path, idx);
                    if let Some(err) = arena.get(*id).validate(arena, item, instance_path, schema_path) {
                        errors.push(err);
                    }
                }
            }
            Items::Tuple(schemas) => {
                {
                    let _guard = PathGuard::new(schema_path, "items");
                    for (idx, id) in schemas.iter().enumerate() {
                        if let Some(item) = items.get(idx) {
                            let _idx_guard = PathGuard::new(instance_path, idx);
                            let _schema_idx_guard = PathGuard::new(schema_path, idx);
                            if let Some(err) = arena.get(*id).validate(arena, item, instance_path, schema_path) {
                                errors.push(err);
                            }
                        }
                    }
                }
                match &self.additional_items {
                    BoolOrSchema::Unset => {}
                    BoolOrSchema::False => {
                        if items.len() > schemas.len() {
                            let _guard = PathGuard::new(schema_path, "additionalItems");
                            errors.push(self.error(instance, instance_path, schema_path, ValidationErrorKind::AdditionalItems));
                        }
                    }
                    BoolOrSchema::Schema(id) => {
                        let _guard = PathGuard::new(schema_path, "additionalItems");
                        for (idx, item) in items.iter().enumerate().skip(schemas.len()) {
                            let _idx_guard = PathGuard::new(instance_path, idx);
                            if let Some(err) = arena.get(*id).validate(arena, item, instance_path, schema_path) {
                                errors.push(err);
                            }
                        }
                    }
                }
            }
        }

        if let Some(id) = self.contains {
            let _guard = PathGuard::new(schema_path, "contains");
            let satisfied = items.iter().any(|item| arena.get(id).validate(arena, item, instance_path, schema_path).is_none());
            if !satisfied {
                errors.push(self.error(instance, instance_path, schema_path, ValidationErrorKind::Contains));
            }
        }
    }

    fn validate_string(
        &self,
        s: &str,
        instance: &Value,
        instance_path: &PathStack,
        schema_path: &PathStack,
        errors: &mut Vec<ValidationError>,
    ) {
        let length = s.chars().count() as i64;
        if self.min_length >= 0 && length < self.min_length {
            let _guard = PathGuard::new(schema_path, "minLength");
            errors.push(self.error(
                instance,
                instance_path,
                schema_path,
                ValidationErrorKind::MinLength { limit: self.min_length, actual: length as usize },
            ));
        }
        if self.max_length >= 0 && length > self.max_length {
            let _guard = PathGuard::new(schema_path, "maxLength");
            errors.push(self.error(
                instance,
                instance_path,
                schema_path,
                ValidationErrorKind::MaxLength { limit: self.max_length, actual: length as usize },
            ));
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(s) {
                let _guard = PathGuard::new(schema_path, "pattern");
                errors.push(self.error(
                    instance,
                    instance_path,
                    schema_path,
                    ValidationErrorKind::Pattern { pattern: pattern.as_str().to_owned() },
                ));
            }
        }

        let mut decoded: Option<Vec<u8>> = None;
        if let Some((name, decoder)) = &self.content_encoding {
            match decoder(s) {
                Ok(bytes) => decoded = Some(bytes),
                Err(_) => {
                    let _guard = PathGuard::new(schema_path, "contentEncoding");
                    errors.push(self.error(
                        instance,
                        instance_path,
                        schema_path,
                        ValidationErrorKind::ContentEncoding { encoding: name.clone() },
                    ));
                }
            }
        }
        if let Some((name, checker)) = &self.content_media_type {
            let bytes = decoded.as_deref().unwrap_or(s.as_bytes());
            if checker(bytes).is_err() {
                let _guard = PathGuard::new(schema_path, "contentMediaType");
                errors.push(self.error(
                    instance,
                    instance_path,
                    schema_path,
                    ValidationErrorKind::ContentMediaType { media_type: name.clone() },
                ));
            }
        }
    }

    fn validate_number(
        &self,
        n: &serde_json::Number,
        instance: &Value,
        instance_path: &PathStack,
        schema_path: &PathStack,
        errors: &mut Vec<ValidationError>,
    ) {
        let value = match Decimal::from_number(n) {
            Ok(v) => v,
            Err(_) => return,
        };
        if let Some(min) = &self.minimum {
            if &value < min {
                let _guard = PathGuard::new(schema_path, "minimum");
                errors.push(self.error(
                    instance,
                    instance_path,
                    schema_path,
                    ValidationErrorKind::Minimum { limit: format!("{}", min) },
                ));
            }
        }
        if let Some(max) = &self.maximum {
            if &value > max {
                let _guard = PathGuard::new(schema_path, "maximum");
                errors.push(self.error(
                    instance,
                    instance_path,
                    schema_path,
                    ValidationErrorKind::Maximum { limit: format!("{}", max) },
                ));
            }
        }
        if let Some(min) = &self.exclusive_minimum {
            if &value <= min {
                let _guard = PathGuard::new(schema_path, "exclusiveMinimum");
                errors.push(self.error(
                    instance,
                    instance_path,
                    schema_path,
                    ValidationErrorKind::ExclusiveMinimum { limit: format!("{}", min) },
                ));
            }
        }
        if let Some(max) = &self.exclusive_maximum {
            if &value >= max {
                let _guard = PathGuard::new(schema_path, "exclusiveMaximum");
                errors.push(self.error(
                    instance,
                    instance_path,
                    schema_path,
                    ValidationErrorKind::ExclusiveMaximum { limit: format!("{}", max) },
                ));
            }
        }
        if let Some(divisor) = &self.multiple_of {
            if !value.is_multiple_of(divisor) {
                let _guard = PathGuard::new(schema_path, "multipleOf");
                errors.push(self.error(
                    instance,
                    instance_path,
                    schema_path,
                    ValidationErrorKind::MultipleOf { divisor: format!("{}", divisor) },
                ));
            }
        }
    }
}
