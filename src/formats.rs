//! The `Format` registry (spec §6): `name -> (value) -> bool`, consulted by `compileMap`
//! when it resolves a `format` keyword. Ships with every format named across drafts 4-7;
//! an unrecognised name is not an error — the `format` keyword is simply left unset,
//! matching the teacher's `keywords/format.rs` `ignored_format` behaviour.
use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;

use crate::checks;
use crate::node::FormatChecker;

lazy_static! {
    static ref DEFAULT_FORMATS: HashMap<&'static str, FormatChecker> = {
        let mut map: HashMap<&'static str, FormatChecker> = HashMap::new();
        map.insert("date", Arc::new(checks::date));
        map.insert("date-time", Arc::new(checks::datetime));
        map.insert("email", Arc::new(checks::email));
        map.insert("idn-email", Arc::new(checks::email));
        map.insert("hostname", Arc::new(checks::hostname));
        map.insert("idn-hostname", Arc::new(checks::idn_hostname));
        map.insert("ipv4", Arc::new(checks::ipv4));
        map.insert("ipv6", Arc::new(checks::ipv6));
        map.insert("iri", Arc::new(checks::iri));
        map.insert("iri-reference", Arc::new(checks::iri_reference));
        map.insert("uri", Arc::new(checks::uri));
        map.insert("uri-reference", Arc::new(checks::uri_reference));
        map.insert("uri-template", Arc::new(checks::uri_template));
        map.insert("json-pointer", Arc::new(checks::json_pointer));
        map.insert("relative-json-pointer", Arc::new(checks::relative_json_pointer));
        map.insert("regex", Arc::new(checks::regex));
        map.insert("time", Arc::new(checks::time));
        map
    };
}

/// A mutable view over the default registry plus any per-`Compiler` overrides
/// (`CompilationOptions::with_format`/`without_format`, spec §10.4).
#[derive(Clone, Default)]
pub struct FormatRegistry {
    overrides: HashMap<String, Option<FormatChecker>>,
}

impl FormatRegistry {
    pub fn with(&mut self, name: impl Into<String>, checker: FormatChecker) {
        self.overrides.insert(name.into(), Some(checker));
    }

    pub fn without(&mut self, name: impl Into<String>) {
        self.overrides.insert(name.into(), None);
    }

    pub fn get(&self, name: &str) -> Option<FormatChecker> {
        if let Some(value) = self.overrides.get(name) {
            return value.clone();
        }
        DEFAULT_FORMATS.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_resolves_known_format() {
        let registry = FormatRegistry::default();
        let checker = registry.get("ipv4").unwrap();
        assert!(checker("127.0.0.1"));
        assert!(!checker("not-an-ip"));
    }

    #[test]
    fn unknown_format_resolves_to_none() {
        let registry = FormatRegistry::default();
        assert!(registry.get("custom").is_none());
    }

    #[test]
    fn override_replaces_default() {
        let mut registry = FormatRegistry::default();
        registry.with("ipv4", std::sync::Arc::new(|_: &str| false));
        assert!(!registry.get("ipv4").unwrap()("127.0.0.1"));
    }

    #[test]
    fn without_disables_default() {
        let mut registry = FormatRegistry::default();
        registry.without("ipv4");
        assert!(registry.get("ipv4").is_none());
    }
}
