//! The `MediaType` registry (spec §6) for `contentMediaType`: `name -> (bytes) -> ()`.
//! Ships with `application/json`. Grounded on the teacher's `content_media_type.rs`.
use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;

use crate::node::MediaTypeChecker;

fn check_json(bytes: &[u8]) -> Result<(), String> {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .map(|_| ())
        .map_err(|err| err.to_string())
}

lazy_static! {
    static ref DEFAULT_MEDIA_TYPES: HashMap<&'static str, MediaTypeChecker> = {
        let mut map: HashMap<&'static str, MediaTypeChecker> = HashMap::new();
        map.insert("application/json", Arc::new(check_json));
        map
    };
}

#[derive(Clone, Default)]
pub struct MediaTypeRegistry {
    overrides: HashMap<String, Option<MediaTypeChecker>>,
}

impl MediaTypeRegistry {
    pub fn with(&mut self, name: impl Into<String>, checker: MediaTypeChecker) {
        self.overrides.insert(name.into(), Some(checker));
    }

    pub fn without(&mut self, name: impl Into<String>) {
        self.overrides.insert(name.into(), None);
    }

    pub fn get(&self, name: &str) -> Option<MediaTypeChecker> {
        if let Some(value) = self.overrides.get(name) {
            return value.clone();
        }
        DEFAULT_MEDIA_TYPES.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_media_type_accepts_valid_json() {
        let registry = MediaTypeRegistry::default();
        let checker = registry.get("application/json").unwrap();
        assert!(checker(br#"{"a":1}"#).is_ok());
        assert!(checker(b"not json").is_err());
    }

    #[test]
    fn unknown_media_type_resolves_to_none() {
        assert!(MediaTypeRegistry::default().get("text/plain").is_none());
    }
}
