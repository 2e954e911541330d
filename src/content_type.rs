//! The `Decoder` registry (spec §6) for `contentEncoding`: `name -> (string) -> bytes`.
//! Ships with `base64`. Grounded on the teacher's `content_type.rs`, which wired the
//! same `base64` crate to a single keyword check; generalised here into a registry so
//! `contentMediaType` can consume the decoded bytes (spec §4.3).
use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;
use lazy_static::lazy_static;

use crate::node::ContentDecoder;

fn decode_base64(instance: &str) -> Result<Vec<u8>, String> {
    base64::engine::general_purpose::STANDARD
        .decode(instance)
        .map_err(|err| err.to_string())
}

lazy_static! {
    static ref DEFAULT_DECODERS: HashMap<&'static str, ContentDecoder> = {
        let mut map: HashMap<&'static str, ContentDecoder> = HashMap::new();
        map.insert("base64", Arc::new(decode_base64));
        map
    };
}

#[derive(Clone, Default)]
pub struct DecoderRegistry {
    overrides: HashMap<String, Option<ContentDecoder>>,
}

impl DecoderRegistry {
    pub fn with(&mut self, name: impl Into<String>, decoder: ContentDecoder) {
        self.overrides.insert(name.into(), Some(decoder));
    }

    pub fn without(&mut self, name: impl Into<String>) {
        self.overrides.insert(name.into(), None);
    }

    pub fn get(&self, name: &str) -> Option<ContentDecoder> {
        if let Some(value) = self.overrides.get(name) {
            return value.clone();
        }
        DEFAULT_DECODERS.get(name).cloned()
    }
}
