//! `$id`/`id` anchor discovery for indirect `$ref` resolution.
//!
//! A schema document can declare alternate base URIs anywhere inside itself via the
//! draft's id keyword (`id` pre-draft-6, `$id` from draft 6 on). A `$ref` that targets one
//! of those URIs rather than the document root or a plain JSON pointer has to be resolved
//! by walking the whole document once and recording every such anchor. This mirrors the
//! reference compiler's `resolveIDs`, which walks the raw tree pushing a new base URI each
//! time it meets the id keyword.
use std::collections::HashMap;

use serde_json::Value;
use url::Url;

use crate::draft::Draft;
use crate::error::Error;
use crate::pointer::resolve_url;

/// Maps every absolute URL reachable through a nested `$id`/`id` to the raw sub-document
/// rooted there.
pub fn resolve_ids(draft: Draft, base: &Url, doc: &Value, out: &mut HashMap<String, Value>) -> Result<(), Error> {
    walk(draft, base, doc, out)
}

fn walk(draft: Draft, base: &Url, doc: &Value, out: &mut HashMap<String, Value>) -> Result<(), Error> {
    match doc {
        Value::Object(map) => {
            let mut base = base.clone();
            if let Some(Value::String(id)) = map.get(draft.id_keyword()) {
                base = resolve_url(&base, id)?;
                out.insert(base.to_string(), doc.clone());
            }
            for value in map.values() {
                walk(draft, &base, value, out)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                walk(draft, base, item, out)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_id_is_resolved_against_enclosing_base() {
        let base = Url::parse("http://example.com/schema").unwrap();
        let doc = json!({
            "$id": "http://example.com/schema",
            "definitions": {
                "node": {
                    "$id": "node.json",
                    "type": "object"
                }
            }
        });
        let mut out = HashMap::new();
        resolve_ids(Draft::Draft7, &base, &doc, &mut out).unwrap();
        assert!(out.contains_key("http://example.com/node.json"));
        assert!(out.contains_key("http://example.com/schema"));
    }

    #[test]
    fn draft4_uses_plain_id_keyword() {
        let base = Url::parse("http://example.com/schema").unwrap();
        let doc = json!({"id": "http://example.com/alt.json"});
        let mut out = HashMap::new();
        resolve_ids(Draft::Draft4, &base, &doc, &mut out).unwrap();
        assert!(out.contains_key("http://example.com/alt.json"));
    }
}
