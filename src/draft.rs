//! Per-draft descriptors: id keyword, embedded meta-schema text, compiled meta-schema
//! (spec §3 "Draft descriptor"). Process-wide immutable constants for drafts 4, 6, 7.
use lazy_static::lazy_static;
use serde_json::Value;

/// A supported version of the JSON Schema specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Draft {
    Draft4,
    Draft6,
    Draft7,
}

impl Default for Draft {
    /// Latest supported draft, used when a resource names no `$schema` (spec §3).
    fn default() -> Self {
        Draft::Draft7
    }
}

impl Draft {
    /// The keyword this draft uses to redefine a schema's base URI: `"id"` for draft 4,
    /// `"$id"` from draft 6 onward.
    pub fn id_keyword(self) -> &'static str {
        match self {
            Draft::Draft4 => "id",
            Draft::Draft6 | Draft::Draft7 => "$id",
        }
    }

    pub fn version(self) -> u8 {
        match self {
            Draft::Draft4 => 4,
            Draft::Draft6 => 6,
            Draft::Draft7 => 7,
        }
    }

    pub fn meta_schema_url(self) -> &'static str {
        match self {
            Draft::Draft4 => "http://json-schema.org/draft-04/schema#",
            Draft::Draft6 => "http://json-schema.org/draft-06/schema#",
            Draft::Draft7 => "http://json-schema.org/draft-07/schema#",
        }
    }

    /// Detects a draft from a `$schema` URI value, per spec §4.2 step 3.
    pub fn from_schema_uri(uri: &str) -> Option<Draft> {
        let trimmed = uri.trim_end_matches('#');
        match trimmed {
            "http://json-schema.org/schema" => Some(Draft::default()),
            "http://json-schema.org/draft-07/schema" => Some(Draft::Draft7),
            "http://json-schema.org/draft-06/schema" => Some(Draft::Draft6),
            "http://json-schema.org/draft-04/schema" => Some(Draft::Draft4),
            _ => None,
        }
    }

    /// Inspects a raw schema document's `$schema` member, falling back to `default` if absent.
    pub fn from_schema_document(doc: &Value, default: Draft) -> Result<Draft, String> {
        match doc.get("$schema").and_then(Value::as_str) {
            Some(uri) => Draft::from_schema_uri(uri).ok_or_else(|| uri.to_owned()),
            None => Ok(default),
        }
    }

    pub fn meta_schema_value(self) -> &'static Value {
        match self {
            Draft::Draft4 => &META_SCHEMAS.draft4,
            Draft::Draft6 => &META_SCHEMAS.draft6,
            Draft::Draft7 => &META_SCHEMAS.draft7,
        }
    }
}

struct MetaSchemas {
    draft4: Value,
    draft6: Value,
    draft7: Value,
}

lazy_static! {
    static ref META_SCHEMAS: MetaSchemas = MetaSchemas {
        draft4: serde_json::from_str(DRAFT4_META_SCHEMA).expect("embedded draft-4 meta-schema is valid JSON"),
        draft6: serde_json::from_str(DRAFT6_META_SCHEMA).expect("embedded draft-6 meta-schema is valid JSON"),
        draft7: serde_json::from_str(DRAFT7_META_SCHEMA).expect("embedded draft-7 meta-schema is valid JSON"),
    };
}

pub(crate) const DRAFT4_META_SCHEMA: &str = include_str!("metaschemas/draft4.json");
pub(crate) const DRAFT6_META_SCHEMA: &str = include_str!("metaschemas/draft6.json");
pub(crate) const DRAFT7_META_SCHEMA: &str = include_str!("metaschemas/draft7.json");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_meta_schemas_parse() {
        let _ = Draft::Draft4.meta_schema_value();
        let _ = Draft::Draft6.meta_schema_value();
        let _ = Draft::Draft7.meta_schema_value();
    }

    #[test]
    fn id_keyword_differs_for_draft4() {
        assert_eq!(Draft::Draft4.id_keyword(), "id");
        assert_eq!(Draft::Draft6.id_keyword(), "$id");
        assert_eq!(Draft::Draft7.id_keyword(), "$id");
    }

    #[test]
    fn schema_uri_detection() {
        assert_eq!(
            Draft::from_schema_uri("http://json-schema.org/draft-06/schema#"),
            Some(Draft::Draft6)
        );
        assert_eq!(Draft::from_schema_uri("http://json-schema.org/schema#"), Some(Draft::default()));
        assert_eq!(Draft::from_schema_uri("http://example.com/unknown#"), None);
    }
}
