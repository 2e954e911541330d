//! An in-memory parsed schema document, keyed by its absolute URL (spec §3 "Resource").
//!
//! A `Resource` owns the raw document once it has been loaded and parsed, plus the
//! cache of compiled schema nodes already produced from it. The cache is keyed by the
//! same "reference key" the compiler uses to address a position inside the document:
//! `"#"` for the root, `"#/a/b"` for a local JSON pointer, or an absolute URL for a
//! position reached through a nested `$id`/`id` anchor.
use std::collections::HashMap;

use serde_json::Value;

use crate::draft::Draft;
use crate::node::NodeId;

#[derive(Debug)]
pub struct Resource {
    pub url: String,
    pub draft: Option<Draft>,
    pub doc: Value,
    pub schemas: HashMap<String, NodeId>,
}

impl Resource {
    pub fn new(url: String, doc: Value) -> Self {
        Resource { url, draft: None, doc, schemas: HashMap::new() }
    }
}
