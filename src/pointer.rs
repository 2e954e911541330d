//! URL splitting, URI reference resolution, and JSON pointer resolution (spec §4.1).
use std::borrow::Cow;

use serde_json::Value;
use url::Url;

use crate::error::Error;

/// Splits a URL-or-URL-with-fragment at the first `#`, per spec §4.1.
///
/// An absent fragment yields `""`. The base keeps no trailing `#`.
pub fn split(url: &str) -> (&str, &str) {
    match url.find('#') {
        Some(idx) => (&url[..idx], &url[idx + 1..]),
        None => (url, ""),
    }
}

/// True for fragments that refer to the schema root: `""`, `"#"`.
pub fn root_fragment(fragment: &str) -> bool {
    fragment.is_empty() || fragment == "#"
}

/// Resolves `ref` relative to `base` per RFC 3986, as implemented by the `url` crate.
pub fn resolve_url(base: &Url, reference: &str) -> Result<Url, Error> {
    base.join(reference)
        .map_err(|err| Error::invalid_ref(reference, err.to_string()))
}

/// Reverses the JSON pointer token escape (`~1` → `/`, `~0` → `~`).
pub fn unescape_token(token: &str) -> Cow<str> {
    let Some(mut tilde_idx) = token.find('~') else {
        return Cow::Borrowed(token);
    };
    let mut segment = token;
    let mut buffer = String::with_capacity(token.len());
    loop {
        let (before, after) = segment.split_at(tilde_idx);
        buffer.push_str(before);
        segment = &after[1..];
        let consumed = match segment.chars().next() {
            Some('1') => {
                buffer.push('/');
                1
            }
            Some('0') => {
                buffer.push('~');
                1
            }
            Some(next) => {
                buffer.push('~');
                buffer.push(next);
                next.len_utf8()
            }
            None => {
                buffer.push('~');
                break;
            }
        };
        segment = &segment[consumed..];
        match segment.find('~') {
            Some(idx) => tilde_idx = idx,
            None => {
                buffer.push_str(segment);
                break;
            }
        }
    }
    Cow::Owned(buffer)
}

/// Navigates a JSON pointer fragment beginning with `#/`, per spec §4.1.
///
/// Decodes `~1`/`~0` escapes and URL-unescapes each token before lookup. Fails with
/// `Error::invalid_pointer` if a token is absent or traverses a non-container.
pub fn resolve_ptr<'a>(root: &'a Value, fragment: &str) -> Result<&'a Value, Error> {
    if root_fragment(fragment) {
        return Ok(root);
    }
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    let raw = raw.strip_prefix('/').ok_or_else(|| Error::invalid_pointer(fragment))?;

    let decoded = percent_encoding::percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| Error::invalid_pointer(fragment))?;

    let mut current = root;
    for raw_token in decoded.split('/') {
        let token = unescape_token(raw_token);
        current = match current {
            Value::Object(map) => map
                .get(token.as_ref())
                .ok_or_else(|| Error::invalid_pointer(fragment))?,
            Value::Array(items) => {
                let idx: usize = token
                    .parse()
                    .map_err(|_| Error::invalid_pointer(fragment))?;
                items.get(idx).ok_or_else(|| Error::invalid_pointer(fragment))?
            }
            _ => return Err(Error::invalid_pointer(fragment)),
        };
    }
    Ok(current)
}

/// Splits a pointer fragment such as `#/a/b` into its decoded tokens, for rebuilding a
/// path stack rooted at an already-resolved schema position (spec §4.3 `$ref`: the
/// referent's own `Ptr` becomes the base of its error's `schema_path`, not a suffix of
/// the referrer's). Malformed percent-encoding falls back to the raw token rather than
/// failing, since the fragment was already accepted once by `resolve_ptr`/the compiler.
pub(crate) fn fragment_tokens(fragment: &str) -> Vec<String> {
    if root_fragment(fragment) {
        return Vec::new();
    }
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    let raw = raw.strip_prefix('/').unwrap_or(raw);
    let decoded = percent_encoding::percent_decode_str(raw)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_owned());
    decoded.split('/').map(|token| unescape_token(token).into_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_at_first_hash() {
        assert_eq!(split("http://x/y#/a/b"), ("http://x/y", "/a/b"));
        assert_eq!(split("http://x/y"), ("http://x/y", ""));
    }

    #[test]
    fn root_fragment_recognises_empty_and_hash() {
        assert!(root_fragment(""));
        assert!(root_fragment("#"));
        assert!(!root_fragment("#/a"));
    }

    #[test]
    fn unescape_token_decodes_tilde_escapes() {
        assert_eq!(unescape_token("a~0b~1c"), "a~b/c");
        assert_eq!(unescape_token("plain"), "plain");
    }

    #[test]
    fn fragment_tokens_splits_and_decodes() {
        assert_eq!(fragment_tokens("#/definitions/node"), vec!["definitions", "node"]);
        assert_eq!(fragment_tokens("#/a~1b/c~0d"), vec!["a/b", "c~d"]);
        assert!(fragment_tokens("#").is_empty());
        assert!(fragment_tokens("").is_empty());
    }

    #[test]
    fn resolve_ptr_navigates_nested_values() {
        let doc = json!({"defs": {"node": {"type": "object"}}, "list": [1, 2, 3]});
        let resolved = resolve_ptr(&doc, "#/defs/node").unwrap();
        assert_eq!(resolved, &json!({"type": "object"}));
        let item = resolve_ptr(&doc, "#/list/1").unwrap();
        assert_eq!(item, &json!(2));
    }

    #[test]
    fn resolve_ptr_root_for_empty_or_hash() {
        let doc = json!({"a": 1});
        assert_eq!(resolve_ptr(&doc, "").unwrap(), &doc);
        assert_eq!(resolve_ptr(&doc, "#").unwrap(), &doc);
    }

    #[test]
    fn resolve_ptr_fails_on_missing_member() {
        let doc = json!({"a": 1});
        assert!(resolve_ptr(&doc, "#/b").is_err());
    }
}
