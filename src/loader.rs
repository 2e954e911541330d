//! The `Loader` contract (spec §6): a process-wide registry mapping URL schemes to
//! callables that fetch a schema document's bytes, plus the bundled `base64://` and
//! `file://` loaders. Grounded on `original_source/base64loader/base64loader.go` and
//! `original_source/httploader/httploader.go`, which register loaders the same way —
//! a global `scheme -> Loader` map, overridable per compiler instance.
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Error;

/// Lets a caller abort an in-flight `Compile` that is blocked on a `Loader`.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Fetches the bytes of a schema document named by `url`. Implementations may block on I/O;
/// they should check `token` and bail out promptly when it is cancelled.
pub trait Loader: Send + Sync {
    fn load(&self, token: &CancellationToken, url: &str) -> Result<Vec<u8>, Error>;
}

impl<F> Loader for F
where
    F: Fn(&CancellationToken, &str) -> Result<Vec<u8>, Error> + Send + Sync,
{
    fn load(&self, token: &CancellationToken, url: &str) -> Result<Vec<u8>, Error> {
        self(token, url)
    }
}

struct Base64Loader;

impl Loader for Base64Loader {
    /// Decodes the remainder of a `base64://<payload>` URL, accepting standard, URL-safe,
    /// raw-standard and raw-URL alphabets with or without padding (spec §6).
    fn load(&self, _token: &CancellationToken, url: &str) -> Result<Vec<u8>, Error> {
        let encoded = url.strip_prefix("base64://").unwrap_or(url);
        use base64::Engine;
        let alphabets = [
            base64::engine::general_purpose::STANDARD,
            base64::engine::general_purpose::URL_SAFE,
            base64::engine::general_purpose::STANDARD_NO_PAD,
            base64::engine::general_purpose::URL_SAFE_NO_PAD,
        ];
        for engine in &alphabets {
            if let Ok(bytes) = engine.decode(encoded) {
                return Ok(bytes);
            }
        }
        Err(Error::load(url, "unable to decode base64 payload in any known alphabet"))
    }
}

struct FileLoader;

impl Loader for FileLoader {
    fn load(&self, _token: &CancellationToken, url: &str) -> Result<Vec<u8>, Error> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        fs::read(path).map_err(|err| Error::load(url, err.to_string()))
    }
}

#[cfg(feature = "reqwest")]
struct HttpLoader;

#[cfg(feature = "reqwest")]
impl Loader for HttpLoader {
    fn load(&self, _token: &CancellationToken, url: &str) -> Result<Vec<u8>, Error> {
        let response = reqwest::blocking::get(url).map_err(|err| Error::load(url, err.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::load(url, format!("returned status code {}", response.status())));
        }
        response.bytes().map(|b| b.to_vec()).map_err(|err| Error::load(url, err.to_string()))
    }
}

lazy_static::lazy_static! {
    static ref LOADERS: RwLock<HashMap<String, Arc<dyn Loader>>> = {
        let mut map: HashMap<String, Arc<dyn Loader>> = HashMap::new();
        map.insert("base64".to_owned(), Arc::new(Base64Loader));
        map.insert("file".to_owned(), Arc::new(FileLoader));
        #[cfg(feature = "reqwest")]
        {
            map.insert("http".to_owned(), Arc::new(HttpLoader));
            map.insert("https".to_owned(), Arc::new(HttpLoader));
        }
        RwLock::new(map)
    };
}

/// Registers (or replaces) the process-wide loader for `scheme`.
pub fn register(scheme: impl Into<String>, loader: Arc<dyn Loader>) {
    LOADERS.write().insert(scheme.into(), loader);
}

fn scheme_of(url: &str) -> Option<&str> {
    url.split_once("://").map(|(scheme, _)| scheme)
}

/// Dispatches to the process-wide registry by URL scheme.
pub fn load(token: &CancellationToken, url: &str) -> Result<Vec<u8>, Error> {
    let scheme = scheme_of(url).ok_or_else(|| Error::load(url, "URL has no scheme"))?;
    tracing::trace!(scheme, url, "dispatching loader");
    let loader = LOADERS.read().get(scheme).cloned();
    match loader {
        Some(loader) => loader.load(token, url).map_err(|err| {
            tracing::warn!(url, error = %err, "loader failed");
            err
        }),
        None => Err(Error::load(url, format!("no loader registered for scheme '{}'", scheme))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_loader_decodes_standard_alphabet() {
        let token = CancellationToken::new();
        let bytes = load(&token, "base64://eyJ0eXBlIjogInN0cmluZyJ9").unwrap();
        assert_eq!(bytes, br#"{"type": "string"}"#);
    }

    #[test]
    fn base64_loader_decodes_url_safe_no_pad() {
        let token = CancellationToken::new();
        // `{"a":true}` base64-url-encoded without padding.
        let bytes = load(&token, "base64://eyJhIjp0cnVlfQ").unwrap();
        assert_eq!(bytes, br#"{"a":true}"#);
    }

    #[test]
    fn unknown_scheme_errors() {
        let token = CancellationToken::new();
        assert!(load(&token, "ftp://example.com/schema.json").is_err());
    }

    #[test]
    fn cancellation_token_reports_state() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }
}
