//! Extension registry (§6): third-party keywords plug into compilation and validation
//! without the core knowing anything about their semantics.
//!
//! An [`Extension`] is registered by name on [`crate::options::CompilationOptions`]. When
//! the compiler encounters that name as a schema keyword, it calls `compile` once with the
//! raw keyword map and gets back opaque state; `validate` is later called with that same
//! state once per instance. Compile failures abort compilation; validate failures are
//! appended to the node's error list like any other keyword.
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::draft::Draft;
use crate::error::{Error, ValidationError};

/// Context handed to an extension at compile time: where the keyword was found and under
/// which draft. Extensions that need to resolve further `$ref`s would do so through a
/// richer context; this crate's extensions are self-contained, so this stays minimal.
pub struct ExtensionContext<'a> {
    pub url: &'a str,
    pub draft: Draft,
}

/// A third-party keyword. `State` is whatever `compile` needs to remember for `validate`.
pub trait Extension: Send + Sync {
    fn name(&self) -> &str;

    /// An optional meta-schema fragment constraining the keyword's own value.
    fn meta_schema(&self) -> Option<&Value> {
        None
    }

    /// `None` means this keyword set doesn't concern the extension; nothing is recorded
    /// on the compiled node and `validate` is never called for it (spec §4.2 point 4).
    fn compile(
        &self,
        context: &ExtensionContext<'_>,
        raw: &Map<String, Value>,
    ) -> Result<Option<Arc<dyn Any + Send + Sync>>, Error>;

    fn validate(&self, state: &(dyn Any + Send + Sync), instance: &Value) -> Option<ValidationError>;
}

impl fmt::Debug for dyn Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension").field("name", &self.name()).finish()
    }
}

/// An extension bound to the compiled state produced for one schema node.
#[derive(Clone)]
pub struct CompiledExtension {
    name: String,
    state: Arc<dyn Any + Send + Sync>,
    extension: Arc<dyn Extension>,
}

impl CompiledExtension {
    /// Returns `Ok(None)` when the extension declined this keyword map.
    pub fn compile(
        extension: Arc<dyn Extension>,
        context: &ExtensionContext<'_>,
        raw: &Map<String, Value>,
    ) -> Result<Option<Self>, Error> {
        let state = match extension.compile(context, raw)? {
            Some(state) => state,
            None => return Ok(None),
        };
        Ok(Some(CompiledExtension {
            name: extension.name().to_owned(),
            state,
            extension,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate(&self, instance: &Value) -> Option<ValidationError> {
        self.extension.validate(&*self.state, instance)
    }
}

impl fmt::Debug for CompiledExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledExtension").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use serde_json::json;

    struct IsEven;

    impl Extension for IsEven {
        fn name(&self) -> &str {
            "isEven"
        }

        fn compile(
            &self,
            _context: &ExtensionContext<'_>,
            raw: &Map<String, Value>,
        ) -> Result<Option<Arc<dyn Any + Send + Sync>>, Error> {
            if !raw.contains_key("isEven") {
                return Ok(None);
            }
            let expect = raw.get("isEven").and_then(Value::as_bool).unwrap_or(true);
            Ok(Some(Arc::new(expect)))
        }

        fn validate(&self, state: &(dyn Any + Send + Sync), instance: &Value) -> Option<ValidationError> {
            let expect = *state.downcast_ref::<bool>().unwrap();
            let n = instance.as_i64()?;
            if (n % 2 == 0) == expect {
                None
            } else {
                Some(ValidationError::new(
                    instance.clone(),
                    ValidationErrorKind::Extension {
                        name: "isEven".to_owned(),
                        message: "value does not match isEven constraint".to_owned(),
                    },
                ))
            }
        }
    }

    #[test]
    fn compiled_extension_round_trips_through_any() {
        let context = ExtensionContext { url: "mem://test", draft: Draft::Draft7 };
        let raw = json!({"isEven": true});
        let raw = raw.as_object().unwrap();
        let compiled = CompiledExtension::compile(Arc::new(IsEven), &context, raw).unwrap().unwrap();
        assert_eq!(compiled.name(), "isEven");
        assert!(compiled.validate(&json!(4)).is_none());
        assert!(compiled.validate(&json!(3)).is_some());
    }
}
