//! Facilities for working with paths within schemas or validated instances.
use std::{cell::RefCell, fmt};

/// One segment of a JSON pointer: either an object member name or an array index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathChunk {
    Name(String),
    Index(usize),
}

impl From<String> for PathChunk {
    #[inline]
    fn from(value: String) -> Self {
        PathChunk::Name(value)
    }
}

impl From<&str> for PathChunk {
    #[inline]
    fn from(value: &str) -> Self {
        PathChunk::Name(value.to_owned())
    }
}

impl From<usize> for PathChunk {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

/// A JSON pointer as a vector of path components, displayed in `#/a/b/0` form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JsonPointer(Vec<PathChunk>);

impl JsonPointer {
    pub fn root() -> Self {
        JsonPointer(Vec::new())
    }

    pub fn push(&mut self, chunk: impl Into<PathChunk>) {
        self.0.push(chunk.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
            .into_iter()
            .map(|chunk| match chunk {
                PathChunk::Name(value) => value,
                PathChunk::Index(idx) => idx.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for chunk in &self.0 {
            f.write_str("/")?;
            match chunk {
                PathChunk::Name(value) => f.write_str(value)?,
                PathChunk::Index(idx) => write!(f, "{}", idx)?,
            }
        }
        Ok(())
    }
}

impl From<&[&str]> for JsonPointer {
    #[inline]
    fn from(path: &[&str]) -> Self {
        JsonPointer(path.iter().map(|item| PathChunk::from(*item)).collect())
    }
}

impl From<&[PathChunk]> for JsonPointer {
    #[inline]
    fn from(path: &[PathChunk]) -> Self {
        JsonPointer(path.to_vec())
    }
}

/// A mutable stack of path components, pushed/popped as validation descends. Used for
/// both the instance path and the schema path during a single `Schema::validate` walk.
#[derive(Debug, Default)]
pub(crate) struct PathStack(RefCell<Vec<PathChunk>>);

pub(crate) type InstancePath = PathStack;

impl PathStack {
    pub(crate) fn new() -> Self {
        Self(RefCell::new(Vec::new()))
    }

    #[inline]
    pub(crate) fn push(&self, value: impl Into<PathChunk>) {
        self.0.borrow_mut().push(value.into());
    }

    #[inline]
    pub(crate) fn pop(&self) {
        self.0.borrow_mut().pop();
    }

    pub(crate) fn to_pointer(&self) -> JsonPointer {
        JsonPointer(self.0.borrow().clone())
    }
}

/// RAII guard that pops a `PathStack` segment pushed by `PathStack::push` on drop.
pub(crate) struct PathGuard<'a> {
    path: &'a PathStack,
}

impl<'a> PathGuard<'a> {
    pub(crate) fn new(path: &'a PathStack, value: impl Into<PathChunk>) -> Self {
        path.push(value);
        PathGuard { path }
    }
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_pointer_displays_as_hash() {
        assert_eq!(JsonPointer::root().to_string(), "#");
    }

    #[test]
    fn pointer_displays_mixed_chunks() {
        let mut pointer = JsonPointer::root();
        pointer.push("properties");
        pointer.push("items");
        pointer.push(2usize);
        assert_eq!(pointer.to_string(), "#/properties/items/2");
    }

    #[test]
    fn instance_path_guard_pops_on_drop() {
        let path = InstancePath::new();
        {
            let _guard = PathGuard::new(&path, "foo");
            assert_eq!(path.to_pointer().to_string(), "#/foo");
        }
        assert_eq!(path.to_pointer().to_string(), "#");
    }
}
