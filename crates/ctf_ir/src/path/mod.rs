//! Dotted paths used to locate definitions relative to a scope.

use std::fmt;

use smallvec::SmallVec;

use crate::{Name, StringInterner};

/// Error produced when parsing a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty scope path")]
    Empty,
    #[error("empty component at position {position} in `{path}`")]
    EmptyComponent { path: String, position: usize },
}

/// A sequence of symbols such as `header.id`.
///
/// Most tag paths are one or two components deep, so the components are
/// stored inline.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ScopePath(SmallVec<[Name; 4]>);

impl ScopePath {
    /// Parse a dotted path, interning each component.
    pub fn parse(interner: &StringInterner, path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let mut names = SmallVec::new();
        for (position, component) in path.split('.').enumerate() {
            if component.is_empty() {
                return Err(PathError::EmptyComponent {
                    path: path.to_owned(),
                    position,
                });
            }
            names.push(interner.intern(component));
        }
        Ok(ScopePath(names))
    }

    /// A single-component path.
    pub fn single(name: Name) -> Self {
        let mut names = SmallVec::new();
        names.push(name);
        ScopePath(names)
    }

    /// Return a new path with `name` appended.
    #[must_use]
    pub fn join(&self, name: Name) -> Self {
        let mut names = self.0.clone();
        names.push(name);
        ScopePath(names)
    }

    pub fn as_slice(&self) -> &[Name] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Name> + '_ {
        self.0.iter().copied()
    }

    /// Render the path with `.` separators.
    pub fn display(&self, interner: &StringInterner) -> String {
        self.0
            .iter()
            .map(|name| interner.lookup(*name))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl FromIterator<Name> for ScopePath {
    fn from_iter<T: IntoIterator<Item = Name>>(iter: T) -> Self {
        ScopePath(iter.into_iter().collect())
    }
}

impl fmt::Debug for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests;
