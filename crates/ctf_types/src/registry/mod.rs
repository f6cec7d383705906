//! Lexical scopes of named declarations.
//!
//! Metadata names types in four separate namespaces. A nested scope sees
//! its own entries first, then its parents'.

use std::fmt;
use std::rc::Rc;

use ctf_ir::Name;
use rustc_hash::FxHashMap;

use crate::{Declaration, TypeError};

/// Namespace a declaration name lives in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Typedef,
    Struct,
    Variant,
    Enum,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Namespace::Typedef => "typedef",
            Namespace::Struct => "struct",
            Namespace::Variant => "variant",
            Namespace::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// One level of named declarations.
#[derive(Debug, Default)]
pub struct DeclarationScope {
    entries: FxHashMap<(Namespace, Name), Declaration>,
    parent: Option<Rc<DeclarationScope>>,
}

impl DeclarationScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scope nested under `parent`.
    pub fn child(parent: &Rc<DeclarationScope>) -> Self {
        DeclarationScope {
            entries: FxHashMap::default(),
            parent: Some(Rc::clone(parent)),
        }
    }

    /// Register `declaration` as `name` in `namespace`.
    ///
    /// Shadowing a parent's entry is allowed; redeclaring at this level is not.
    pub fn register(
        &mut self,
        namespace: Namespace,
        name: Name,
        declaration: Declaration,
    ) -> Result<(), TypeError> {
        let key = (namespace, name);
        if self.entries.contains_key(&key) {
            return Err(TypeError::DuplicateDeclaration { namespace, name });
        }
        self.entries.insert(key, declaration);
        Ok(())
    }

    /// Look up `name`, searching parents if this level lacks it.
    pub fn lookup(&self, namespace: Namespace, name: Name) -> Option<Declaration> {
        self.lookup_local(namespace, name)
            .or_else(|| self.parent.as_ref()?.lookup(namespace, name))
    }

    pub fn lookup_local(&self, namespace: Namespace, name: Name) -> Option<Declaration> {
        self.entries.get(&(namespace, name)).cloned()
    }

    pub fn parent(&self) -> Option<&Rc<DeclarationScope>> {
        self.parent.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
