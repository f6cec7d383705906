//! Definition scopes for cross-field name resolution.
//!
//! Every compound definition introduces a scope binding its children's
//! names. A scope only points at its parent weakly: the parent is kept alive
//! by the definition tree, never by its children.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use ctf_ir::{Name, ScopePath};
use rustc_hash::FxHashMap;

use crate::{Definition, TypeError};

/// One nesting level of field bindings.
pub struct Scope {
    name: Name,
    /// Field names from the root scope down to this one.
    path: ScopePath,
    bindings: RefCell<FxHashMap<Name, Definition>>,
    parent: Weak<Scope>,
}

impl Scope {
    /// Create a scope named `name` nested under `parent`.
    pub fn new(parent: Option<&Rc<Scope>>, name: Name) -> Rc<Scope> {
        let (path, parent) = match parent {
            Some(parent) => (parent.path.join(name), Rc::downgrade(parent)),
            None => (ScopePath::single(name), Weak::new()),
        };
        Rc::new(Scope {
            name,
            path,
            bindings: RefCell::new(FxHashMap::default()),
            parent,
        })
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn path(&self) -> &ScopePath {
        &self.path
    }

    /// Parent scope, if it is still alive.
    pub fn parent(&self) -> Option<Rc<Scope>> {
        self.parent.upgrade()
    }

    /// Bind `name` to `definition` in this scope.
    pub fn register(&self, name: Name, definition: Definition) -> Result<(), TypeError> {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.contains_key(&name) {
            return Err(TypeError::DuplicateBinding {
                name,
                scope: self.path.clone(),
            });
        }
        bindings.insert(name, definition);
        Ok(())
    }

    /// Look up a name bound directly in this scope.
    pub fn lookup_local(&self, name: Name) -> Option<Definition> {
        self.bindings.borrow().get(&name).cloned()
    }

    /// Resolve a dotted path, searching this scope and then its ancestors.
    ///
    /// At each level the first component must be bound there; the remaining
    /// components are resolved inside that definition's own scope. The first
    /// level yielding a complete match wins.
    pub fn lookup_path(&self, path: &[Name]) -> Option<Definition> {
        let (first, rest) = path.split_first()?;
        self.lookup_local(*first)
            .and_then(|definition| resolve_within(definition, rest))
            .or_else(|| self.parent()?.lookup_path(path))
    }

    /// Number of bindings at this level.
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }
}

/// Descend `rest` through nested definition scopes starting at `definition`.
fn resolve_within(definition: Definition, rest: &[Name]) -> Option<Definition> {
    rest.iter()
        .try_fold(definition, |current, name| current.scope()?.lookup_local(*name))
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<Name> = self.bindings.borrow().keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("Scope")
            .field("path", &self.path)
            .field("bindings", &names)
            .finish_non_exhaustive()
    }
}
