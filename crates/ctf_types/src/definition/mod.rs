//! Live definition handles.

use std::rc::Rc;

use ctf_ir::Name;

use crate::stack::ensure_sufficient_stack;
use crate::{
    Declaration, DeclarationKind, Discard, EnumDefinition, Format, IntegerDefinition, Scope,
    StructDefinition, TypeError, VariantDefinition,
};

/// Reference-counted handle to a live definition.
#[derive(Clone, Debug)]
pub enum Definition {
    Integer(Rc<IntegerDefinition>),
    Enum(Rc<EnumDefinition>),
    Struct(Rc<StructDefinition>),
    Variant(Rc<VariantDefinition>),
}

/// A named child of a compound definition.
#[derive(Clone, Debug)]
pub struct Field {
    pub name: Name,
    pub definition: Definition,
}

impl Definition {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Definition::Integer(_) => DeclarationKind::Integer,
            Definition::Enum(_) => DeclarationKind::Enum,
            Definition::Struct(_) => DeclarationKind::Struct,
            Definition::Variant(_) => DeclarationKind::Variant,
        }
    }

    /// Field name this definition was instantiated under.
    pub fn name(&self) -> Name {
        match self {
            Definition::Integer(def) => def.name(),
            Definition::Enum(def) => def.name(),
            Definition::Struct(def) => def.name(),
            Definition::Variant(def) => def.name(),
        }
    }

    /// Position within the parent.
    pub fn index(&self) -> usize {
        match self {
            Definition::Integer(def) => def.index(),
            Definition::Enum(def) => def.index(),
            Definition::Struct(def) => def.index(),
            Definition::Variant(def) => def.index(),
        }
    }

    /// A new handle to the declaration this definition was built from.
    pub fn declaration(&self) -> Declaration {
        match self {
            Definition::Integer(def) => Declaration::Integer(Rc::clone(def.declaration())),
            Definition::Enum(def) => Declaration::Enum(Rc::clone(def.declaration())),
            Definition::Struct(def) => Declaration::Struct(Rc::clone(def.declaration())),
            Definition::Variant(def) => Declaration::Variant(Rc::clone(def.declaration())),
        }
    }

    /// Scope introduced by this definition; leaves have none.
    pub fn scope(&self) -> Option<&Rc<Scope>> {
        match self {
            Definition::Integer(_) | Definition::Enum(_) => None,
            Definition::Struct(def) => Some(def.scope()),
            Definition::Variant(def) => Some(def.scope()),
        }
    }

    /// Number of live handles to this definition.
    pub fn ref_count(&self) -> usize {
        match self {
            Definition::Integer(def) => Rc::strong_count(def),
            Definition::Enum(def) => Rc::strong_count(def),
            Definition::Struct(def) => Rc::strong_count(def),
            Definition::Variant(def) => Rc::strong_count(def),
        }
    }

    pub fn ptr_eq(&self, other: &Definition) -> bool {
        match (self, other) {
            (Definition::Integer(a), Definition::Integer(b)) => Rc::ptr_eq(a, b),
            (Definition::Enum(a), Definition::Enum(b)) => Rc::ptr_eq(a, b),
            (Definition::Struct(a), Definition::Struct(b)) => Rc::ptr_eq(a, b),
            (Definition::Variant(a), Definition::Variant(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_integer(&self) -> Option<&Rc<IntegerDefinition>> {
        match self {
            Definition::Integer(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Rc<EnumDefinition>> {
        match self {
            Definition::Enum(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Rc<StructDefinition>> {
        match self {
            Definition::Struct(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<&Rc<VariantDefinition>> {
        match self {
            Definition::Variant(def) => Some(def),
            _ => None,
        }
    }

    /// Transcode this definition from `src` (read through `fsrc`) to `dest`
    /// (written through `fdest`).
    ///
    /// Leaves move their value; structs copy every field in order; variants
    /// copy only the field selected by their tag.
    pub fn copy<D, S>(
        &self,
        dest: &mut D::Pos,
        fdest: &D,
        src: &mut S::Pos,
        fsrc: &S,
    ) -> Result<(), TypeError>
    where
        D: Format + ?Sized,
        S: Format + ?Sized,
    {
        ensure_sufficient_stack(|| match self {
            Definition::Integer(def) => def.copy(dest, fdest, src, fsrc),
            Definition::Enum(def) => def.copy(dest, fdest, src, fsrc),
            Definition::Struct(def) => def.copy(dest, fdest, src, fsrc),
            Definition::Variant(def) => def.copy(dest, fdest, src, fsrc),
        })
    }

    /// Decode this definition from `src` without writing anywhere.
    ///
    /// Same traversal as [`Definition::copy`] with a [`Discard`] destination.
    pub fn read<S>(&self, src: &mut S::Pos, fsrc: &S) -> Result<(), TypeError>
    where
        S: Format + ?Sized,
    {
        self.copy(&mut (), &Discard, src, fsrc)
    }
}
