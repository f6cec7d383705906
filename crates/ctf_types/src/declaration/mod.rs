//! Shared declaration handles.
//!
//! A [`Declaration`] is a closed sum over every kind of type. Each variant
//! holds an `Rc` to the typed declaration, so cloning a handle is taking a
//! reference and dropping one is releasing it. Definitions keep a handle to
//! the declaration they were built from.

use std::fmt;
use std::rc::Rc;

use ctf_ir::Name;

use crate::stack::ensure_sufficient_stack;
use crate::{
    Definition, EnumDeclaration, EnumDefinition, IntegerDeclaration, IntegerDefinition, Scope,
    StructDeclaration, StructDefinition, TypeError, UntaggedVariantDeclaration,
    VariantDeclaration, VariantDefinition,
};

/// Discriminant of a [`Declaration`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Integer,
    Enum,
    Struct,
    UntaggedVariant,
    Variant,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclarationKind::Integer => "integer",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Struct => "struct",
            DeclarationKind::UntaggedVariant => "untagged variant",
            DeclarationKind::Variant => "variant",
        };
        f.write_str(name)
    }
}

/// Reference-counted handle to a type declaration.
#[derive(Clone, Debug)]
pub enum Declaration {
    Integer(Rc<IntegerDeclaration>),
    Enum(Rc<EnumDeclaration>),
    Struct(Rc<StructDeclaration>),
    UntaggedVariant(Rc<UntaggedVariantDeclaration>),
    Variant(Rc<VariantDeclaration>),
}

impl Declaration {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Integer(_) => DeclarationKind::Integer,
            Declaration::Enum(_) => DeclarationKind::Enum,
            Declaration::Struct(_) => DeclarationKind::Struct,
            Declaration::UntaggedVariant(_) => DeclarationKind::UntaggedVariant,
            Declaration::Variant(_) => DeclarationKind::Variant,
        }
    }

    /// Static alignment in bits.
    ///
    /// Variants report 1: their effective alignment is that of the active
    /// choice, which is only known at decode time.
    pub fn alignment(&self) -> u32 {
        match self {
            Declaration::Integer(decl) => decl.alignment(),
            Declaration::Enum(decl) => decl.alignment(),
            Declaration::Struct(decl) => decl.alignment(),
            Declaration::UntaggedVariant(_) | Declaration::Variant(_) => 1,
        }
    }

    /// Number of live handles to this declaration.
    pub fn ref_count(&self) -> usize {
        match self {
            Declaration::Integer(decl) => Rc::strong_count(decl),
            Declaration::Enum(decl) => Rc::strong_count(decl),
            Declaration::Struct(decl) => Rc::strong_count(decl),
            Declaration::UntaggedVariant(decl) => Rc::strong_count(decl),
            Declaration::Variant(decl) => Rc::strong_count(decl),
        }
    }

    /// Whether both handles refer to the same declaration.
    pub fn ptr_eq(&self, other: &Declaration) -> bool {
        match (self, other) {
            (Declaration::Integer(a), Declaration::Integer(b)) => Rc::ptr_eq(a, b),
            (Declaration::Enum(a), Declaration::Enum(b)) => Rc::ptr_eq(a, b),
            (Declaration::Struct(a), Declaration::Struct(b)) => Rc::ptr_eq(a, b),
            (Declaration::UntaggedVariant(a), Declaration::UntaggedVariant(b)) => {
                Rc::ptr_eq(a, b)
            }
            (Declaration::Variant(a), Declaration::Variant(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Build a live definition of this declaration named `field_name` at
    /// position `index` of its parent, bound under `parent_scope`.
    ///
    /// On failure nothing is left allocated: every scope, child definition
    /// and handle taken so far is released before the error is returned.
    pub fn instantiate(
        &self,
        parent_scope: Option<&Rc<Scope>>,
        field_name: Name,
        index: usize,
    ) -> Result<Definition, TypeError> {
        ensure_sufficient_stack(|| match self {
            Declaration::Integer(decl) => Ok(Definition::Integer(Rc::new(
                IntegerDefinition::new(Rc::clone(decl), field_name, index),
            ))),
            Declaration::Enum(decl) => Ok(Definition::Enum(Rc::new(EnumDefinition::new(
                Rc::clone(decl),
                field_name,
                index,
            )))),
            Declaration::Struct(decl) => {
                StructDefinition::instantiate(decl, parent_scope, field_name, index)
                    .map(|def| Definition::Struct(Rc::new(def)))
            }
            Declaration::UntaggedVariant(_) => {
                Err(TypeError::UntaggedInstantiation { name: field_name })
            }
            Declaration::Variant(decl) => {
                VariantDefinition::instantiate(decl, parent_scope, field_name, index)
                    .map(|def| Definition::Variant(Rc::new(def)))
            }
        })
    }

    /// Instantiate as the root of a record: no parent scope, index 0.
    pub fn instantiate_root(&self, name: Name) -> Result<Definition, TypeError> {
        self.instantiate(None, name, 0)
    }

    pub fn as_struct(&self) -> Option<&Rc<StructDeclaration>> {
        match self {
            Declaration::Struct(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<&Rc<VariantDeclaration>> {
        match self {
            Declaration::Variant(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Rc<EnumDeclaration>> {
        match self {
            Declaration::Enum(decl) => Some(decl),
            _ => None,
        }
    }
}

impl From<IntegerDeclaration> for Declaration {
    fn from(decl: IntegerDeclaration) -> Self {
        Declaration::Integer(Rc::new(decl))
    }
}

impl From<EnumDeclaration> for Declaration {
    fn from(decl: EnumDeclaration) -> Self {
        Declaration::Enum(Rc::new(decl))
    }
}

impl From<StructDeclaration> for Declaration {
    fn from(decl: StructDeclaration) -> Self {
        Declaration::Struct(Rc::new(decl))
    }
}

impl From<UntaggedVariantDeclaration> for Declaration {
    fn from(decl: UntaggedVariantDeclaration) -> Self {
        Declaration::UntaggedVariant(Rc::new(decl))
    }
}

impl From<VariantDeclaration> for Declaration {
    fn from(decl: VariantDeclaration) -> Self {
        Declaration::Variant(Rc::new(decl))
    }
}

#[cfg(test)]
mod tests;
