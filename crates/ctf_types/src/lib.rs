//! Structural type system for self-describing trace records.
//!
//! Two layers:
//! - **Declarations** ([`Declaration`]) are immutable schemas shared by
//!   reference count: integers, enumerations, structures, untagged variants
//!   and tagged variants.
//! - **Definitions** ([`Definition`]) are live instances of a declaration,
//!   built per decoded record and bound into a [`Scope`] tree so that fields
//!   can find each other by name.
//!
//! A tagged variant selects its active choice from a sibling enumeration
//! located through its tag path at instantiation time. All choices are
//! instantiated up front; only the active one is transcoded.
//!
//! Transcoding walks a definition and drives a source and a destination
//! [`Format`] through matching begin/end hooks, see [`Definition::copy`].
//!
//! # Ownership
//!
//! ```text
//! Definition ──strong──▶ Declaration
//!     │
//!     └──strong──▶ Scope ──strong──▶ child Definitions
//!                    ▲                     │
//!                    └────────weak─────────┘ (child scope parent link)
//! ```
//!
//! Everything is single-threaded: handles are `Rc`, not `Arc`.

mod declaration;
mod definition;
mod enumeration;
mod error;
mod format;
mod integer;
mod registry;
mod scope;
mod stack;
mod structure;
mod variant;

#[cfg(test)]
mod test_support;

pub use declaration::{Declaration, DeclarationKind};
pub use definition::{Definition, Field};
pub use enumeration::{EnumDeclaration, EnumDefinition, Enumerator};
pub use error::{TypeError, TypeErrorKind};
pub use format::{Discard, Format, FormatError};
pub use integer::{IntegerDeclaration, IntegerDefinition};
pub use registry::{DeclarationScope, Namespace};
pub use scope::Scope;
pub use structure::{FieldSpec, StructDeclaration, StructDefinition};
pub use variant::{UntaggedVariantDeclaration, VariantDeclaration, VariantDefinition};
