//! Shared identifiers for the CTF type system and trace crates.
//!
//! Every field name, enumerator tag, and clock name is interned once into a
//! [`StringInterner`] and passed around as a 32-bit [`Name`]. Interning gives
//! O(1) equality and hashing, which the scope tree and the variant tag maps
//! rely on for their lookups.
//!
//! [`ScopePath`] is a dotted sequence of names (`"header.id"`) used to locate
//! a definition relative to a scope.

mod interner;
mod name;
mod path;

pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use path::{PathError, ScopePath};
