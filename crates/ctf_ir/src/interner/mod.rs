//! String interner for field names, enumerator tags and clock names.
//!
//! Decoding runs on a single execution context, so the interner uses a
//! `RefCell` rather than a lock. Interned strings are leaked and live for the
//! rest of the process, which lets [`StringInterner::lookup`] hand out
//! `'static` references without holding a borrow.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// More strings than a `Name` can address.
    #[error("interner exceeded capacity: {count} strings, max is {max}", max = u32::MAX)]
    Overflow { count: usize },
}

#[derive(Default)]
struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

/// Interner mapping strings to compact [`Name`]s and back.
pub struct StringInterner {
    table: RefCell<InternTable>,
}

impl StringInterner {
    /// Create a new interner holding only the empty string.
    pub fn new() -> Self {
        let mut table = InternTable::default();
        let empty: &'static str = "";
        table.map.insert(empty, 0);
        table.strings.push(empty);
        StringInterner {
            table: RefCell::new(table),
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&index) = self.table.borrow().map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let mut table = self.table.borrow_mut();
        let index = u32::try_from(table.strings.len()).map_err(|_| InternError::Overflow {
            count: table.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` strings.
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up a string that was already interned, without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.borrow().map.get(s).copied().map(Name::from_raw)
    }

    /// Look up the string for a Name.
    ///
    /// Names from a different interner that fall out of range resolve to
    /// `"<unknown>"`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .borrow()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("<unknown>")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.borrow().strings.len()
    }

    /// Check if the interner only holds the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

/// Reference-counted handle to a [`StringInterner`].
///
/// Cloning is O(1); every clone resolves the same names.
#[derive(Clone, Debug, Default)]
pub struct SharedInterner(Rc<StringInterner>);

impl SharedInterner {
    /// Create a handle to a fresh interner.
    pub fn new() -> Self {
        SharedInterner(Rc::new(StringInterner::new()))
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
