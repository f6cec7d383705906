//! Enumeration type: an integer container whose values map to tags.
//!
//! Variants use an enumeration as their selector. The only queries they
//! need are the enumerator count, whether a tag exists, and the set of tags
//! the current value maps to.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ctf_ir::Name;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{Format, IntegerDeclaration, TypeError};

/// One enumerator: a tag and the inclusive value range mapping to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Enumerator {
    pub tag: Name,
    pub start: u64,
    pub end: u64,
}

impl Enumerator {
    #[inline]
    pub fn contains(&self, value: u64) -> bool {
        (self.start..=self.end).contains(&value)
    }
}

/// Enumeration declaration.
#[derive(Clone, Debug)]
pub struct EnumDeclaration {
    container: Rc<IntegerDeclaration>,
    enumerators: Vec<Enumerator>,
    /// Tag -> index into `enumerators`.
    by_tag: FxHashMap<Name, usize>,
}

impl EnumDeclaration {
    pub fn new(container: Rc<IntegerDeclaration>) -> Self {
        EnumDeclaration {
            container,
            enumerators: Vec::new(),
            by_tag: FxHashMap::default(),
        }
    }

    /// Add an enumerator mapping `start..=end` to `tag`.
    ///
    /// Each tag owns exactly one range: adding `tag` again, even for a
    /// disjoint range, fails with [`TypeError::DuplicateEnumerator`]. Ranges of
    /// different tags may overlap.
    pub fn add_enumerator(&mut self, tag: Name, start: u64, end: u64) -> Result<(), TypeError> {
        if start > end {
            return Err(TypeError::InvalidRange { tag, start, end });
        }
        if self.by_tag.contains_key(&tag) {
            return Err(TypeError::DuplicateEnumerator { tag });
        }
        self.by_tag.insert(tag, self.enumerators.len());
        self.enumerators.push(Enumerator { tag, start, end });
        Ok(())
    }

    /// Add an enumerator for a single value.
    pub fn add_value(&mut self, tag: Name, value: u64) -> Result<(), TypeError> {
        self.add_enumerator(tag, value, value)
    }

    pub fn container(&self) -> &IntegerDeclaration {
        &self.container
    }

    pub fn alignment(&self) -> u32 {
        self.container.alignment()
    }

    pub fn enumerator_count(&self) -> usize {
        self.enumerators.len()
    }

    pub fn has_tag(&self, tag: Name) -> bool {
        self.by_tag.contains_key(&tag)
    }

    pub fn enumerator(&self, tag: Name) -> Option<&Enumerator> {
        self.by_tag.get(&tag).map(|&index| &self.enumerators[index])
    }

    pub fn enumerators(&self) -> &[Enumerator] {
        &self.enumerators
    }

    /// Tags whose range contains `value`, in declaration order.
    ///
    /// Overlapping ranges yield several tags; an unmapped value yields none.
    pub fn tags_for_value(&self, value: u64) -> SmallVec<[Name; 1]> {
        self.enumerators
            .iter()
            .filter(|e| e.contains(value))
            .map(|e| e.tag)
            .collect()
    }
}

/// Live enumeration holding its current value and the tags it maps to.
#[derive(Debug)]
pub struct EnumDefinition {
    declaration: Rc<EnumDeclaration>,
    name: Name,
    index: usize,
    value: Cell<Option<u64>>,
    tags: RefCell<SmallVec<[Name; 1]>>,
}

impl EnumDefinition {
    pub(crate) fn new(declaration: Rc<EnumDeclaration>, name: Name, index: usize) -> Self {
        EnumDefinition {
            declaration,
            name,
            index,
            value: Cell::new(None),
            tags: RefCell::new(SmallVec::new()),
        }
    }

    pub fn declaration(&self) -> &Rc<EnumDeclaration> {
        &self.declaration
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Current value, `None` until one is read or assigned.
    pub fn value(&self) -> Option<u64> {
        self.value.get()
    }

    /// Current tag set.
    pub fn tags(&self) -> SmallVec<[Name; 1]> {
        self.tags.borrow().clone()
    }

    /// Assign a value and recompute the tag set.
    pub fn set_value(&self, value: u64) {
        let value = value & self.declaration.container().mask();
        self.value.set(Some(value));
        *self.tags.borrow_mut() = self.declaration.tags_for_value(value);
    }

    pub(crate) fn copy<D, S>(
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
        let value = fsrc.enum_read(src, &self.declaration)?;
        self.set_value(value);
        let tags = self.tags();
        fdest.enum_write(dest, &self.declaration, value, &tags)?;
        Ok(())
    }
}
