//! Integer leaf type.

use std::cell::Cell;
use std::rc::Rc;

use ctf_ir::Name;

use crate::{Format, TypeError};

/// Fixed-size integer declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntegerDeclaration {
    size: u32,
    signed: bool,
    alignment: u32,
}

impl IntegerDeclaration {
    /// Declare an integer of `size` bits aligned on `alignment` bits.
    pub fn new(size: u32, signed: bool, alignment: u32) -> Result<Self, TypeError> {
        if !(1..=64).contains(&size) {
            return Err(TypeError::InvalidIntegerSize { size });
        }
        if !alignment.is_power_of_two() {
            return Err(TypeError::InvalidAlignment { alignment });
        }
        Ok(IntegerDeclaration {
            size,
            signed,
            alignment,
        })
    }

    /// Unsigned integer aligned on its own size when that is a byte multiple,
    /// bit-aligned otherwise.
    pub fn unsigned(size: u32) -> Result<Self, TypeError> {
        let alignment = if size % 8 == 0 && size.is_power_of_two() {
            size
        } else {
            1
        };
        Self::new(size, false, alignment)
    }

    /// Size in bits.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Alignment in bits.
    #[inline]
    pub fn alignment(&self) -> u32 {
        self.alignment
    }

    /// Mask of the bits this integer occupies.
    pub fn mask(&self) -> u64 {
        if self.size == 64 {
            u64::MAX
        } else {
            (1u64 << self.size) - 1
        }
    }
}

/// Live integer holding the last value read or assigned.
#[derive(Debug)]
pub struct IntegerDefinition {
    declaration: Rc<IntegerDeclaration>,
    name: Name,
    index: usize,
    value: Cell<u64>,
}

impl IntegerDefinition {
    pub(crate) fn new(declaration: Rc<IntegerDeclaration>, name: Name, index: usize) -> Self {
        IntegerDefinition {
            declaration,
            name,
            index,
            value: Cell::new(0),
        }
    }

    pub fn declaration(&self) -> &Rc<IntegerDeclaration> {
        &self.declaration
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> u64 {
        self.value.get()
    }

    /// Store a value, truncated to the declared size.
    pub fn set_value(&self, value: u64) {
        self.value.set(value & self.declaration.mask());
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
        let value = fsrc.integer_read(src, &self.declaration)?;
        self.set_value(value);
        fdest.integer_write(dest, &self.declaration, self.value())?;
        Ok(())
    }
}
