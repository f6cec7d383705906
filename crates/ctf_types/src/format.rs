//! The contract between the type system and concrete readers/writers.

use ctf_ir::Name;

use crate::{EnumDeclaration, IntegerDeclaration, StructDeclaration, VariantDeclaration};

/// Failure reported by a concrete format.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Source ran out of data.
    #[error("unexpected end of stream at bit offset {offset}")]
    UnexpectedEnd { offset: u64 },

    /// The format cannot perform this operation (e.g. reading from a
    /// write-only text output).
    #[error("{format} does not support {operation}")]
    Unsupported {
        format: &'static str,
        operation: &'static str,
    },

    #[error("invalid data: {0}")]
    Invalid(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Hooks a source or destination representation implements.
///
/// The position cursor is owned by the caller and threaded through every
/// call; the format advances it. Compound hooks only mark boundaries, the
/// type system never inspects byte layout. Leaf hooks move the actual values.
pub trait Format {
    /// Cursor into the underlying stream.
    type Pos;

    fn struct_begin(
        &self,
        pos: &mut Self::Pos,
        declaration: &StructDeclaration,
    ) -> Result<(), FormatError>;

    fn struct_end(
        &self,
        pos: &mut Self::Pos,
        declaration: &StructDeclaration,
    ) -> Result<(), FormatError>;

    fn variant_begin(
        &self,
        pos: &mut Self::Pos,
        declaration: &VariantDeclaration,
    ) -> Result<(), FormatError>;

    fn variant_end(
        &self,
        pos: &mut Self::Pos,
        declaration: &VariantDeclaration,
    ) -> Result<(), FormatError>;

    /// Read the raw bits of an integer.
    fn integer_read(
        &self,
        pos: &mut Self::Pos,
        declaration: &IntegerDeclaration,
    ) -> Result<u64, FormatError>;

    fn integer_write(
        &self,
        pos: &mut Self::Pos,
        declaration: &IntegerDeclaration,
        value: u64,
    ) -> Result<(), FormatError>;

    /// Read an enumeration value. Defaults to reading its container integer.
    fn enum_read(
        &self,
        pos: &mut Self::Pos,
        declaration: &EnumDeclaration,
    ) -> Result<u64, FormatError> {
        self.integer_read(pos, declaration.container())
    }

    /// Write an enumeration value along with the tags it maps to. Defaults to
    /// writing its container integer.
    fn enum_write(
        &self,
        pos: &mut Self::Pos,
        declaration: &EnumDeclaration,
        value: u64,
        tags: &[Name],
    ) -> Result<(), FormatError> {
        let _ = tags;
        self.integer_write(pos, declaration.container(), value)
    }
}

/// Destination that accepts every hook and stores nothing.
///
/// Pair it with a real source to decode values into definitions without
/// producing output; see [`Definition::read`](crate::Definition::read).
#[derive(Copy, Clone, Debug, Default)]
pub struct Discard;

impl Format for Discard {
    type Pos = ();

    fn struct_begin(&self, _: &mut (), _: &StructDeclaration) -> Result<(), FormatError> {
        Ok(())
    }

    fn struct_end(&self, _: &mut (), _: &StructDeclaration) -> Result<(), FormatError> {
        Ok(())
    }

    fn variant_begin(&self, _: &mut (), _: &VariantDeclaration) -> Result<(), FormatError> {
        Ok(())
    }

    fn variant_end(&self, _: &mut (), _: &VariantDeclaration) -> Result<(), FormatError> {
        Ok(())
    }

    fn integer_read(&self, _: &mut (), _: &IntegerDeclaration) -> Result<u64, FormatError> {
        Err(FormatError::Unsupported {
            format: "discard",
            operation: "integer_read",
        })
    }

    fn integer_write(&self, _: &mut (), _: &IntegerDeclaration, _: u64) -> Result<(), FormatError> {
        Ok(())
    }
}
