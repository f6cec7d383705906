//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::rc::Rc;

use ctf_ir::{ScopePath, StringInterner};

use crate::{
    Declaration, EnumDeclaration, Format, FormatError, IntegerDeclaration, StructDeclaration,
    UntaggedVariantDeclaration, VariantDeclaration,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    StructBegin,
    StructEnd,
    VariantBegin,
    VariantEnd,
    Read(u64),
    Write(u64),
}

/// Cursor of a [`RecordingFormat`]: queued values to read and the log of
/// every hook called.
#[derive(Debug, Default)]
pub(crate) struct Recording {
    pub(crate) events: Vec<Event>,
    pub(crate) values: VecDeque<u64>,
}

impl Recording {
    pub(crate) fn with_values(values: impl IntoIterator<Item = u64>) -> Self {
        Recording {
            events: Vec::new(),
            values: values.into_iter().collect(),
        }
    }
}

/// Format that logs hook calls and reads values from a queue.
pub(crate) struct RecordingFormat;

impl Format for RecordingFormat {
    type Pos = Recording;

    fn struct_begin(&self, pos: &mut Recording, _: &StructDeclaration) -> Result<(), FormatError> {
        pos.events.push(Event::StructBegin);
        Ok(())
    }

    fn struct_end(&self, pos: &mut Recording, _: &StructDeclaration) -> Result<(), FormatError> {
        pos.events.push(Event::StructEnd);
        Ok(())
    }

    fn variant_begin(
        &self,
        pos: &mut Recording,
        _: &VariantDeclaration,
    ) -> Result<(), FormatError> {
        pos.events.push(Event::VariantBegin);
        Ok(())
    }

    fn variant_end(&self, pos: &mut Recording, _: &VariantDeclaration) -> Result<(), FormatError> {
        pos.events.push(Event::VariantEnd);
        Ok(())
    }

    fn integer_read(
        &self,
        pos: &mut Recording,
        _: &IntegerDeclaration,
    ) -> Result<u64, FormatError> {
        let value = pos.values.pop_front().ok_or(FormatError::UnexpectedEnd {
            offset: pos.events.len() as u64,
        })?;
        pos.events.push(Event::Read(value));
        Ok(value)
    }

    fn integer_write(
        &self,
        pos: &mut Recording,
        _: &IntegerDeclaration,
        value: u64,
    ) -> Result<(), FormatError> {
        pos.events.push(Event::Write(value));
        Ok(())
    }
}

pub(crate) fn u8_decl() -> Declaration {
    Declaration::from(IntegerDeclaration::unsigned(8).unwrap())
}

/// Enumeration over a `u8` mapping each tag to its position.
pub(crate) fn enum_decl(interner: &StringInterner, tags: &[&str]) -> Declaration {
    let mut decl = EnumDeclaration::new(Rc::new(IntegerDeclaration::unsigned(8).unwrap()));
    for (value, tag) in tags.iter().enumerate() {
        decl.add_value(interner.intern(tag), value as u64).unwrap();
    }
    Declaration::from(decl)
}

/// Variant whose choices are all `u8` integers, selected by `tag_path`.
pub(crate) fn variant_decl(
    interner: &StringInterner,
    choices: &[&str],
    tag_path: &str,
) -> Declaration {
    let mut untagged = UntaggedVariantDeclaration::new();
    for choice in choices {
        untagged.add_field(interner.intern(choice), u8_decl()).unwrap();
    }
    let path = ScopePath::parse(interner, tag_path).unwrap();
    Declaration::from(VariantDeclaration::new(Rc::new(untagged), path))
}

/// `struct { enum tag; variant<tag> v; }`
pub(crate) fn tagged_record(
    interner: &StringInterner,
    tags: &[&str],
    choices: &[&str],
) -> Declaration {
    let mut record = StructDeclaration::new();
    record
        .add_field(interner.intern("tag"), enum_decl(interner, tags))
        .unwrap();
    record
        .add_field(interner.intern("v"), variant_decl(interner, choices, "tag"))
        .unwrap();
    Declaration::from(record)
}
