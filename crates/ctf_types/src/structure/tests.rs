#![allow(clippy::unwrap_used, clippy::expect_used)]

use ctf_ir::StringInterner;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::{u8_decl, Event, Recording, RecordingFormat};

fn int(size: u32, alignment: u32) -> Declaration {
    Declaration::from(crate::IntegerDeclaration::new(size, false, alignment).unwrap())
}

#[test]
fn fields_keep_declaration_order() {
    let interner = StringInterner::new();
    let (a, b, c) = (
        interner.intern("a"),
        interner.intern("b"),
        interner.intern("c"),
    );

    let mut decl = StructDeclaration::new();
    decl.add_field(b, u8_decl()).unwrap();
    decl.add_field(a, u8_decl()).unwrap();
    decl.add_field(c, u8_decl()).unwrap();

    let names: Vec<Name> = decl.fields().iter().map(FieldSpec::name).collect();
    assert_eq!(names, vec![b, a, c]);
    assert_eq!(decl.lookup_field_index(a), Some(1));
    assert_eq!(decl.lookup_field_index(interner.intern("d")), None);
    assert_eq!(decl.len(), 3);
}

#[test]
fn duplicate_field_rejected() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut decl = StructDeclaration::new();
    decl.add_field(x, u8_decl()).unwrap();
    let err = decl.add_field(x, u8_decl()).unwrap_err();

    assert!(matches!(err, TypeError::DuplicateField { name } if name == x));
    assert_eq!(decl.len(), 1);
}

#[test]
fn alignment_is_max_of_fields() {
    let interner = StringInterner::new();

    let mut decl = StructDeclaration::new();
    assert_eq!(decl.alignment(), 1);
    decl.add_field(interner.intern("a"), int(8, 8)).unwrap();
    decl.add_field(interner.intern("b"), int(32, 32)).unwrap();
    decl.add_field(interner.intern("c"), int(16, 16)).unwrap();
    assert_eq!(decl.alignment(), 32);
}

#[test]
fn instantiation_binds_fields_in_scope() {
    let interner = StringInterner::new();
    let (root, a, b) = (
        interner.intern("root"),
        interner.intern("a"),
        interner.intern("b"),
    );

    let mut decl = StructDeclaration::new();
    decl.add_field(a, u8_decl()).unwrap();
    decl.add_field(b, u8_decl()).unwrap();
    let decl = Declaration::from(decl);

    let def = decl.instantiate_root(root).unwrap();
    let record = def.as_struct().unwrap();

    assert_eq!(record.fields().len(), 2);
    assert_eq!(record.field(1).map(|f| f.definition.index()), Some(1));
    assert!(record
        .field_by_name(a)
        .unwrap()
        .definition
        .ptr_eq(&record.scope().lookup_local(a).unwrap()));
    assert_eq!(record.scope().len(), 2);
}

#[test]
fn copy_visits_fields_in_order() {
    let interner = StringInterner::new();

    let mut decl = StructDeclaration::new();
    decl.add_field(interner.intern("a"), u8_decl()).unwrap();
    decl.add_field(interner.intern("b"), u8_decl()).unwrap();
    let def = Declaration::from(decl)
        .instantiate_root(interner.intern("root"))
        .unwrap();

    let mut src = Recording::with_values([7, 9]);
    let mut dest = Recording::default();
    def.copy(&mut dest, &RecordingFormat, &mut src, &RecordingFormat)
        .unwrap();

    assert_eq!(
        src.events,
        vec![
            Event::StructBegin,
            Event::Read(7),
            Event::Read(9),
            Event::StructEnd
        ]
    );
    assert_eq!(
        dest.events,
        vec![
            Event::StructBegin,
            Event::Write(7),
            Event::Write(9),
            Event::StructEnd
        ]
    );
    let record = def.as_struct().unwrap();
    let values: Vec<u64> = record
        .fields()
        .iter()
        .map(|f| f.definition.as_integer().unwrap().value())
        .collect();
    assert_eq!(values, vec![7, 9]);
}

#[test]
fn copy_propagates_source_failure() {
    let interner = StringInterner::new();

    let mut decl = StructDeclaration::new();
    decl.add_field(interner.intern("a"), u8_decl()).unwrap();
    let def = Declaration::from(decl)
        .instantiate_root(interner.intern("root"))
        .unwrap();

    let mut src = Recording::default();
    let mut dest = Recording::default();
    let err = def
        .copy(&mut dest, &RecordingFormat, &mut src, &RecordingFormat)
        .unwrap_err();

    assert!(matches!(
        err,
        TypeError::Format(crate::FormatError::UnexpectedEnd { .. })
    ));
    assert_eq!(dest.events, vec![Event::StructBegin]);
}
