#![allow(clippy::unwrap_used, clippy::expect_used)]

use ctf_ir::StringInterner;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::{enum_decl, u8_decl, variant_decl};

#[test]
fn kinds_and_alignment() {
    let interner = StringInterner::new();
    let int = u8_decl();
    let tag = enum_decl(&interner, &["A"]);
    let variant = variant_decl(&interner, &["A"], "tag");

    assert_eq!(int.kind(), DeclarationKind::Integer);
    assert_eq!(tag.kind(), DeclarationKind::Enum);
    assert_eq!(variant.kind(), DeclarationKind::Variant);
    assert_eq!(int.alignment(), 8);
    assert_eq!(tag.alignment(), 8);
    assert_eq!(variant.alignment(), 1);
    assert_eq!(DeclarationKind::UntaggedVariant.to_string(), "untagged variant");
}

#[test]
fn handles_share_declaration() {
    let int = u8_decl();
    let other = int.clone();

    assert!(int.ptr_eq(&other));
    assert_eq!(int.ref_count(), 2);
    drop(other);
    assert_eq!(int.ref_count(), 1);
    assert!(!int.ptr_eq(&u8_decl()));
}

#[test]
fn definition_holds_its_declaration() {
    let interner = StringInterner::new();
    let int = u8_decl();

    let def = int.instantiate_root(interner.intern("x")).unwrap();
    assert_eq!(int.ref_count(), 2);
    assert!(def.declaration().ptr_eq(&int));
    assert_eq!(def.kind(), DeclarationKind::Integer);
    assert!(def.scope().is_none());

    drop(def);
    assert_eq!(int.ref_count(), 1);
}

#[test]
fn downcasts() {
    let interner = StringInterner::new();
    let tag = enum_decl(&interner, &["A"]);
    let record = Declaration::from(StructDeclaration::new());

    assert!(tag.as_enum().is_some());
    assert!(tag.as_struct().is_none());
    assert!(record.as_struct().is_some());
    assert!(record.as_variant().is_none());
    assert!(variant_decl(&interner, &["A"], "tag").as_variant().is_some());
}

#[test]
fn deep_nesting_instantiates() {
    let interner = StringInterner::new();
    let name = interner.intern("s");

    let mut decl = u8_decl();
    for _ in 0..500 {
        let mut outer = StructDeclaration::new();
        outer.add_field(name, decl).unwrap();
        decl = Declaration::from(outer);
    }

    let def = decl.instantiate_root(name).unwrap();
    assert_eq!(def.kind(), DeclarationKind::Struct);
}
