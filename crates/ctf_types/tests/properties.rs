//! Property tests for structure declarations.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use ctf_ir::StringInterner;
use ctf_types::{Declaration, IntegerDeclaration, StructDeclaration};
use proptest::prelude::*;

proptest! {
    #[test]
    fn lookup_round_trips_and_alignment_is_max(exponents in prop::collection::vec(0u32..=6, 0..24)) {
        let interner = StringInterner::new();
        let mut decl = StructDeclaration::new();
        let mut names = Vec::new();

        for (i, exp) in exponents.iter().enumerate() {
            let name = interner.intern(&format!("f{i}"));
            let field = IntegerDeclaration::new(64, false, 1 << exp).unwrap();
            decl.add_field(name, Declaration::from(field)).unwrap();
            names.push(name);
        }

        for (i, name) in names.iter().enumerate() {
            prop_assert_eq!(decl.lookup_field_index(*name), Some(i));
            prop_assert_eq!(decl.fields()[i].name(), *name);
        }
        let expected = exponents.iter().map(|exp| 1u32 << exp).max().unwrap_or(1);
        prop_assert_eq!(decl.alignment(), expected);
    }

    #[test]
    fn instantiated_fields_match_declaration(count in 0usize..16) {
        let interner = StringInterner::new();
        let mut decl = StructDeclaration::new();
        for i in 0..count {
            decl.add_field(
                interner.intern(&format!("f{i}")),
                Declaration::from(IntegerDeclaration::unsigned(8).unwrap()),
            )
            .unwrap();
        }

        let def = Declaration::from(decl).instantiate_root(interner.intern("root")).unwrap();
        let record = def.as_struct().unwrap();
        prop_assert_eq!(record.fields().len(), count);
        for (i, field) in record.fields().iter().enumerate() {
            prop_assert_eq!(field.definition.index(), i);
            prop_assert!(record.scope().lookup_local(field.name).is_some());
        }
    }
}
