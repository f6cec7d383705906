#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn parse_dotted_path() {
    let interner = StringInterner::new();
    let path = ScopePath::parse(&interner, "header.id").unwrap();

    assert_eq!(path.len(), 2);
    assert_eq!(
        path.as_slice(),
        &[interner.intern("header"), interner.intern("id")]
    );
    assert_eq!(path.display(&interner), "header.id");
}

#[test]
fn parse_single_component() {
    let interner = StringInterner::new();
    let path = ScopePath::parse(&interner, "tag").unwrap();
    assert_eq!(path, ScopePath::single(interner.intern("tag")));
}

#[test]
fn parse_rejects_empty() {
    let interner = StringInterner::new();
    assert_eq!(ScopePath::parse(&interner, ""), Err(PathError::Empty));
}

#[test]
fn parse_rejects_empty_component() {
    let interner = StringInterner::new();
    assert_eq!(
        ScopePath::parse(&interner, "header..id"),
        Err(PathError::EmptyComponent {
            path: "header..id".to_owned(),
            position: 1,
        })
    );
}

#[test]
fn join_appends() {
    let interner = StringInterner::new();
    let root = ScopePath::single(interner.intern("event"));
    let joined = root.join(interner.intern("fields"));

    assert_eq!(root.len(), 1);
    assert_eq!(joined.display(&interner), "event.fields");
}
