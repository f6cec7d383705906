use pretty_assertions::assert_eq;

use super::*;

#[test]
fn builder_sets_fields() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("cannot resolve tag `kind`")
        .with_note("searched from scope `event.fields`");

    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.message, "cannot resolve tag `kind`");
    assert_eq!(diag.notes, vec!["searched from scope `event.fields`".to_owned()]);
    assert!(diag.is_error());
}

#[test]
fn severity_constructors() {
    assert!(Diagnostic::warning(ErrorCode::E4004).is_warning());
    assert!(Diagnostic::debug(ErrorCode::E4003).is_debug());
    assert!(!Diagnostic::debug(ErrorCode::E4003).is_error());
}

#[test]
fn display_includes_code_and_notes() {
    let diag = Diagnostic::warning(ErrorCode::E4004)
        .with_message("clock offset differs")
        .with_note("using average");

    assert_eq!(
        diag.to_string(),
        "warning [E4004]: clock offset differs\n  = note: using average"
    );
}
