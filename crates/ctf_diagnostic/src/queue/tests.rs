use super::*;
use crate::ErrorCode;

#[test]
fn counts_by_severity() {
    let mut queue = DiagnosticQueue::new(LogConfig::default());
    queue.emit(Diagnostic::error(ErrorCode::E4001).with_message("no correlation"));
    queue.emit(Diagnostic::warning(ErrorCode::E4004).with_message("offset differs"));
    queue.emit(Diagnostic::warning(ErrorCode::E4004).with_message("offset differs"));

    assert_eq!(queue.error_count(), 1);
    assert_eq!(queue.warning_count(), 2);
    assert!(queue.has_errors());
    assert_eq!(queue.len(), 3);
}

#[test]
fn debug_dropped_unless_enabled() {
    let mut quiet = DiagnosticQueue::new(LogConfig::default());
    quiet.emit(Diagnostic::debug(ErrorCode::E4003).with_message("delta 0 ns"));
    assert!(quiet.is_empty());

    let mut loud = DiagnosticQueue::new(LogConfig::debug());
    loud.emit(Diagnostic::debug(ErrorCode::E4003).with_message("delta 0 ns"));
    assert_eq!(loud.len(), 1);
    assert!(loud.diagnostics()[0].is_debug());
    assert!(!loud.has_errors());
}

#[test]
fn flush_resets() {
    let mut queue = DiagnosticQueue::new(LogConfig::default());
    queue.emit(Diagnostic::error(ErrorCode::E4002).with_message("two clocks"));

    let drained = queue.flush();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].code, ErrorCode::E4002);
    assert!(queue.is_empty());
    assert_eq!(queue.error_count(), 0);
}
