//! Errors raised while adding traces to a collection.

use ctf_diagnostic::{Diagnostic, ErrorCode};
use ctf_ir::{Name, StringInterner};

/// Trace collection error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// No clock of the trace shares an identity with the collection's clocks.
    #[error("no clock of trace {trace:?} can be correlated with the collection")]
    Uncorrelated { trace: Name },

    #[error("trace {trace:?} is not in the collection")]
    NotFound { trace: Name },

    #[error("trace {trace:?} is already in the collection")]
    AlreadyPresent { trace: Name },

    #[error("trace {trace:?} declares clock {clock:?} twice")]
    DuplicateClock { trace: Name, clock: Name },
}

impl TraceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TraceError::Uncorrelated { .. } => ErrorCode::E4001,
            TraceError::NotFound { .. } => ErrorCode::E4005,
            TraceError::AlreadyPresent { .. } => ErrorCode::E4006,
            TraceError::DuplicateClock { .. } => ErrorCode::E4007,
        }
    }

    /// Convert to a diagnostic with names resolved through `interner`.
    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        let diag = Diagnostic::error(self.code());
        match self {
            TraceError::Uncorrelated { trace } => diag
                .with_message(format!(
                    "no clock of trace `{}` can be correlated with the collection",
                    interner.lookup(*trace)
                ))
                .with_note("traces must share a clock UUID, or an absolute clock name"),
            TraceError::NotFound { trace } => diag.with_message(format!(
                "trace `{}` is not in the collection",
                interner.lookup(*trace)
            )),
            TraceError::AlreadyPresent { trace } => diag.with_message(format!(
                "trace `{}` is already in the collection",
                interner.lookup(*trace)
            )),
            TraceError::DuplicateClock { trace, clock } => diag.with_message(format!(
                "trace `{}` declares clock `{}` twice",
                interner.lookup(*trace),
                interner.lookup(*clock)
            )),
        }
    }
}
