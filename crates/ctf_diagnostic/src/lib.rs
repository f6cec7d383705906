//! Diagnostics for the CTF type system and trace collection.
//!
//! Three severities are distinguished:
//! - `Error`: the operation that produced it failed, or a non-fatal problem
//!   the user must know about
//! - `Warning`: non-fatal, always user-visible
//! - `Debug`: only recorded when debug output is enabled in [`LogConfig`]
//!
//! Diagnostics are collected in a [`DiagnosticQueue`], which also forwards
//! each one to `tracing` at the matching level. Verbosity is configured by an
//! explicit [`LogConfig`] passed to whoever owns the queue; there is no
//! process-wide flag.

mod config;
mod diagnostic;
mod error_code;
mod queue;

pub use config::{init_tracing, LogConfig};
pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
