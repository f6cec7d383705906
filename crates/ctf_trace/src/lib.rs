//! Traces and their clocks, and the collection that correlates them.
//!
//! Every trace describes one or more clocks. Before several traces can be
//! merged into a single time-ordered view, a [`TraceCollection`] checks that
//! each newly added trace shares a clock with the traces already present,
//! then folds the clock offsets into one reference offset:
//!
//! ```text
//! average = offset_first + sum(offset_i - offset_first) / n
//! ```
//!
//! Raw clock values are mapped onto that shared timeline with
//! [`TraceCollection::to_real_ns`].

mod clock;
mod collection;
mod error;
mod trace;

pub use clock::{Clock, ClockIdentity, ClockUuid};
pub use collection::{OffsetStats, TraceCollection};
pub use error::TraceError;
pub use trace::Trace;
