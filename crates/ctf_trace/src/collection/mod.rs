//! Clock correlation across a set of traces.

use std::rc::Rc;

use ctf_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, LogConfig};
use ctf_ir::SharedInterner;
use rustc_hash::FxHashMap;

use crate::{Clock, ClockIdentity, Trace, TraceError};

/// Offsets further apart than this (in ns) are reported as a mismatch.
const OFFSET_DELTA_WARN_NS: u64 = 10_000;

/// Running statistics over every correlated clock offset.
///
/// Deltas are accumulated relative to the first offset seen so the sum stays
/// small even when absolute offsets are large.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetStats {
    /// Offset (ns) of the first clock registered.
    pub offset_first: i64,
    /// Sum of `offset - offset_first` over every merged sample.
    pub delta_offset_first_sum: i64,
    /// Number of samples, including the first.
    pub offset_nr: u64,
    /// `offset_first + delta_offset_first_sum / offset_nr`.
    pub single_clock_offset_avg: i64,
}

impl OffsetStats {
    fn seed(&mut self, offset_ns: i64) {
        self.offset_first = offset_ns;
        self.delta_offset_first_sum = 0;
        self.offset_nr = 1;
        self.single_clock_offset_avg = offset_ns;
    }

    fn record(&mut self, offset_ns: i64) {
        self.delta_offset_first_sum = self
            .delta_offset_first_sum
            .saturating_add(offset_ns.saturating_sub(self.offset_first));
        self.offset_nr += 1;
        let count = i64::try_from(self.offset_nr).unwrap_or(i64::MAX);
        self.single_clock_offset_avg = self
            .offset_first
            .saturating_add(self.delta_offset_first_sum / count);
    }
}

/// A set of traces sharing one reference clock offset.
///
/// Traces are held by shared handle and compared by pointer; the collection
/// never tears a trace down. Clock statistics only ever grow: removing a
/// trace leaves them untouched.
#[derive(Debug)]
pub struct TraceCollection {
    traces: Vec<Rc<Trace>>,
    /// Representative clock per distinct clock.
    clocks: Vec<Clock>,
    /// Every identity key seen, pointing into `clocks`.
    by_identity: FxHashMap<ClockIdentity, usize>,
    stats: OffsetStats,
    interner: SharedInterner,
    diagnostics: DiagnosticQueue,
}

impl TraceCollection {
    pub fn new(interner: SharedInterner, config: LogConfig) -> Self {
        TraceCollection {
            traces: Vec::new(),
            clocks: Vec::new(),
            by_identity: FxHashMap::default(),
            stats: OffsetStats::default(),
            interner,
            diagnostics: DiagnosticQueue::new(config),
        }
    }

    /// Add a trace, correlating its clocks with the collection's.
    ///
    /// The first trace is always accepted. Every later trace must have at
    /// least one clock matching a registered clock, either by a shared
    /// non-nil UUID or by name when both are absolute; otherwise it is
    /// rejected with [`TraceError::Uncorrelated`] and nothing changes.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(trace = self.interner.lookup(trace.name()))
    )]
    pub fn add_trace(&mut self, trace: &Rc<Trace>) -> Result<(), TraceError> {
        if self.contains(trace) {
            return Err(TraceError::AlreadyPresent {
                trace: trace.name(),
            });
        }

        if !self.traces.is_empty() && !self.correlates(trace) {
            let err = TraceError::Uncorrelated {
                trace: trace.name(),
            };
            tracing::debug!(clocks = trace.clocks().len(), "trace rejected");
            self.diagnostics.emit(err.to_diagnostic(&self.interner));
            return Err(err);
        }

        for clock in trace.clocks() {
            self.merge_clock(clock);
        }
        self.traces.push(Rc::clone(trace));
        Ok(())
    }

    /// Remove a trace, returning the collection's handle to it.
    pub fn remove_trace(&mut self, trace: &Rc<Trace>) -> Result<Rc<Trace>, TraceError> {
        let position = self
            .traces
            .iter()
            .position(|held| Rc::ptr_eq(held, trace))
            .ok_or(TraceError::NotFound {
                trace: trace.name(),
            })?;
        Ok(self.traces.remove(position))
    }

    pub fn contains(&self, trace: &Rc<Trace>) -> bool {
        self.traces.iter().any(|held| Rc::ptr_eq(held, trace))
    }

    /// Traces in insertion order.
    pub fn traces(&self) -> &[Rc<Trace>] {
        &self.traces
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Representative clock registered under `identity`.
    pub fn clock(&self, identity: &ClockIdentity) -> Option<&Clock> {
        self.by_identity
            .get(identity)
            .map(|&index| &self.clocks[index])
    }

    /// Number of distinct clocks registered.
    pub fn clock_count(&self) -> usize {
        self.clocks.len()
    }

    pub fn stats(&self) -> OffsetStats {
        self.stats
    }

    /// Reference offset of the collection in nanoseconds.
    pub fn single_clock_offset_avg(&self) -> i64 {
        self.stats.single_clock_offset_avg
    }

    /// Map a raw value of `clock` onto the collection's timeline (ns).
    pub fn to_real_ns(&self, clock: &Clock, cycles: u64) -> i64 {
        let ns = i64::try_from(clock.cycles_to_ns(cycles)).unwrap_or(i64::MAX);
        self.stats.single_clock_offset_avg.saturating_add(ns)
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    /// Take every diagnostic emitted so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.flush()
    }

    fn correlates(&self, trace: &Trace) -> bool {
        trace
            .clocks()
            .iter()
            .flat_map(Clock::identities)
            .any(|identity| self.by_identity.contains_key(&identity))
    }

    fn lookup(&self, clock: &Clock) -> Option<usize> {
        clock
            .identities()
            .find_map(|identity| self.by_identity.get(&identity).copied())
    }

    fn merge_clock(&mut self, clock: &Clock) {
        if !clock.is_identifiable() {
            return;
        }
        let name = self.interner.lookup(clock.name());

        let Some(index) = self.lookup(clock) else {
            if !self.clocks.is_empty() {
                self.diagnostics.emit(
                    Diagnostic::error(ErrorCode::E4002)
                        .with_message(format!(
                            "clock `{name}` has an identity not shared by the collection"
                        ))
                        .with_note("only traces with a single clock description are supported"),
                );
                return;
            }
            if self.stats.offset_nr == 0 {
                self.stats.seed(clock.offset_ns());
            }
            let index = self.clocks.len();
            self.clocks.push(clock.clone());
            for identity in clock.identities() {
                self.by_identity.insert(identity, index);
            }
            return;
        };

        // A matched clock may bring a key the representative lacked.
        for identity in clock.identities() {
            self.by_identity.entry(identity).or_insert(index);
        }
        let delta = self.clocks[index].offset_ns().abs_diff(clock.offset_ns());
        self.diagnostics.emit(
            Diagnostic::debug(ErrorCode::E4003).with_message(format!(
                "clock `{name}` offset between traces has a delta of {delta} ns"
            )),
        );
        if delta > OFFSET_DELTA_WARN_NS {
            self.diagnostics.emit(
                Diagnostic::warning(ErrorCode::E4004).with_message(format!(
                    "clock `{name}` offset differs between traces (delta {delta} ns), using average"
                )),
            );
        }
        self.stats.record(clock.offset_ns());
    }
}
