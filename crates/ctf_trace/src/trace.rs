//! Trace handles.

use ctf_ir::Name;
use rustc_hash::FxHashMap;

use crate::{Clock, TraceError};

/// An opened trace as seen by clock correlation: a name and its clocks.
///
/// Collections hold traces as `Rc<Trace>` and compare them by pointer.
#[derive(Debug)]
pub struct Trace {
    name: Name,
    clocks: Vec<Clock>,
    by_name: FxHashMap<Name, usize>,
}

impl Trace {
    pub fn new(name: Name) -> Self {
        Trace {
            name,
            clocks: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    /// Add a clock. Clock names are unique within a trace.
    pub fn add_clock(&mut self, clock: Clock) -> Result<(), TraceError> {
        if self.by_name.contains_key(&clock.name()) {
            return Err(TraceError::DuplicateClock {
                trace: self.name,
                clock: clock.name(),
            });
        }
        self.by_name.insert(clock.name(), self.clocks.len());
        self.clocks.push(clock);
        Ok(())
    }

    /// Builder form of [`Trace::add_clock`].
    pub fn with_clock(mut self, clock: Clock) -> Result<Self, TraceError> {
        self.add_clock(clock)?;
        Ok(self)
    }

    /// Clocks in declaration order.
    pub fn clocks(&self) -> &[Clock] {
        &self.clocks
    }

    pub fn clock(&self, name: Name) -> Option<&Clock> {
        self.by_name.get(&name).map(|&index| &self.clocks[index])
    }
}
