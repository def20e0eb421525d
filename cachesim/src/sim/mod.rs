//! Simulation harness.
//!
//! Owns the hierarchy and pulls trace events through it one at a time.
//! Each event resolves completely, including all recursion into lower
//! levels, before the next is issued, so counters are only ever observed
//! in quiescent states.

/// Trace-file parsing.
pub mod trace;

use std::io::{self, BufRead};

use crate::cache::Hierarchy;
use crate::common::ConfigError;
use crate::config::CacheParams;
use trace::{Op, TraceEvent, TraceReader};

/// Drives a hierarchy from a stream of trace events.
#[derive(Debug)]
pub struct Simulator {
    pub hierarchy: Hierarchy,
}

impl Simulator {
    /// Builds the hierarchy for `params`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an invalid parameter record.
    pub fn new(params: &CacheParams) -> Result<Self, ConfigError> {
        Ok(Self {
            hierarchy: Hierarchy::new(params)?,
        })
    }

    /// Applies a single trace event.
    pub fn apply(&mut self, event: TraceEvent) {
        match event.op {
            Op::Read => self.hierarchy.read(event.addr),
            Op::Write => self.hierarchy.write(event.addr),
        }
    }

    /// Consumes `input` to EOF, applying every recognized event.
    ///
    /// # Returns
    ///
    /// The number of events applied.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying reader.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<u64> {
        let mut events = 0;
        for event in TraceReader::new(input) {
            self.apply(event?);
            events += 1;
        }
        log::debug!("trace exhausted after {events} events");
        Ok(events)
    }
}
