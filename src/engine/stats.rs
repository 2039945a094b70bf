//! Engine statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cumulative counters of one engine, read at a single instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub ticks: u64,
    pub births: u64,
    pub deaths: u64,
    /// Cells dropped because their state went non-finite.
    pub faults: u64,
    pub population: usize,
    pub running: bool,
}

impl fmt::Display for EngineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks={} births={} deaths={} faults={} population={}",
            self.ticks, self.births, self.deaths, self.faults, self.population
        )
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Cells in the tick's snapshot.
    pub scanned: usize,
    pub births: usize,
    pub deaths: usize,
    pub faults: usize,
    /// Queued births discarded because injections filled the population
    /// mid-tick.
    pub dropped: usize,
    /// Live population after the batch was applied.
    pub population: usize,
}
