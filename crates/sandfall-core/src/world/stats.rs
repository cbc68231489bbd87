//! Simulation statistics collection

use serde::{Deserialize, Serialize};

/// Sink for per-step simulation events
pub trait SimStats {
    /// Record that a cell's occupant moved
    fn record_cell_moved(&mut self);

    /// Record that a cell changed its own material (melting, condensing, burning out)
    fn record_state_change(&mut self);

    /// Record that a cell changed a neighbor (ignition, corrosion, explosion)
    fn record_reaction(&mut self);

    /// Record that the stepper handed (y, x) to a rule
    fn record_dispatch(&mut self, _y: i32, _x: i32) {}
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_cell_moved(&mut self) {}
    fn record_state_change(&mut self) {}
    fn record_reaction(&mut self) {}
}

/// Running totals of simulation events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCounters {
    pub cells_moved: u64,
    pub state_changes: u64,
    pub reactions: u64,
    pub dispatches: u64,
}

impl StepCounters {
    pub fn summary(&self) -> String {
        format!(
            "moved: {} | state changes: {} | reactions: {} | dispatched: {}",
            self.cells_moved, self.state_changes, self.reactions, self.dispatches
        )
    }
}

impl SimStats for StepCounters {
    fn record_cell_moved(&mut self) {
        self.cells_moved += 1;
    }

    fn record_state_change(&mut self) {
        self.state_changes += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }

    fn record_dispatch(&mut self, _y: i32, _x: i32) {
        self.dispatches += 1;
    }
}
