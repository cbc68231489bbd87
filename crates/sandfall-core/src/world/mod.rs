//! World state - grid storage, visited tracking, configuration and stepping

mod config;
mod grid;
pub mod rng_trait;
mod simulator;
pub mod stats;
mod visited;

pub use config::{ConfigError, SimConfig, TieBreak};
pub use grid::{Grid, GridError};
pub use rng_trait::SimRng;
pub use simulator::Simulator;
pub use stats::{NoopStats, SimStats, StepCounters};
pub use visited::VisitedMask;

#[cfg(test)]
pub(crate) use rng_trait::TestRng;
