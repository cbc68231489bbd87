//! # Sandfall - headless falling-sand runner
//!
//! Runs RON scenarios or free-form simulations from the command line and
//! prints the grid as text.

pub mod dump;
pub mod scenario;

pub use scenario::{ExecutionReport, ScenarioDefinition, ScenarioExecutor};
