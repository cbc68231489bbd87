//! Falling-sand simulation core
//!
//! - `world`: grid storage, visited tracking, configuration and the stepper
//! - `rules`: one update rule per material
//! - `paint`: brushes and drawing tools

pub mod paint;
pub mod rules;
pub mod world;

pub use paint::{EraseTool, PenTool, Tool, draw_circle};
pub use world::{
    ConfigError, Grid, GridError, NoopStats, SimConfig, SimRng, SimStats, Simulator,
    StepCounters, TieBreak, VisitedMask,
};

// Material data lives in its own crate; re-exported for convenience
pub use sandfall_simulation::{Material, MaterialError};
