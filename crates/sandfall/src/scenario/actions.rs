//! Scenario actions

use sandfall_simulation::Material;
use serde::{Deserialize, Serialize};

/// One scripted change to the world. Coordinates are column `x`, row `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioAction {
    /// Fill a disc with a material
    Paint {
        x: i32,
        y: i32,
        #[serde(default)]
        radius: u32,
        material: Material,
    },

    /// Fill a disc with EMPTY
    Erase {
        x: i32,
        y: i32,
        #[serde(default)]
        radius: u32,
    },

    /// Fill an axis-aligned rectangle (inclusive) with a material
    FillRect {
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
        material: Material,
    },

    /// Empty the whole grid
    Clear,

    /// Advance the simulation
    Step { count: u64 },

    /// Write a message to the execution log
    Log { message: String },
}
