//! Eraser tool

use sandfall_simulation::Material;

use super::{Tool, draw_circle};
use crate::world::Grid;

/// Eraser tool that places EMPTY
pub struct EraseTool;

impl Tool for EraseTool {
    fn name(&self) -> &str {
        "Eraser"
    }

    fn apply(&self, grid: &mut Grid, x: i32, y: i32, brush_size: u32) -> usize {
        draw_circle(grid, x, y, brush_size, Material::Empty)
    }
}
