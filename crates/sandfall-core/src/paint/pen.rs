//! Pen tool for drawing materials

use sandfall_simulation::Material;

use super::{Tool, draw_circle};
use crate::world::Grid;

/// Pen tool that draws a specific material
pub struct PenTool {
    material: Material,
}

impl PenTool {
    /// Create a new pen tool for the given material
    pub fn new(material: Material) -> Self {
        Self { material }
    }

    /// Set the material this pen draws
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn material(&self) -> Material {
        self.material
    }
}

impl Tool for PenTool {
    fn name(&self) -> &str {
        "Pen"
    }

    fn apply(&self, grid: &mut Grid, x: i32, y: i32, brush_size: u32) -> usize {
        draw_circle(grid, x, y, brush_size, self.material)
    }
}
