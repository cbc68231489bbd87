//! Painting - brush shapes and drawing tools

mod erase;
mod pen;

pub use erase::EraseTool;
pub use pen::PenTool;

use sandfall_simulation::Material;

use crate::world::Grid;

/// Trait for drawing tools
pub trait Tool {
    /// Tool display name
    fn name(&self) -> &str;

    /// Apply tool at column `x`, row `y` with given brush size.
    /// Returns the number of cells written.
    fn apply(&self, grid: &mut Grid, x: i32, y: i32, brush_size: u32) -> usize;
}

/// Draw a filled circle of cells, skipping anything outside the grid
pub fn draw_circle(
    grid: &mut Grid,
    center_x: i32,
    center_y: i32,
    radius: u32,
    material: Material,
) -> usize {
    // Offsets stay in i64; squared distances need i128 for huge brushes
    let r = i64::from(radius);
    let r2 = i128::from(r) * i128::from(r);
    let (cx, cy) = (i64::from(center_x), i64::from(center_y));

    // Clip the bounding box to the grid before iterating
    let min_y = (cy - r).max(0);
    let max_y = (cy + r).min(grid.rows() as i64 - 1);
    let min_x = (cx - r).max(0);
    let max_x = (cx + r).min(grid.cols() as i64 - 1);

    let mut written = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (dy, dx) = (i128::from(y - cy), i128::from(x - cx));
            if dx * dx + dy * dy <= r2 && grid.set(y as i32, x as i32, material).is_ok() {
                written += 1;
            }
        }
    }
    written
}
