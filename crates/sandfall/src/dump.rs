//! Plain-text rendering of the grid for terminals and logs

use sandfall_core::Grid;
use sandfall_simulation::Material;

/// One character per material
pub fn glyph(material: Material) -> char {
    match material {
        Material::Empty => '.',
        Material::Wall => '#',
        Material::Sand => 's',
        Material::Water => 'w',
        Material::Oil => 'o',
        Material::Fire => 'f',
        Material::Smoke => '~',
        Material::Wood => 'W',
        Material::Lava => 'L',
        Material::Stone => 'S',
        Material::Metal => 'M',
        Material::Ice => 'I',
        Material::Steam => '^',
        Material::Acid => 'a',
        Material::Gas => 'g',
        Material::Gunpowder => 'p',
        Material::Explosion => '*',
    }
}

/// Render the grid row by row, top row first
pub fn render(grid: &Grid) -> String {
    if grid.cols() == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in grid.cells().chunks(grid.cols()) {
        out.extend(row.iter().copied().map(glyph));
        out.push('\n');
    }
    out
}

/// Legend line for the glyphs in [`render`]
pub fn legend() -> String {
    Material::ALL
        .iter()
        .map(|&m| format!("{}={}", glyph(m), m))
        .collect::<Vec<_>>()
        .join(" ")
}
