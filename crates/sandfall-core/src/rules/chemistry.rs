//! Chemistry rules: fire, gases, phase changes, corrosion and explosions

use sandfall_simulation::Material;

use super::CellUpdate;
use crate::world::SimRng;

const UP: (i32, i32) = (-1, 0);

/// Chance per step that fire rises into an empty cell above
pub const FIRE_RISE_PROBABILITY: f32 = 0.6;
/// Chance per step that fire that did not rise burns out into smoke
pub const FIRE_BURNOUT_PROBABILITY: f32 = 0.02;
/// Chance per neighbor and step that fire ignites a flammable neighbor
pub const IGNITION_PROBABILITY: f32 = 0.5;
pub const SMOKE_RISE_PROBABILITY: f32 = 0.6;
pub const SMOKE_DISSIPATE_PROBABILITY: f32 = 0.01;
pub const GAS_RISE_PROBABILITY: f32 = 0.8;
pub const GAS_DISSIPATE_PROBABILITY: f32 = 0.002;
pub const STEAM_CONDENSE_PROBABILITY: f32 = 0.012;
/// Chance per neighbor and step that settled acid dissolves it
pub const ACID_DISSOLVE_PROBABILITY: f32 = 0.08;
pub const EXPLOSION_RADIUS: i32 = 2;
/// Floor for the hit chance at the rim of an explosion
pub const EXPLOSION_MIN_PROBABILITY: f32 = 0.3;

fn is_flammable(material: Material) -> bool {
    matches!(
        material,
        Material::Oil | Material::Wood | Material::Gas | Material::Gunpowder
    )
}

fn resists_acid(material: Material) -> bool {
    matches!(
        material,
        Material::Empty
            | Material::Acid
            | Material::Water
            | Material::Fire
            | Material::Smoke
            | Material::Steam
    )
}

/// Hit chance for a cell at squared distance `dist2` from an explosion center
pub fn explosion_probability(dist2: i32) -> f32 {
    let r2 = (EXPLOSION_RADIUS * EXPLOSION_RADIUS) as f32;
    (1.0 - dist2 as f32 / r2).max(EXPLOSION_MIN_PROBABILITY)
}

/// Fire rises, burns out into smoke, and spreads to flammable neighbors
pub fn update_fire<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if cell.chance(FIRE_RISE_PROBABILITY) && cell.move_to(UP.0, UP.1) {
        return;
    }

    if cell.chance(FIRE_BURNOUT_PROBABILITY) {
        cell.transform(Material::Smoke);
        return;
    }

    for (dy, dx, neighbor) in cell.neighbors() {
        if is_flammable(neighbor) && cell.chance(IGNITION_PROBABILITY) {
            cell.set_at(dy, dx, Material::Fire);
        }
    }
    cell.settle();
}

/// Smoke drifts up and slowly thins out
pub fn update_smoke<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if cell.chance(SMOKE_RISE_PROBABILITY) && cell.move_to(UP.0, UP.1) {
        return;
    }

    if cell.chance(SMOKE_DISSIPATE_PROBABILITY) {
        cell.transform(Material::Empty);
        return;
    }
    cell.settle();
}

/// Gas rises, rarely dissipates, and detonates next to fire
pub fn update_gas<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if cell.chance(GAS_RISE_PROBABILITY) && cell.move_to(UP.0, UP.1) {
        return;
    }

    if cell.chance(GAS_DISSIPATE_PROBABILITY) {
        cell.transform(Material::Empty);
        return;
    }

    if cell.any_neighbor(|m| m == Material::Fire) {
        cell.transform(Material::Explosion);
        return;
    }
    cell.settle();
}

/// Steam rises and condenses back into water when it cannot
pub fn update_steam<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if cell.move_to(UP.0, UP.1) {
        return;
    }

    if cell.chance(STEAM_CONDENSE_PROBABILITY) {
        cell.transform(Material::Water);
        return;
    }
    cell.settle();
}

/// Ice melts when fire or lava touches it
pub fn update_ice<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if cell.any_neighbor(|m| matches!(m, Material::Fire | Material::Lava)) {
        cell.transform(Material::Water);
        return;
    }
    cell.settle();
}

/// One-shot blast: clears or ignites everything within the radius
pub fn update_explosion<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    for dy in -EXPLOSION_RADIUS..=EXPLOSION_RADIUS {
        for dx in -EXPLOSION_RADIUS..=EXPLOSION_RADIUS {
            let dist2 = dy * dy + dx * dx;
            if dist2 > EXPLOSION_RADIUS * EXPLOSION_RADIUS {
                continue;
            }
            let Some(target) = cell.probe(dy, dx) else {
                continue;
            };
            if cell.chance(explosion_probability(dist2)) {
                let result = if target.is_combustible() {
                    Material::Fire
                } else {
                    Material::Empty
                };
                cell.set_at(dy, dx, result);
            }
        }
    }
    cell.transform(Material::Empty);
}

/// Settled acid dissolves non-resistant neighbors
pub(super) fn corrode_neighbors<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    for (dy, dx, neighbor) in cell.neighbors() {
        if !resists_acid(neighbor) && cell.chance(ACID_DISSOLVE_PROBABILITY) {
            cell.set_at(dy, dx, Material::Empty);
        }
    }
}

/// Settled lava turns to stone against water and sets combustibles alight
pub(super) fn quench_and_ignite<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    for (dy, dx, neighbor) in cell.neighbors() {
        if neighbor == Material::Water {
            cell.grid.replace(cell.y, cell.x, Material::Stone);
            cell.set_at(dy, dx, Material::Steam);
        } else if neighbor.is_combustible() {
            cell.set_at(dy, dx, Material::Fire);
        }
    }
}
