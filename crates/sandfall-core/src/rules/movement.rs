//! Movement rules for powders and liquids
//!
//! Rows grow downwards: `(1, 0)` is the cell below, `(0, -1)` the cell to
//! the left.

use sandfall_simulation::Material;

use super::CellUpdate;
use super::chemistry::{corrode_neighbors, quench_and_ignite};
use crate::world::SimRng;

const DOWN: (i32, i32) = (1, 0);
const DOWN_LEFT: (i32, i32) = (1, -1);
const DOWN_RIGHT: (i32, i32) = (1, 1);
const LEFT: (i32, i32) = (0, -1);
const RIGHT: (i32, i32) = (0, 1);

/// Straight down, then the two lower diagonals in random order
fn fall_powder<R: SimRng>(cell: &mut CellUpdate<'_, R>) -> bool {
    cell.move_to(DOWN.0, DOWN.1) || cell.move_first([DOWN_LEFT, DOWN_RIGHT])
}

/// Straight down, then sideways or diagonally down in random order
fn flow_liquid<R: SimRng>(cell: &mut CellUpdate<'_, R>) -> bool {
    cell.move_to(DOWN.0, DOWN.1) || cell.move_first([LEFT, RIGHT, DOWN_LEFT, DOWN_RIGHT])
}

/// Straight down, then sideways in random order; no diagonals
fn flow_viscous<R: SimRng>(cell: &mut CellUpdate<'_, R>) -> bool {
    cell.move_to(DOWN.0, DOWN.1) || cell.move_first([LEFT, RIGHT])
}

/// Materials with no rule of their own
pub fn update_passive<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    cell.settle();
}

/// Update powder material (falls down, slides diagonally)
pub fn update_powder<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if !fall_powder(cell) {
        cell.settle();
    }
}

/// Gunpowder falls like sand but detonates next to fire.
///
/// The fire check runs before movement, so contact with flame at dispatch
/// time always wins over falling away.
pub fn update_gunpowder<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if cell.any_neighbor(|m| m == Material::Fire) {
        cell.transform(Material::Explosion);
        return;
    }
    update_powder(cell);
}

/// Update liquid material (falls, then spreads sideways and diagonally)
pub fn update_liquid<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if !flow_liquid(cell) {
        cell.settle();
    }
}

/// Acid flows like water and eats into its surroundings once it stops
pub fn update_acid<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if flow_liquid(cell) {
        return;
    }
    corrode_neighbors(cell);
    cell.settle();
}

/// Oil spreads sideways but never diagonally
pub fn update_oil<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if !flow_viscous(cell) {
        cell.settle();
    }
}

/// Lava flows like oil and reacts with its surroundings once it stops
pub fn update_lava<R: SimRng>(cell: &mut CellUpdate<'_, R>) {
    if flow_viscous(cell) {
        return;
    }
    quench_and_ignite(cell);
    cell.settle();
}

#[cfg(test)]
mod tests {
    use super::super::harness::RuleHarness;
    use crate::world::TestRng;
    use sandfall_simulation::Material;

    #[test]
    fn test_powder_falls_down() {
        let mut h = RuleHarness::from_rows(&[".s.", "...", "###"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(0, 1), Material::Empty);
        assert_eq!(h.at(1, 1), Material::Sand);
        assert!(h.visited.is_visited(1, 1));
        assert!(!h.visited.is_visited(0, 1));
    }

    #[test]
    fn test_powder_stops_on_solid() {
        let mut h = RuleHarness::from_rows(&[".s.", "###"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(0, 1), Material::Sand);
        assert!(h.visited.is_visited(0, 1));
    }

    #[test]
    fn test_powder_slides_diagonally_in_shuffled_order() {
        // identity shuffle: down-left is tried first
        let mut h = RuleHarness::from_rows(&[".s.", ".#.", "###"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(1, 0), Material::Sand);

        // swapped shuffle: down-right is tried first
        let rng = TestRng::always().push_indices(&[0]);
        let mut h = RuleHarness::from_rows(&[".s.", ".#.", "###"], rng);
        h.run(0, 1);
        assert_eq!(h.at(1, 2), Material::Sand);
        assert!(h.visited.is_visited(1, 2));
    }

    #[test]
    fn test_powder_takes_only_open_diagonal() {
        let rng = TestRng::always().push_indices(&[0]);
        let mut h = RuleHarness::from_rows(&[".s.", ".##", "###"], rng);
        h.run(0, 1);
        assert_eq!(h.at(1, 0), Material::Sand);
    }

    #[test]
    fn test_powder_does_not_move_sideways() {
        let mut h = RuleHarness::from_rows(&[".s.", "###"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(0, 0), Material::Empty);
        assert_eq!(h.at(0, 2), Material::Empty);
    }

    #[test]
    fn test_powder_at_bottom_edge_stays() {
        let mut h = RuleHarness::from_rows(&["...", ".s."], TestRng::always());
        h.run(1, 1);
        assert_eq!(h.at(1, 1), Material::Sand);
        assert!(h.visited.is_visited(1, 1));
    }

    #[test]
    fn test_gunpowder_explodes_next_to_fire() {
        let mut h = RuleHarness::from_rows(&[".f.", ".p.", "..."], TestRng::always());
        h.run(1, 1);
        assert_eq!(h.at(1, 1), Material::Explosion);
        assert_eq!(h.at(2, 1), Material::Empty);
        assert!(h.visited.is_visited(1, 1));
    }

    #[test]
    fn test_gunpowder_diagonal_fire_counts() {
        let mut h = RuleHarness::from_rows(&["...", ".p.", "..f"], TestRng::always());
        h.run(1, 1);
        assert_eq!(h.at(1, 1), Material::Explosion);
    }

    #[test]
    fn test_gunpowder_without_fire_falls() {
        let mut h = RuleHarness::from_rows(&[".p.", "...", "W.W"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(1, 1), Material::Gunpowder);
    }

    #[test]
    fn test_liquid_falls_down() {
        let mut h = RuleHarness::from_rows(&[".w.", "...", "###"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(1, 1), Material::Water);
    }

    #[test]
    fn test_liquid_flows_horizontally() {
        let mut h = RuleHarness::from_rows(&[".w.", "###"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(0, 1), Material::Empty);
        assert_eq!(h.at(0, 0), Material::Water);
        assert!(h.visited.is_visited(0, 0));
    }

    #[test]
    fn test_liquid_prefers_down_over_sideways() {
        let mut h = RuleHarness::from_rows(&["...", ".w.", "..."], TestRng::always());
        h.run(1, 1);
        assert_eq!(h.at(2, 1), Material::Water);
        assert_eq!(h.at(1, 0), Material::Empty);
    }

    #[test]
    fn test_liquid_diagonal_move() {
        let mut h = RuleHarness::from_rows(&["#w#", ".#.", "###"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(1, 0), Material::Water);
    }

    #[test]
    fn test_oil_never_moves_diagonally() {
        let mut h = RuleHarness::from_rows(&["#o#", ".#.", "###"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(0, 1), Material::Oil);
        assert!(h.visited.is_visited(0, 1));
    }

    #[test]
    fn test_oil_spreads_sideways() {
        let rng = TestRng::always().push_indices(&[0]);
        let mut h = RuleHarness::from_rows(&[".o.", "###"], rng);
        h.run(0, 1);
        assert_eq!(h.at(0, 2), Material::Oil);
    }

    #[test]
    fn test_acid_dissolves_when_settled() {
        let mut h = RuleHarness::from_rows(&["MMM", "MaM", "MMM"], TestRng::always());
        h.run(1, 1);
        assert_eq!(h.at(1, 1), Material::Acid);
        for (y, x) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
            assert_eq!(h.at(y, x), Material::Empty);
        }
        assert!(h.visited.is_visited(1, 1));
    }

    #[test]
    fn test_acid_spares_resistant_neighbors() {
        let mut h = RuleHarness::from_rows(&["awf", "~a^", "aaa"], TestRng::always());
        h.run(1, 1);
        assert_eq!(h.at(0, 0), Material::Acid);
        assert_eq!(h.at(0, 1), Material::Water);
        assert_eq!(h.at(0, 2), Material::Fire);
        assert_eq!(h.at(1, 0), Material::Smoke);
        assert_eq!(h.at(1, 2), Material::Steam);
    }

    #[test]
    fn test_acid_dissolve_probability() {
        // first neighbor draw passes, the rest fail
        let rng = TestRng::never().push_floats(&[0.05]);
        let mut h = RuleHarness::from_rows(&["SSS", "SaS", "SSS"], rng);
        h.run(1, 1);
        assert_eq!(h.at(0, 0), Material::Empty);
        assert_eq!(h.at(0, 1), Material::Stone);
        assert_eq!(h.at(2, 2), Material::Stone);
    }

    #[test]
    fn test_acid_moving_does_not_dissolve() {
        let mut h = RuleHarness::from_rows(&["MaM", "M.M"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(1, 1), Material::Acid);
        assert_eq!(h.at(0, 0), Material::Metal);
        assert_eq!(h.at(1, 0), Material::Metal);
    }

    #[test]
    fn test_lava_flows_down() {
        let mut h = RuleHarness::from_rows(&[".L.", "...", "###"], TestRng::always());
        h.run(0, 1);
        assert_eq!(h.at(1, 1), Material::Lava);
    }

    #[test]
    fn test_lava_quenched_by_water() {
        let mut h = RuleHarness::from_rows(&["###", "wL#", "###"], TestRng::always());
        h.run(1, 1);
        assert_eq!(h.at(1, 1), Material::Stone);
        assert_eq!(h.at(1, 0), Material::Steam);
        assert!(h.visited.is_visited(1, 1));
    }

    #[test]
    fn test_lava_ignites_combustibles() {
        let mut h = RuleHarness::from_rows(&["WoW", "#L#", "#p#"], TestRng::always());
        h.run(1, 1);
        assert_eq!(h.at(1, 1), Material::Lava);
        assert_eq!(h.at(0, 0), Material::Fire);
        assert_eq!(h.at(0, 1), Material::Fire);
        assert_eq!(h.at(0, 2), Material::Fire);
        assert_eq!(h.at(2, 1), Material::Fire);
        assert_eq!(h.at(1, 0), Material::Wall);
    }
}
