//! Material rules - one update function per material
//!
//! A [`RuleTable`] maps every material id to a [`Rule`]. The stepper builds a
//! [`CellUpdate`] for each cell it dispatches and hands it to the rule of the
//! material currently in that cell. A rule must mark visited the cell its
//! material ends up in before returning, either through a successful
//! [`CellUpdate::move_to`] or through [`CellUpdate::settle`].

mod chemistry;
mod movement;

pub use chemistry::{
    update_explosion, update_fire, update_gas, update_ice, update_smoke, update_steam,
};
pub use movement::{
    update_acid, update_gunpowder, update_lava, update_liquid, update_oil, update_passive,
    update_powder,
};

use sandfall_simulation::Material;
use smallvec::SmallVec;

use crate::world::{Grid, SimRng, SimStats, TieBreak, VisitedMask};

/// Offsets of the 8 surrounding cells, (dy, dx)
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Update function for one material
pub type Rule<R> = fn(&mut CellUpdate<'_, R>);

/// Candidate orders shared across a step when [`TieBreak::PerStep`] is active
#[derive(Debug, Clone)]
pub struct TieBreakOrder {
    mode: TieBreak,
    pair: [usize; 2],
    quad: [usize; 4],
}

impl TieBreakOrder {
    pub fn new(mode: TieBreak) -> Self {
        Self {
            mode,
            pair: [0, 1],
            quad: [0, 1, 2, 3],
        }
    }

    pub fn mode(&self) -> TieBreak {
        self.mode
    }

    /// Draw this step's shared orders. Does nothing in per-cell mode.
    pub fn redraw<R: SimRng + ?Sized>(&mut self, rng: &mut R) {
        if self.mode == TieBreak::PerStep {
            self.pair = [0, 1];
            self.quad = [0, 1, 2, 3];
            rng.shuffle(&mut self.pair);
            rng.shuffle(&mut self.quad);
        }
    }

    /// Put candidates into the order they should be tried in
    pub fn arrange<R: SimRng + ?Sized, const N: usize>(
        &self,
        rng: &mut R,
        mut candidates: [(i32, i32); N],
    ) -> [(i32, i32); N] {
        let shared: Option<&[usize]> = match (self.mode, N) {
            (TieBreak::PerStep, 2) => Some(&self.pair),
            (TieBreak::PerStep, 4) => Some(&self.quad),
            _ => None,
        };
        match shared {
            Some(order) => std::array::from_fn(|i| candidates[order[i]]),
            None => {
                rng.shuffle(&mut candidates);
                candidates
            }
        }
    }
}

/// Everything a rule may touch while resolving the cell at (y, x)
pub struct CellUpdate<'a, R: SimRng> {
    pub y: i32,
    pub x: i32,
    pub grid: &'a mut Grid,
    pub visited: &'a mut VisitedMask,
    pub rng: &'a mut R,
    pub order: &'a TieBreakOrder,
    pub stats: &'a mut dyn SimStats,
}

impl<R: SimRng> CellUpdate<'_, R> {
    /// Material currently at the cell being resolved
    #[inline]
    pub fn material(&self) -> Material {
        self.grid.material_at(self.y, self.x).unwrap_or_default()
    }

    /// Material at an offset from this cell, `None` outside the grid
    #[inline]
    pub fn probe(&self, dy: i32, dx: i32) -> Option<Material> {
        self.grid.material_at(self.y + dy, self.x + dx)
    }

    /// One uniform draw compared against `probability`
    #[inline]
    pub fn chance(&mut self, probability: f32) -> bool {
        self.rng.check_probability(probability)
    }

    /// Try to move this cell's occupant by (dy, dx); marks the destination visited
    pub fn move_to(&mut self, dy: i32, dx: i32) -> bool {
        let (ny, nx) = (self.y + dy, self.x + dx);
        if self.grid.try_move(self.y, self.x, ny, nx) {
            self.visited.mark(ny, nx);
            self.stats.record_cell_moved();
            true
        } else {
            false
        }
    }

    /// Try candidate offsets in tie-break order until one move succeeds
    pub fn move_first<const N: usize>(&mut self, candidates: [(i32, i32); N]) -> bool {
        let ordered = self.order.arrange(&mut *self.rng, candidates);
        ordered.into_iter().any(|(dy, dx)| self.move_to(dy, dx))
    }

    /// The occupant stays put this step
    #[inline]
    pub fn settle(&mut self) {
        self.visited.mark(self.y, self.x);
    }

    /// Replace this cell's material and settle
    pub fn transform(&mut self, material: Material) {
        self.grid.replace(self.y, self.x, material);
        self.stats.record_state_change();
        self.settle();
    }

    /// Overwrite the cell at an offset; no effect outside the grid
    pub fn set_at(&mut self, dy: i32, dx: i32, material: Material) {
        if self
            .grid
            .replace(self.y + dy, self.x + dx, material)
            .is_some()
        {
            self.stats.record_reaction();
        }
    }

    /// In-bounds 8-neighbors as `(dy, dx, material)`
    pub fn neighbors(&self) -> SmallVec<[(i32, i32, Material); 8]> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dy, dx)| self.probe(dy, dx).map(|m| (dy, dx, m)))
            .collect()
    }

    /// Whether any 8-neighbor satisfies `predicate`
    pub fn any_neighbor(&self, predicate: impl Fn(Material) -> bool) -> bool {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dy, dx)| self.probe(dy, dx))
            .any(predicate)
    }
}

/// Rule lookup table, indexed by material id
pub struct RuleTable<R: SimRng> {
    rules: [Rule<R>; Material::COUNT],
}

impl<R: SimRng> RuleTable<R> {
    /// Table with the built-in rule for every material
    pub fn new() -> Self {
        let mut table = Self {
            rules: [update_passive::<R> as Rule<R>; Material::COUNT],
        };
        table.register_defaults();
        table
    }

    fn register_defaults(&mut self) {
        self.register(Material::Sand, update_powder);
        self.register(Material::Gunpowder, update_gunpowder);
        self.register(Material::Water, update_liquid);
        self.register(Material::Acid, update_acid);
        self.register(Material::Oil, update_oil);
        self.register(Material::Lava, update_lava);
        self.register(Material::Fire, update_fire);
        self.register(Material::Smoke, update_smoke);
        self.register(Material::Gas, update_gas);
        self.register(Material::Steam, update_steam);
        self.register(Material::Ice, update_ice);
        self.register(Material::Explosion, update_explosion);
    }

    /// Replace the rule for `material`
    pub fn register(&mut self, material: Material, rule: Rule<R>) {
        self.rules[material.index()] = rule;
    }

    pub fn get(&self, material: Material) -> Rule<R> {
        self.rules[material.index()]
    }

    /// Run the rule of the material currently in the cell
    pub fn dispatch(&self, cell: &mut CellUpdate<'_, R>) {
        (self.get(cell.material()))(cell)
    }
}

impl<R: SimRng> Default for RuleTable<R> {
    fn default() -> Self {
        Self::new()
    }
}
