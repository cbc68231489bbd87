//! Simulator - owns the grid and drives one step at a time

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use sandfall_simulation::{Material, MaterialError, Materials};

use super::{ConfigError, Grid, GridError, NoopStats, SimConfig, SimRng, SimStats, VisitedMask};
use crate::paint::{Tool, draw_circle};
use crate::rules::{CellUpdate, RuleTable, TieBreakOrder};

/// The falling-sand world: grid, rules and the random source they share
pub struct Simulator<R: SimRng = Xoshiro256StarStar> {
    config: SimConfig,
    grid: Grid,
    visited: VisitedMask,
    rules: RuleTable<R>,
    rng: R,
    order: TieBreakOrder,
    materials: Materials,
    step_count: u64,
}

impl Simulator {
    /// Create an empty world; seeds from entropy when `config.seed` is `None`
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let rng = Xoshiro256StarStar::seed_from_u64(seed);
        let sim = Self::with_rng(config, rng)?;
        log::debug!(
            "Simulator created: {}x{} grid, seed {}",
            sim.config.rows,
            sim.config.cols,
            seed
        );
        Ok(sim)
    }

    /// Create a reproducible world
    pub fn with_seed(rows: usize, cols: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::new(SimConfig::new(rows, cols).with_seed(seed))
    }
}

impl<R: SimRng> Simulator<R> {
    /// Create an empty world driven by a caller-supplied random source.
    /// `config.seed` is ignored.
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            grid: Grid::new(config.rows, config.cols),
            visited: VisitedMask::new(config.rows, config.cols),
            rules: RuleTable::new(),
            rng,
            order: TieBreakOrder::new(config.tie_break),
            materials: Materials::new(),
            step_count: 0,
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Read-only view for renderers and tests
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules_mut(&mut self) -> &mut RuleTable<R> {
        &mut self.rules
    }

    /// Number of completed steps
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Advance the world by one step
    pub fn step(&mut self) {
        self.step_with_stats(&mut NoopStats);
    }

    /// Advance the world by one step, reporting events to `stats`
    pub fn step_with_stats(&mut self, stats: &mut dyn SimStats) {
        self.visited.reset();
        self.order.redraw(&mut self.rng);

        let rows = self.grid.rows() as i32;
        let cols = self.grid.cols() as i32;

        // Bottom to top so falling material is never overtaken in the same step
        for y in (0..rows).rev() {
            let reverse = self.rng.check_probability(0.5);
            for i in 0..cols {
                let x = if reverse { cols - 1 - i } else { i };
                if self.visited.is_visited(y, x) {
                    continue;
                }

                stats.record_dispatch(y, x);
                let mut cell = CellUpdate {
                    y,
                    x,
                    grid: &mut self.grid,
                    visited: &mut self.visited,
                    rng: &mut self.rng,
                    order: &self.order,
                    stats: &mut *stats,
                };
                self.rules.dispatch(&mut cell);
            }
        }

        self.step_count += 1;
        log::trace!(
            "Step {} done: {} non-empty cells",
            self.step_count,
            self.grid.non_empty_count()
        );
    }

    /// Run `steps` steps back to back
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Fill a disc of `material` centered on column `cx`, row `cy`.
    /// Returns the number of cells written; out-of-grid cells are skipped.
    pub fn paint_circle(&mut self, cx: i32, cy: i32, radius: u32, material: Material) -> usize {
        let written = draw_circle(&mut self.grid, cx, cy, radius, material);
        log::debug!(
            "Painted {} at ({}, {}) r={}: {} cells",
            material,
            cx,
            cy,
            radius,
            written
        );
        written
    }

    /// Apply a drawing tool at column `x`, row `y`
    pub fn apply_tool(&mut self, tool: &dyn Tool, x: i32, y: i32, brush_size: u32) -> usize {
        tool.apply(&mut self.grid, x, y, brush_size)
    }

    /// Set every cell to EMPTY
    pub fn clear_grid(&mut self) {
        self.grid.clear();
        log::debug!("Grid cleared");
    }

    pub fn get_cell(&self, y: i32, x: i32) -> Result<Material, GridError> {
        self.grid.get(y, x)
    }

    pub fn material_name(&self, id: u8) -> Result<&'static str, MaterialError> {
        Material::try_from(id).map(Material::name)
    }

    pub fn material_color(&self, id: u8) -> Result<[u8; 4], MaterialError> {
        self.materials.get_by_id(id).map(|def| def.color)
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }
}
