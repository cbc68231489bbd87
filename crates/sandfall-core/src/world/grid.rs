//! Grid - dense row-major buffer of materials

use sandfall_simulation::Material;

/// Errors from bounds-checked grid access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Cell ({y}, {x}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        y: i32,
        x: i32,
        rows: usize,
        cols: usize,
    },
}

/// Fixed-size grid of cells, one material per cell
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,

    /// Cell data, row-major order
    /// Index = y * cols + x
    cells: Vec<Material>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Material::Empty; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, y: i32, x: i32) -> Option<usize> {
        if y < 0 || x < 0 {
            return None;
        }
        let (y, x) = (y as usize, x as usize);
        if y >= self.rows || x >= self.cols {
            return None;
        }
        Some(y * self.cols + x)
    }

    fn out_of_range(&self, y: i32, x: i32) -> GridError {
        GridError::OutOfRange {
            y,
            x,
            rows: self.rows,
            cols: self.cols,
        }
    }

    #[inline]
    pub fn in_bounds(&self, y: i32, x: i32) -> bool {
        self.index(y, x).is_some()
    }

    /// Get material at (row, column)
    pub fn get(&self, y: i32, x: i32) -> Result<Material, GridError> {
        self.material_at(y, x).ok_or_else(|| self.out_of_range(y, x))
    }

    /// Probe form of [`Grid::get`]: `None` outside the grid
    #[inline]
    pub fn material_at(&self, y: i32, x: i32) -> Option<Material> {
        self.index(y, x).map(|i| self.cells[i])
    }

    /// Overwrite a cell unconditionally
    pub fn set(&mut self, y: i32, x: i32, material: Material) -> Result<(), GridError> {
        self.replace(y, x, material)
            .map(|_| ())
            .ok_or_else(|| self.out_of_range(y, x))
    }

    /// Overwrite a cell and return what it held, `None` outside the grid
    #[inline]
    pub fn replace(&mut self, y: i32, x: i32, material: Material) -> Option<Material> {
        let i = self.index(y, x)?;
        Some(std::mem::replace(&mut self.cells[i], material))
    }

    /// Move the occupant of (y, x) into (ny, nx).
    ///
    /// Succeeds only when both cells are inside the grid and the target is
    /// empty; the source is left empty. Returns false without touching the
    /// grid otherwise.
    pub fn try_move(&mut self, y: i32, x: i32, ny: i32, nx: i32) -> bool {
        let (Some(from), Some(to)) = (self.index(y, x), self.index(ny, nx)) else {
            return false;
        };
        if from == to || !self.cells[to].is_empty() {
            return false;
        }
        self.cells.swap(from, to);
        true
    }

    /// Set every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Material::Empty);
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Material] {
        &self.cells
    }

    /// Iterate `(row, column, material)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Material)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &m)| (i / cols, i % cols, m))
    }

    /// Number of cells holding `material`
    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|&&m| m == material).count()
    }

    /// Cell count per material, indexed by material id
    pub fn census(&self) -> [usize; Material::COUNT] {
        let mut counts = [0; Material::COUNT];
        for m in &self.cells {
            counts[m.index()] += 1;
        }
        counts
    }

    /// Number of cells holding anything but empty
    pub fn non_empty_count(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_empty()).count()
    }
}
