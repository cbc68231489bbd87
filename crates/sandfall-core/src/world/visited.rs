//! Per-step visited mask

/// Marks cells whose occupant was already resolved during the current step
#[derive(Clone, Debug)]
pub struct VisitedMask {
    rows: usize,
    cols: usize,
    visited: Vec<bool>,
}

impl VisitedMask {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            visited: vec![false; rows * cols],
        }
    }

    #[inline]
    fn index(&self, y: i32, x: i32) -> Option<usize> {
        if y < 0 || x < 0 || y as usize >= self.rows || x as usize >= self.cols {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    /// Clear every mark
    pub fn reset(&mut self) {
        self.visited.fill(false);
    }

    /// Mark a cell; positions outside the grid are ignored
    #[inline]
    pub fn mark(&mut self, y: i32, x: i32) {
        if let Some(i) = self.index(y, x) {
            self.visited[i] = true;
        }
    }

    #[inline]
    pub fn is_visited(&self, y: i32, x: i32) -> bool {
        self.index(y, x).is_some_and(|i| self.visited[i])
    }

    /// Number of marked cells
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }
}
