//! Verification conditions and state checks for scenarios

use sandfall_core::Grid;
use sandfall_simulation::Material;
use serde::{Deserialize, Serialize};

/// Conditions that can be verified against the grid. Coordinates are column
/// `x`, row `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VerificationCondition {
    // === MATERIAL CHECKS ===
    /// Assert material count over the whole grid
    MaterialCount {
        material: Material,
        expected: usize,
        #[serde(default)]
        tolerance: Option<usize>, // Allow ±N variance
    },

    /// Assert material at a specific cell; out-of-grid reads as EMPTY
    MaterialAt { x: i32, y: i32, expected: Material },

    /// Assert every cell in an inclusive rectangle is EMPTY
    RegionEmpty {
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    },

    /// Assert number of non-empty cells
    NonEmptyCount {
        expected: usize,
        #[serde(default)]
        tolerance: Option<usize>,
    },

    // === LOGICAL OPERATORS ===
    /// All conditions must pass
    All {
        conditions: Vec<VerificationCondition>,
    },

    /// Any condition must pass
    Any {
        conditions: Vec<VerificationCondition>,
    },

    /// Condition must NOT pass
    Not {
        condition: Box<VerificationCondition>,
    },
}

/// Result of a verification check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
    pub actual_value: Option<String>, // For debugging
}

fn within(actual: usize, expected: usize, tolerance: usize) -> bool {
    actual >= expected.saturating_sub(tolerance) && actual <= expected.saturating_add(tolerance)
}

impl VerificationCondition {
    /// Evaluate condition against grid state
    pub fn evaluate(&self, grid: &Grid) -> VerificationResult {
        match self {
            VerificationCondition::MaterialCount {
                material,
                expected,
                tolerance,
            } => {
                let actual = grid.count(*material);
                let tol = tolerance.unwrap_or(0);

                VerificationResult {
                    passed: within(actual, *expected, tol),
                    message: format!(
                        "{} count: expected {}±{}, got {}",
                        material, expected, tol, actual
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::MaterialAt { x, y, expected } => {
                let actual = grid.material_at(*y, *x).unwrap_or_default();

                VerificationResult {
                    passed: actual == *expected,
                    message: format!(
                        "Material at ({}, {}): expected {}, got {}",
                        x, y, expected, actual
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::RegionEmpty {
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                let mut total = 0;
                let mut occupied = 0;
                for y in *min_y..=*max_y {
                    for x in *min_x..=*max_x {
                        if let Some(m) = grid.material_at(y, x) {
                            total += 1;
                            if !m.is_empty() {
                                occupied += 1;
                            }
                        }
                    }
                }

                VerificationResult {
                    passed: occupied == 0,
                    message: format!(
                        "Region ({},{})-({},{}) empty: {} occupied / {} cells",
                        min_x, min_y, max_x, max_y, occupied, total
                    ),
                    actual_value: Some(format!("{}/{}", occupied, total)),
                }
            }

            VerificationCondition::NonEmptyCount {
                expected,
                tolerance,
            } => {
                let actual = grid.non_empty_count();
                let tol = tolerance.unwrap_or(0);

                VerificationResult {
                    passed: within(actual, *expected, tol),
                    message: format!(
                        "Non-empty cells: expected {}±{}, got {}",
                        expected, tol, actual
                    ),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::All { conditions } => {
                let results: Vec<_> = conditions.iter().map(|c| c.evaluate(grid)).collect();
                let failed: Vec<_> = results.iter().filter(|r| !r.passed).collect();

                VerificationResult {
                    passed: failed.is_empty(),
                    message: format!(
                        "All of {} conditions: {} failed{}",
                        results.len(),
                        failed.len(),
                        failed
                            .iter()
                            .map(|r| format!("\n    - {}", r.message))
                            .collect::<String>()
                    ),
                    actual_value: None,
                }
            }

            VerificationCondition::Any { conditions } => {
                let passed_count = conditions
                    .iter()
                    .filter(|c| c.evaluate(grid).passed)
                    .count();

                VerificationResult {
                    passed: passed_count > 0,
                    message: format!(
                        "Any of {} conditions: {} passed",
                        conditions.len(),
                        passed_count
                    ),
                    actual_value: Some(passed_count.to_string()),
                }
            }

            VerificationCondition::Not { condition } => {
                let inner = condition.evaluate(grid);

                VerificationResult {
                    passed: !inner.passed,
                    message: format!("NOT ({})", inner.message),
                    actual_value: inner.actual_value,
                }
            }
        }
    }
}
