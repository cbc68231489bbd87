//! Construction-time simulation configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How random tie-break orders are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// Every rule invocation shuffles its candidate targets afresh
    #[default]
    PerCell,
    /// One order per candidate-list length is drawn at the start of a step
    /// and shared by every cell in that step
    PerStep,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions must be non-zero (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("Grid dimensions {rows}x{cols} exceed the addressable coordinate range")]
    TooLarge { rows: usize, cols: usize },
}

/// Simulation configuration, fixed for the lifetime of a simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid height in cells
    pub rows: usize,
    /// Grid width in cells
    pub cols: usize,
    /// RNG seed (None = seeded from entropy)
    pub seed: Option<u64>,
    /// Tie-break draw policy
    pub tie_break: TieBreak,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: 140,
            cols: 200,
            seed: None,
            tie_break: TieBreak::PerCell,
        }
    }
}

impl SimConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let limit = i32::MAX as usize;
        if self.rows > limit || self.cols > limit || self.rows.checked_mul(self.cols).is_none() {
            return Err(ConfigError::TooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Parse config from RON text
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).context("Failed to parse RON simulation config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_ron_str(&content)
            .with_context(|| format!("Invalid simulation config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_grid() {
        let config = SimConfig::default();
        assert_eq!((config.rows, config.cols), (140, 200));
        assert_eq!(config.tie_break, TieBreak::PerCell);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            SimConfig::new(0, 10).validate(),
            Err(ConfigError::InvalidDimensions { rows: 0, cols: 10 })
        );
        assert!(SimConfig::new(10, 0).validate().is_err());
    }

    #[test]
    fn test_oversized_rejected() {
        let config = SimConfig::new(i32::MAX as usize + 1, 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_from_ron_partial() {
        let config = SimConfig::from_ron_str("(rows: 10, cols: 12, seed: Some(7))").unwrap();
        assert_eq!(config.rows, 10);
        assert_eq!(config.cols, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tie_break, TieBreak::PerCell);
    }

    #[test]
    fn test_from_ron_tie_break() {
        let config = SimConfig::from_ron_str("(rows: 4, cols: 4, tie_break: PerStep)").unwrap();
        assert_eq!(config.tie_break, TieBreak::PerStep);
    }

    #[test]
    fn test_from_ron_invalid_dimensions() {
        assert!(SimConfig::from_ron_str("(rows: 0, cols: 4)").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.ron");
        std::fs::write(&path, "(rows: 20, cols: 30, tie_break: PerStep)").unwrap();

        let config = SimConfig::from_file(&path).unwrap();
        assert_eq!(config, SimConfig::new(20, 30).with_tie_break(TieBreak::PerStep));

        assert!(SimConfig::from_file(dir.path().join("missing.ron")).is_err());
    }
}
