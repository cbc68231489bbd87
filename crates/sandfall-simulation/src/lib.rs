//! Material data for Sandfall
//!
//! This crate provides the foundational data types for the simulation:
//! - The closed material set (Material, MaterialError)
//! - Display data and coarse categories (MaterialDef, MaterialType, Materials)

mod materials;

pub use materials::{Material, MaterialDef, MaterialError, MaterialType, Materials};
