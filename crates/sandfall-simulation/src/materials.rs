//! Material definitions and registry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised when converting raw values into a [`Material`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterialError {
    #[error("Material id {0} is outside the material table")]
    InvalidMaterial(u8),
    #[error("Unknown material name: {0}")]
    UnknownName(String),
}

/// Built-in materials, one per cell.
///
/// The discriminant is the material id. The set is closed: a grid can only
/// ever hold one of these values, and raw ids must go through
/// [`Material::try_from`] to reach it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Material {
    #[default]
    Empty = 0,
    Wall = 1,
    Sand = 2,
    Water = 3,
    Oil = 4,
    Fire = 5,
    Smoke = 6,
    Wood = 7,
    Lava = 8,
    Stone = 9,
    Metal = 10,
    Ice = 11,
    Steam = 12,
    Acid = 13,
    Gas = 14,
    Gunpowder = 15,
    Explosion = 16,
}

impl Material {
    /// Number of materials in the table
    pub const COUNT: usize = 17;

    /// Every material, ordered by id
    pub const ALL: [Material; Self::COUNT] = [
        Material::Empty,
        Material::Wall,
        Material::Sand,
        Material::Water,
        Material::Oil,
        Material::Fire,
        Material::Smoke,
        Material::Wood,
        Material::Lava,
        Material::Stone,
        Material::Metal,
        Material::Ice,
        Material::Steam,
        Material::Acid,
        Material::Gas,
        Material::Gunpowder,
        Material::Explosion,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Material::Empty
    }

    /// Materials that turn into fire when touched by flame or an explosion
    pub fn is_combustible(self) -> bool {
        matches!(self, Material::Wood | Material::Oil | Material::Gunpowder)
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Material::Empty => "Empty",
            Material::Wall => "Wall",
            Material::Sand => "Sand",
            Material::Water => "Water",
            Material::Oil => "Oil",
            Material::Fire => "Fire",
            Material::Smoke => "Smoke",
            Material::Wood => "Wood",
            Material::Lava => "Lava",
            Material::Stone => "Stone",
            Material::Metal => "Metal",
            Material::Ice => "Ice",
            Material::Steam => "Steam",
            Material::Acid => "Acid",
            Material::Gas => "Gas",
            Material::Gunpowder => "Gunpowder",
            Material::Explosion => "Explosion",
        }
    }
}

impl TryFrom<u8> for Material {
    type Error = MaterialError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Material::ALL
            .get(id as usize)
            .copied()
            .ok_or(MaterialError::InvalidMaterial(id))
    }
}

impl From<Material> for u8 {
    fn from(material: Material) -> Self {
        material.id()
    }
}

impl FromStr for Material {
    type Err = MaterialError;

    /// Parses a display name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Material::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| MaterialError::UnknownName(trimmed.to_string()))
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a material behaves physically
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    /// Empty space, occupied by nothing
    Void,
    /// Doesn't move (wall, wood, stone, metal, ice)
    Solid,
    /// Falls, piles up (sand, gunpowder)
    Powder,
    /// Flows, seeks level (water, oil, lava, acid)
    Liquid,
    /// Rises, disperses (smoke, steam, gas)
    Gas,
    /// Short-lived reactive cells (fire, explosion)
    Energy,
}

/// Definition of a material's display properties
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDef {
    pub material: Material,
    pub name: String,
    pub material_type: MaterialType,

    /// Base color (RGBA)
    pub color: [u8; 4],
}

impl Default for MaterialDef {
    fn default() -> Self {
        Self {
            material: Material::Empty,
            name: "unknown".to_string(),
            material_type: MaterialType::Solid,
            color: [255, 0, 255, 255], // Magenta for missing materials
        }
    }
}

/// Registry of all materials, indexed by id
pub struct Materials {
    materials: Vec<MaterialDef>,
}

impl Materials {
    pub fn new() -> Self {
        let mut materials = Self {
            materials: vec![MaterialDef::default(); Material::COUNT],
        };
        materials.register_defaults();
        materials
    }

    fn register_defaults(&mut self) {
        use Material as M;
        use MaterialType as T;

        self.register(M::Empty, T::Void, [0, 0, 0, 255]);
        self.register(M::Wall, T::Solid, [100, 100, 100, 255]);
        self.register(M::Sand, T::Powder, [194, 178, 128, 255]);
        self.register(M::Water, T::Liquid, [60, 120, 200, 255]);
        self.register(M::Oil, T::Liquid, [40, 30, 30, 255]);
        self.register(M::Fire, T::Energy, [255, 120, 0, 255]);
        self.register(M::Smoke, T::Gas, [120, 120, 120, 255]);
        self.register(M::Wood, T::Solid, [120, 70, 20, 255]);
        self.register(M::Lava, T::Liquid, [255, 50, 0, 255]);
        self.register(M::Stone, T::Solid, [130, 130, 130, 255]);
        self.register(M::Metal, T::Solid, [180, 180, 200, 255]);
        self.register(M::Ice, T::Solid, [180, 220, 255, 255]);
        self.register(M::Steam, T::Gas, [200, 200, 255, 255]);
        self.register(M::Acid, T::Liquid, [0, 255, 0, 255]);
        self.register(M::Gas, T::Gas, [180, 250, 180, 255]);
        self.register(M::Gunpowder, T::Powder, [50, 50, 50, 255]);
        self.register(M::Explosion, T::Energy, [255, 255, 100, 255]);
    }

    fn register(&mut self, material: Material, material_type: MaterialType, color: [u8; 4]) {
        let slot = &mut self.materials[material.index()];
        if slot.material != Material::Empty {
            log::warn!("Material {} registered twice", material);
        }
        *slot = MaterialDef {
            material,
            name: material.name().to_string(),
            material_type,
            color,
        };
    }

    /// Get material definition
    pub fn get(&self, material: Material) -> &MaterialDef {
        &self.materials[material.index()]
    }

    /// Get material definition by raw id
    pub fn get_by_id(&self, id: u8) -> Result<&MaterialDef, MaterialError> {
        Material::try_from(id).map(|m| self.get(m))
    }

    /// Get color for a material
    pub fn get_color(&self, material: Material) -> [u8; 4] {
        self.get(material).color
    }

    /// Iterate definitions in id order
    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter()
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::new()
    }
}
