//! Project schema definitions.

use std::path::PathBuf;

use gf_materials::DuplicatePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    /// Name of the generated project directory.
    pub name: String,
    pub params: SimulationParams,
    #[serde(default)]
    pub materials: MaterialSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationParams {
    /// Place a photomultiplier array behind the detector.
    #[serde(default)]
    pub pmt: bool,
    pub particle: ParticleDef,
    pub world: WorldDef,
    pub detector: DetectorDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticleDef {
    /// Geant4 particle table name, e.g. `proton` or `e-`.
    pub name: String,
    pub property: ParticleProperty,
    /// Value with units as Geant4 C++ text, e.g. `10*MeV`.
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParticleProperty {
    Energy,
    Momentum,
}

impl ParticleProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            ParticleProperty::Energy => "Energy",
            ParticleProperty::Momentum => "Momentum",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "Energy" => Some(ParticleProperty::Energy),
            "Momentum" => Some(ParticleProperty::Momentum),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldDef {
    /// Full box extents `[x, y, z]` as C++ expressions.
    pub dimensions: [String; 3],
    /// NIST material name, e.g. `G4_AIR`.
    pub material: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectorDef {
    pub dimensions: [String; 3],
    /// Z offset of the detector inside the world volume.
    pub placement_z: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialSettings {
    /// Material table, relative to the project file.
    #[serde(default = "default_table_path")]
    pub table: PathBuf,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            table: default_table_path(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

fn default_table_path() -> PathBuf {
    PathBuf::from("mat.csv")
}
