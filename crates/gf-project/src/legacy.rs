//! The nine-line `<name>.txt` parameter file.
//!
//! One value per line, in this order: directory name, PMTs (`Yes`/`No`),
//! particle, property (`Energy`/`Momentum`), value, world dimensions `x,y,z`,
//! world material, detector dimensions `x,y,z`, detector placement z.
//! The file is written next to the generated sources so the next session
//! starts from the last values used.

use std::path::Path;

use thiserror::Error;

use crate::ProjectResult;
use crate::schema::{
    DetectorDef, MaterialSettings, ParticleDef, ParticleProperty, Project, SimulationParams,
    WorldDef,
};
use crate::validate::LATEST_VERSION;

const FIELDS: [&str; 9] = [
    "directory name",
    "PMT flag",
    "particle",
    "particle property",
    "particle value",
    "world dimensions",
    "world material",
    "detector dimensions",
    "detector placement",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LegacyError {
    #[error("Missing line {line} ({field})")]
    MissingLine { line: usize, field: &'static str },

    #[error("{field} must be three comma-separated values, got '{value}'")]
    BadDimensions { field: &'static str, value: String },

    #[error("Unknown particle property '{value}' (expected Energy or Momentum)")]
    BadProperty { value: String },

    #[error("PMT flag must be Yes or No, got '{value}'")]
    BadFlag { value: String },
}

/// File name of the parameter file for a project directory called `name`.
pub fn params_file_name(name: &str) -> String {
    format!("{name}.txt")
}

pub fn parse_params_txt(text: &str) -> Result<Project, LegacyError> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let line = |i: usize| {
        lines.get(i).copied().ok_or(LegacyError::MissingLine {
            line: i + 1,
            field: FIELDS[i],
        })
    };

    let flag = line(1)?;
    let pmt = match flag.to_ascii_lowercase().as_str() {
        "yes" | "true" => true,
        "no" | "false" | "" => false,
        _ => {
            return Err(LegacyError::BadFlag {
                value: flag.to_string(),
            });
        }
    };
    let property_text = line(3)?;
    let property =
        ParticleProperty::parse(property_text).ok_or_else(|| LegacyError::BadProperty {
            value: property_text.to_string(),
        })?;

    Ok(Project {
        version: LATEST_VERSION,
        name: line(0)?.to_string(),
        params: SimulationParams {
            pmt,
            particle: ParticleDef {
                name: line(2)?.to_string(),
                property,
                value: line(4)?.to_string(),
            },
            world: WorldDef {
                dimensions: split_dimensions(line(5)?, FIELDS[5])?,
                material: line(6)?.to_string(),
            },
            detector: DetectorDef {
                dimensions: split_dimensions(line(7)?, FIELDS[7])?,
                placement_z: line(8)?.to_string(),
            },
        },
        materials: MaterialSettings::default(),
    })
}

pub fn render_params_txt(project: &Project) -> String {
    let p = &project.params;
    let fields = [
        project.name.clone(),
        if p.pmt { "Yes" } else { "No" }.to_string(),
        p.particle.name.clone(),
        p.particle.property.as_str().to_string(),
        p.particle.value.clone(),
        p.world.dimensions.join(","),
        p.world.material.clone(),
        p.detector.dimensions.join(","),
        p.detector.placement_z.clone(),
    ];
    let mut out = String::new();
    for field in fields {
        out.push_str(&field);
        out.push('\n');
    }
    out
}

pub fn load_params_txt(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_params_txt(&content)?)
}

fn split_dimensions(text: &str, field: &'static str) -> Result<[String; 3], LegacyError> {
    let parts: Vec<String> = text.split(',').map(|s| s.trim().to_string()).collect();
    <[String; 3]>::try_from(parts).map_err(|_| LegacyError::BadDimensions {
        field,
        value: text.to_string(),
    })
}
