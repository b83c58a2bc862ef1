//! Project validation logic.

use gf_core::is_blank;

use crate::schema::{Project, SimulationParams};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing value: {field}")]
    Missing { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    require("name", &project.name)?;
    if project.name.contains(['/', '\\']) || project.name == "." || project.name == ".." {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: project.name.clone(),
            reason: "must be a plain directory name".to_string(),
        });
    }

    validate_params(&project.params)?;

    if project.materials.table.as_os_str().is_empty() {
        return Err(ValidationError::Missing {
            field: "materials.table".to_string(),
        });
    }

    Ok(())
}

fn validate_params(params: &SimulationParams) -> Result<(), ValidationError> {
    require("particle.name", &params.particle.name)?;
    require("particle.value", &params.particle.value)?;

    for (i, dim) in params.world.dimensions.iter().enumerate() {
        require(&format!("world.dimensions[{i}]"), dim)?;
    }
    require("world.material", &params.world.material)?;

    for (i, dim) in params.detector.dimensions.iter().enumerate() {
        require(&format!("detector.dimensions[{i}]"), dim)?;
    }
    require("detector.placement_z", &params.detector.placement_z)?;

    Ok(())
}

/// Non-blank and free of control characters; each value is one line of `<name>.txt`.
fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::Missing {
            field: field.to_string(),
        });
    }
    if value.chars().any(char::is_control) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.escape_debug().to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn project() -> Project {
        Project {
            version: LATEST_VERSION,
            name: "scintSim".to_string(),
            params: SimulationParams {
                pmt: false,
                particle: ParticleDef {
                    name: "e-".to_string(),
                    property: ParticleProperty::Momentum,
                    value: "2*GeV".to_string(),
                },
                world: WorldDef {
                    dimensions: ["1*m".into(), "1*m".into(), "1*m".into()],
                    material: "G4_AIR".to_string(),
                },
                detector: DetectorDef {
                    dimensions: ["10*cm".into(), "10*cm".into(), "1*cm".into()],
                    placement_z: "0.".to_string(),
                },
            },
            materials: MaterialSettings::default(),
        }
    }

    #[test]
    fn valid_project_passes() {
        validate_project(&project()).unwrap();
    }

    #[test]
    fn future_version_rejected() {
        let mut p = project();
        p.version = LATEST_VERSION + 1;
        assert_eq!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion {
                version: LATEST_VERSION + 1
            })
        );
    }

    #[test]
    fn nested_directory_name_rejected() {
        let mut p = project();
        p.name = "../escape".to_string();
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn control_characters_in_name_rejected() {
        for name in ["sim\nNo", "sim\tA", "sim\r"] {
            let mut p = project();
            p.name = name.to_string();
            assert!(matches!(
                validate_project(&p),
                Err(ValidationError::InvalidValue { .. })
            ));
        }
    }

    #[test]
    fn multiline_particle_value_rejected() {
        let mut p = project();
        p.params.particle.value = "2*GeV\nextra".to_string();
        assert_eq!(
            validate_project(&p),
            Err(ValidationError::InvalidValue {
                field: "particle.value".to_string(),
                value: "2*GeV\\nextra".to_string(),
                reason: "must not contain control characters".to_string(),
            })
        );
    }

    #[test]
    fn blank_dimension_reported_by_index() {
        let mut p = project();
        p.params.detector.dimensions[2] = " ".to_string();
        assert_eq!(
            validate_project(&p),
            Err(ValidationError::Missing {
                field: "detector.dimensions[2]".to_string()
            })
        );
    }

    #[test]
    fn blank_world_material_rejected() {
        let mut p = project();
        p.params.world.material.clear();
        assert!(validate_project(&p).is_err());
    }
}
