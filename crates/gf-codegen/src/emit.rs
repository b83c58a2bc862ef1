//! Material block and source file emission.

use std::fmt::Write as _;

use gf_materials::{BuildOrder, MaterialNode};
use gf_project::SimulationParams;
use tracing::debug;

use crate::error::{CodegenError, CodegenResult};
use crate::templates::{
    CONSTRUCTION_CC, CONSTRUCTION_HH, GENERATOR_CC, PMT_BLOCK, RESERVED_NAMES, render,
};

/// Statements for `DefineMaterials()` plus the pointers the header must declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialBlock {
    pub definitions: String,
    /// Material variable names in construction order.
    pub declared: Vec<String>,
    /// Name of the root material, used for the detector volume.
    pub detector_material: String,
}

/// The three generated source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    pub construction_cc: String,
    pub construction_hh: String,
    pub generator_cc: String,
}

impl GeneratedSources {
    /// `(file name, contents)` pairs in the order they should be written.
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            ("generator.cc", self.generator_cc.as_str()),
            ("construction.cc", self.construction_cc.as_str()),
            ("construction.hh", self.construction_hh.as_str()),
        ]
    }
}

/// Emit one constructor statement per node, walking `order` front to back.
///
/// Materials become `new G4Material(...)` sized by their child count and are
/// added to their parent; elements are fetched from the NIST table and added
/// to their parent. Elements must be leaves.
pub fn material_block(order: &BuildOrder<'_>) -> CodegenResult<MaterialBlock> {
    let root = order.root();
    if !root.is_material() {
        return Err(CodegenError::RootIsElement {
            name: root.name.clone(),
        });
    }

    let mut definitions = String::new();
    let mut declared = Vec::new();
    for node in order.iter() {
        let parent = order.parent(node);
        match &node.density {
            Some(density) => {
                check_identifier(node)?;
                let _ = writeln!(
                    definitions,
                    "    {name} = new G4Material(\"{name}\", {density}*g/cm3, {count});",
                    name = node.name,
                    count = node.children().len(),
                );
                if let Some(parent) = parent {
                    let _ = writeln!(
                        definitions,
                        "    {} -> AddMaterial({}, {});",
                        parent.name, node.name, node.ratio
                    );
                }
                declared.push(node.name.clone());
            }
            None => {
                if !node.children().is_empty() {
                    return Err(CodegenError::ElementHasChildren {
                        name: node.name.clone(),
                    });
                }
                let parent = parent.ok_or_else(|| CodegenError::OrphanElement {
                    name: node.name.clone(),
                })?;
                let _ = writeln!(
                    definitions,
                    "    {} -> AddElement(nist -> FindOrBuildElement(\"{}\"), {});",
                    parent.name, node.name, node.ratio
                );
            }
        }
    }

    debug!(
        materials = declared.len(),
        nodes = order.len(),
        "emitted material definitions"
    );
    Ok(MaterialBlock {
        definitions,
        declared,
        detector_material: root.name.clone(),
    })
}

/// Render all three source files.
pub fn generate_sources(
    params: &SimulationParams,
    order: &BuildOrder<'_>,
) -> CodegenResult<GeneratedSources> {
    let block = material_block(order)?;

    let [x_world, y_world, z_world] = &params.world.dimensions;
    let [x_det, y_det, z_det] = &params.detector.dimensions;
    let (pmt_block, sensitive) = if params.pmt {
        (PMT_BLOCK, "logicPMT")
    } else {
        ("", "logicDetector")
    };
    let definitions = block.definitions.trim_end_matches('\n');

    let construction_cc = render(
        CONSTRUCTION_CC,
        &[
            ("WORLD_MATERIAL", params.world.material.as_str()),
            ("MATERIALS", definitions),
            ("X_WORLD", x_world.as_str()),
            ("Y_WORLD", y_world.as_str()),
            ("Z_WORLD", z_world.as_str()),
            ("X_DET", x_det.as_str()),
            ("Y_DET", y_det.as_str()),
            ("Z_DET", z_det.as_str()),
            ("Z_PLACEMENT", params.detector.placement_z.as_str()),
            ("DETECTOR_MATERIAL", block.detector_material.as_str()),
            ("PMT_BLOCK", pmt_block),
            ("SENSITIVE_VOLUME", sensitive),
        ],
    )?;

    let declarations = block
        .declared
        .iter()
        .map(|name| format!("*{name}"))
        .collect::<Vec<_>>()
        .join(", ");
    let construction_hh = render(
        CONSTRUCTION_HH,
        &[("MATERIAL_DECLARATIONS", declarations.as_str())],
    )?;

    let generator_cc = render(
        GENERATOR_CC,
        &[
            ("PARTICLE", params.particle.name.as_str()),
            ("PARTICLE_PROPERTY", params.particle.property.as_str()),
            ("PARTICLE_VALUE", params.particle.value.as_str()),
        ],
    )?;

    Ok(GeneratedSources {
        construction_cc,
        construction_hh,
        generator_cc,
    })
}

fn check_identifier(node: &MaterialNode) -> CodegenResult<()> {
    let name = node.name.as_str();
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(CodegenError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(CodegenError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}
