//! Material node data structures.

use gf_core::{NodeId, is_blank};
use serde::{Deserialize, Serialize};

use crate::store::MaterialRow;

/// Whether a node is a compound material or a periodic-table element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Has a density; constructed as a new material.
    Material,
    /// No density; looked up in the NIST element table.
    Element,
}

impl MaterialKind {
    pub fn label(self) -> &'static str {
        match self {
            MaterialKind::Material => "material",
            MaterialKind::Element => "element",
        }
    }
}

/// The user-supplied part of a node, before it is placed in a graph.
///
/// Density and ratio are kept as entered so emitted code reproduces them
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialDef {
    pub name: String,
    pub density: Option<String>,
    pub ratio: String,
}

impl MaterialDef {
    pub fn material(
        name: impl Into<String>,
        density: impl Into<String>,
        ratio: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            density: Some(density.into()),
            ratio: ratio.into(),
        }
    }

    pub fn element(name: impl Into<String>, ratio: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            density: None,
            ratio: ratio.into(),
        }
    }

    /// Convert a table row; a blank density field marks an element.
    pub fn from_row(row: &MaterialRow) -> Self {
        Self {
            name: row.name.clone(),
            density: (!is_blank(&row.density)).then(|| row.density.clone()),
            ratio: row.ratio.clone(),
        }
    }
}

/// A node registered in a `CompositionGraph`.
///
/// Parent and children are IDs into the owning graph; the graph keeps both
/// sides of every link consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialNode {
    pub id: NodeId,
    pub name: String,
    pub density: Option<String>,
    pub ratio: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl MaterialNode {
    pub(crate) fn new(id: NodeId, def: MaterialDef) -> Self {
        Self {
            id,
            name: def.name,
            density: def.density,
            ratio: def.ratio,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> MaterialKind {
        if self.density.is_some() {
            MaterialKind::Material
        } else {
            MaterialKind::Element
        }
    }

    pub fn is_material(&self) -> bool {
        self.kind() == MaterialKind::Material
    }

    pub fn is_element(&self) -> bool {
        self.kind() == MaterialKind::Element
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in the order their rows were linked.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_density_is_element() {
        let def = MaterialDef::from_row(&MaterialRow::new("O", "  ", "1", "H2O"));
        assert_eq!(def.density, None);

        let def = MaterialDef::from_row(&MaterialRow::new("H2O", "1.0", "1", ""));
        assert_eq!(def.density.as_deref(), Some("1.0"));
    }

    #[test]
    fn kind_follows_density() {
        let id = NodeId::from_index(0).unwrap();
        let node = MaterialNode::new(id, MaterialDef::material("Glass", "2.5", "1"));
        assert!(node.is_material());
        assert!(node.is_root());

        let node = MaterialNode::new(id, MaterialDef::element("Si", "1"));
        assert_eq!(node.kind(), MaterialKind::Element);
        assert!(node.children().is_empty());
    }
}
