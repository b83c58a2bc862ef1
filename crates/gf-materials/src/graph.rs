//! Incremental composition graph.

use std::collections::HashMap;

use gf_core::{NodeId, is_blank};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GraphError, GraphResult};
use crate::node::{MaterialDef, MaterialNode};
use crate::store::{MaterialRow, MaterialStore};

/// What `add_node` does when a name is already registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Last write wins, silently.
    #[default]
    Overwrite,
    /// Last write wins, with a warning in the log.
    Warn,
    /// Return `GraphError::DuplicateName`.
    Reject,
}

/// Material composition graph.
///
/// Nodes are registered by name with `add_node` and linked to their parent
/// with `add_edge`. A parent may be referenced before it is registered; such
/// links wait in a pending table until the parent's own `add_edge` call.
///
/// Nodes live in an arena in first-registration order. Parent and children
/// are arena IDs, and both sides of a link are always updated together.
#[derive(Debug, Clone, Default)]
pub struct CompositionGraph {
    nodes: Vec<MaterialNode>,
    index: HashMap<String, NodeId>,
    /// Children waiting for a parent name that is not registered yet.
    pending: HashMap<String, Vec<NodeId>>,
    policy: DuplicatePolicy,
}

impl CompositionGraph {
    /// Create an empty graph with the given duplicate-name policy.
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Build a graph from table rows, in table order.
    pub fn from_rows<'a>(
        rows: impl IntoIterator<Item = &'a MaterialRow>,
        policy: DuplicatePolicy,
    ) -> GraphResult<Self> {
        let mut graph = Self::new(policy);
        for row in rows {
            graph.add_row(row)?;
        }
        Ok(graph)
    }

    /// Build a graph from every row currently held by `store`.
    pub fn from_store(store: &dyn MaterialStore, policy: DuplicatePolicy) -> GraphResult<Self> {
        let rows = store.read_all()?;
        Self::from_rows(&rows, policy)
    }

    /// Register a row's node and link it to its parent.
    pub fn add_row(&mut self, row: &MaterialRow) -> GraphResult<NodeId> {
        let id = self.add_node(MaterialDef::from_row(row))?;
        self.add_edge(&row.parent, &row.name)?;
        Ok(id)
    }

    /// Register a node by name.
    ///
    /// Re-registering a name keeps the node's ID and children, replaces its
    /// density and ratio, and detaches it from its previous parent so the new
    /// definition can declare its own.
    pub fn add_node(&mut self, def: MaterialDef) -> GraphResult<NodeId> {
        if let Some(&id) = self.index.get(&def.name) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(GraphError::DuplicateName { name: def.name });
                }
                DuplicatePolicy::Warn => {
                    warn!(name = %def.name, "material redefined; keeping the last definition");
                }
                DuplicatePolicy::Overwrite => {}
            }
            self.detach(id);
            for waiting in self.pending.values_mut() {
                waiting.retain(|&child| child != id);
            }
            self.pending.retain(|_, waiting| !waiting.is_empty());

            let node = &mut self.nodes[id.slot()];
            node.density = def.density;
            node.ratio = def.ratio;
            return Ok(id);
        }

        let id = NodeId::from_usize(self.nodes.len()).ok_or(GraphError::Capacity {
            count: self.nodes.len(),
        })?;
        self.index.insert(def.name.clone(), id);
        self.nodes.push(MaterialNode::new(id, def));
        Ok(id)
    }

    /// Link `child_name` under `parent_name`.
    ///
    /// - blank parent: no link is made
    /// - registered parent: linked immediately
    /// - unknown parent: the child waits in the pending table under that name
    ///
    /// Afterwards, any children waiting on `child_name` are attached to it.
    /// The child must already be registered unless the parent is blank.
    pub fn add_edge(&mut self, parent_name: &str, child_name: &str) -> GraphResult<()> {
        let child = self.index.get(child_name).copied();

        if !is_blank(parent_name) {
            let child = child.ok_or_else(|| GraphError::UnknownNode {
                name: child_name.to_string(),
            })?;
            match self.index.get(parent_name).copied() {
                Some(parent) => self.attach(parent, child),
                None => {
                    debug!(
                        parent = parent_name,
                        child = child_name,
                        "parent not defined yet; holding link"
                    );
                    self.pending
                        .entry(parent_name.to_string())
                        .or_default()
                        .push(child);
                }
            }
        }

        if let Some(child) = child {
            self.resolve_pending(child_name, child);
        }
        Ok(())
    }

    /// Attach every child waiting on `name` to `parent`, then forget them.
    fn resolve_pending(&mut self, name: &str, parent: NodeId) {
        if let Some(waiting) = self.pending.remove(name) {
            debug!(parent = name, count = waiting.len(), "resolving held links");
            for child in waiting {
                self.attach(parent, child);
            }
        }
    }

    /// Wire `child` under `parent`, moving it away from any previous parent.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[child.slot()].parent == Some(parent) {
            return;
        }
        self.detach(child);
        self.nodes[parent.slot()].children.push(child);
        self.nodes[child.slot()].parent = Some(parent);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old) = self.nodes[child.slot()].parent.take() {
            self.nodes[old.slot()].children.retain(|&c| c != child);
        }
    }

    /// All nodes in first-registration order.
    pub fn nodes(&self) -> &[MaterialNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn node(&self, id: NodeId) -> Option<&MaterialNode> {
        self.nodes.get(id.slot())
    }

    pub fn node_by_name(&self, name: &str) -> Option<&MaterialNode> {
        self.index.get(name).and_then(|&id| self.node(id))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Resolved parent of `node`, if any.
    pub fn parent_of(&self, node: &MaterialNode) -> Option<&MaterialNode> {
        node.parent.and_then(|id| self.node(id))
    }

    /// Children of `node` in link order.
    pub fn children_of<'a>(
        &'a self,
        node: &'a MaterialNode,
    ) -> impl Iterator<Item = &'a MaterialNode> + 'a {
        node.children.iter().filter_map(|&id| self.node(id))
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &MaterialNode> {
        self.nodes.iter().filter(|n| n.is_root())
    }

    /// Parent names that were referenced but never defined, sorted.
    pub fn missing_parents(&self) -> Vec<String> {
        let mut names: Vec<String> = self.pending.keys().cloned().collect();
        names.sort();
        names
    }
}
