//! Dependency order resolution.
//!
//! A build order lists every material exactly once, root first, with each
//! parent ahead of its children and siblings in the order their rows were
//! linked. Code emitters walk it front to back.

use gf_core::NodeId;

use crate::error::OrderError;
use crate::graph::CompositionGraph;
use crate::node::MaterialNode;

/// A validated construction sequence over a `CompositionGraph`.
#[derive(Debug, Clone)]
pub struct BuildOrder<'g> {
    graph: &'g CompositionGraph,
    root: NodeId,
    order: Vec<NodeId>,
}

impl<'g> BuildOrder<'g> {
    pub fn graph(&self) -> &'g CompositionGraph {
        self.graph
    }

    /// The single parentless material.
    pub fn root(&self) -> &'g MaterialNode {
        &self.graph.nodes()[self.root.slot()]
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in construction order.
    pub fn iter(&self) -> impl Iterator<Item = &'g MaterialNode> + '_ {
        let nodes = self.graph.nodes();
        self.order.iter().map(move |id| &nodes[id.slot()])
    }

    pub fn names(&self) -> Vec<&'g str> {
        self.iter().map(|n| n.name.as_str()).collect()
    }

    pub fn parent(&self, node: &MaterialNode) -> Option<&'g MaterialNode> {
        self.graph.parent_of(node)
    }
}

impl CompositionGraph {
    /// Compute the build order, or `None` when the graph has no single root
    /// or contains materials unreachable from it.
    ///
    /// Callers should surface `None` as a request to fix the table; use
    /// `resolve` to learn why.
    pub fn traverse(&self) -> Option<BuildOrder<'_>> {
        self.resolve().ok()
    }

    /// Compute the build order, explaining failures.
    pub fn resolve(&self) -> Result<BuildOrder<'_>, OrderError> {
        let roots: Vec<&MaterialNode> = self.roots().collect();
        let [root] = roots.as_slice() else {
            return Err(OrderError::RootCount {
                found: roots.len(),
                roots: roots.iter().map(|n| n.name.clone()).collect(),
                missing_parents: self.missing_parents(),
            });
        };
        let root = root.id;

        let nodes = self.nodes();
        let mut visited = vec![false; nodes.len()];
        let mut post_order = Vec::with_capacity(nodes.len());

        // Explicit-stack post-order. Children are taken last-to-first so that
        // reversing the post-order lists siblings in link order.
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        visited[root.slot()] = true;
        while let Some(frame) = stack.last_mut() {
            let (id, taken) = *frame;
            let children = &nodes[id.slot()].children;
            if taken < children.len() {
                frame.1 += 1;
                let child = children[children.len() - 1 - taken];
                if !visited[child.slot()] {
                    visited[child.slot()] = true;
                    stack.push((child, 0));
                }
            } else {
                stack.pop();
                post_order.push(id);
            }
        }

        if post_order.len() != nodes.len() {
            let names = nodes
                .iter()
                .filter(|n| !visited[n.id.slot()])
                .map(|n| n.name.clone())
                .collect();
            return Err(OrderError::Unreachable { names });
        }

        post_order.reverse();
        Ok(BuildOrder {
            graph: self,
            root,
            order: post_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MaterialRow;

    fn graph(rows: &[MaterialRow]) -> CompositionGraph {
        CompositionGraph::from_rows(rows, Default::default()).unwrap()
    }

    #[test]
    fn water_order_follows_table() {
        let g = graph(&[
            MaterialRow::new("H2O", "1.0", "1", ""),
            MaterialRow::new("H", "", "2", "H2O"),
            MaterialRow::new("O", "", "1", "H2O"),
        ]);
        let order = g.traverse().unwrap();
        assert_eq!(order.names(), vec!["H2O", "H", "O"]);
        assert_eq!(order.root().name, "H2O");
        assert_eq!(order.parent(order.root()), None);
    }

    #[test]
    fn two_roots_unresolved() {
        let g = graph(&[
            MaterialRow::new("A", "1", "1", ""),
            MaterialRow::new("B", "1", "1", ""),
        ]);
        assert!(g.traverse().is_none());
        match g.resolve().unwrap_err() {
            OrderError::RootCount { found, roots, .. } => {
                assert_eq!(found, 2);
                assert_eq!(roots, vec!["A", "B"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_graph_unresolved() {
        let g = CompositionGraph::default();
        assert!(matches!(
            g.resolve(),
            Err(OrderError::RootCount { found: 0, .. })
        ));
    }

    #[test]
    fn missing_parent_reported() {
        let g = graph(&[
            MaterialRow::new("Box", "1.0", "1", ""),
            MaterialRow::new("Si", "", "1", "Glass"),
        ]);
        match g.resolve().unwrap_err() {
            OrderError::RootCount {
                found,
                missing_parents,
                ..
            } => {
                // Si never found its parent, so it is a second root.
                assert_eq!(found, 2);
                assert_eq!(missing_parents, vec!["Glass"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parent_cycle_detected() {
        let g = graph(&[
            MaterialRow::new("World", "1.0", "1", ""),
            MaterialRow::new("A", "1.0", "1", "B"),
            MaterialRow::new("B", "1.0", "1", "A"),
        ]);
        assert!(g.traverse().is_none());
        assert_eq!(
            g.resolve().unwrap_err(),
            OrderError::Unreachable {
                names: vec!["A".into(), "B".into()]
            }
        );
    }

    #[test]
    fn self_parent_detected() {
        let g = graph(&[
            MaterialRow::new("World", "1.0", "1", ""),
            MaterialRow::new("Loop", "1.0", "1", "Loop"),
        ]);
        assert!(matches!(g.resolve(), Err(OrderError::Unreachable { .. })));
    }

    #[test]
    fn nested_materials_depth_first() {
        let g = graph(&[
            MaterialRow::new("Scint", "1.03", "1", ""),
            MaterialRow::new("PVT", "1.02", "0.9", "Scint"),
            MaterialRow::new("PPO", "1.06", "0.1", "Scint"),
            MaterialRow::new("C", "", "9", "PVT"),
            MaterialRow::new("H", "", "10", "PVT"),
            MaterialRow::new("N", "", "1", "PPO"),
        ]);
        let order = g.traverse().unwrap();
        assert_eq!(order.names(), vec!["Scint", "PVT", "C", "H", "PPO", "N"]);
    }
}
