//! Property tests for build-order invariants.

use std::collections::HashMap;

use gf_materials::{CompositionGraph, MaterialRow};
use proptest::prelude::*;
use proptest::sample::Index;

/// Rows describing a random tree: M0 is the root and Mi's parent is some Mj with j < i.
fn tree_rows() -> impl Strategy<Value = Vec<MaterialRow>> {
    prop::collection::vec(any::<Index>(), 1..32).prop_map(|picks| {
        picks
            .iter()
            .enumerate()
            .map(|(i, pick)| {
                let parent = if i == 0 {
                    String::new()
                } else {
                    format!("M{}", pick.index(i))
                };
                MaterialRow::new(format!("M{i}"), "1.0", "1", parent)
            })
            .collect()
    })
}

fn parent_map(graph: &CompositionGraph) -> HashMap<String, Option<String>> {
    graph
        .nodes()
        .iter()
        .map(|n| {
            let parent = graph.parent_of(n).map(|p| p.name.clone());
            (n.name.clone(), parent)
        })
        .collect()
}

proptest! {
    #[test]
    fn every_node_once_parent_first(
        rows in tree_rows().prop_flat_map(|rows| Just(rows).prop_shuffle())
    ) {
        let graph = CompositionGraph::from_rows(&rows, Default::default()).unwrap();
        let order = graph.traverse().unwrap();

        prop_assert_eq!(order.len(), rows.len());

        let position: HashMap<&str, usize> = order
            .names()
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect();
        prop_assert_eq!(position.len(), rows.len());

        for node in order.iter() {
            if let Some(parent) = order.parent(node) {
                prop_assert!(position[parent.name.as_str()] < position[node.name.as_str()]);
            }
        }
    }

    #[test]
    fn resolved_links_ignore_arrival_order(
        (rows, shuffled) in tree_rows()
            .prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle()))
    ) {
        let g1 = CompositionGraph::from_rows(&rows, Default::default()).unwrap();
        let g2 = CompositionGraph::from_rows(&shuffled, Default::default()).unwrap();
        prop_assert_eq!(parent_map(&g1), parent_map(&g2));
    }

    #[test]
    fn extra_root_never_yields_partial_order(rows in tree_rows()) {
        let mut rows = rows;
        rows.push(MaterialRow::new("Stray", "1.0", "1", ""));
        let graph = CompositionGraph::from_rows(&rows, Default::default()).unwrap();
        prop_assert!(graph.traverse().is_none());
    }
}
