//! Tests for gluing graph composition.

use super::*;
use crate::matrix::is_symmetric;
use nalgebra::DMatrix;
use proptest::prelude::*;

#[test]
fn test_two_unit_nodes_compose() {
    let mut g = GluingGraph::new();
    let a = g.add(BlockKind::Node, 1).unwrap();
    let b = g.add(BlockKind::Node, 1).unwrap();
    g.connect(a, b).unwrap();
    assert_eq!(
        g.compose(),
        DMatrix::from_row_slice(2, 2, &[-1, 1, 1, -1])
    );
}

#[test]
fn test_single_node_compose() {
    let mut g = GluingGraph::new();
    g.add(BlockKind::Node, 3).unwrap();
    assert_eq!(g.compose(), DMatrix::from_row_slice(1, 1, &[-3]));
}

#[test]
fn test_banned_side_link_commits_nothing() {
    let mut g = GluingGraph::new();
    let s = g.add(BlockKind::SideLink, 11).unwrap();
    let n = g.add(BlockKind::Node, 9).unwrap();
    let err = g.connect(s, n).unwrap_err();
    assert!(matches!(err, TopoError::BannedPair { link_param: 11, node_param: 9, .. }));
    assert!(g.edges().is_empty());
}

#[test]
fn test_side_and_interior_never_glue() {
    let mut g = GluingGraph::with_rules(Arc::new(RuleTable::permissive()));
    let s = g.add(BlockKind::SideLink, 1).unwrap();
    let i = g.add(BlockKind::InteriorLink, 22).unwrap();
    let ports = [Port::Left, Port::Right, Port::Custom];
    for pa in ports {
        for pb in ports {
            assert!(g.connect_ports(s, pa, i, pb, 1).is_err());
            assert!(g.connect_ports(i, pa, s, pb, 1).is_err());
        }
    }
    assert!(g.connect(s, i).is_err());
    assert!(g.connect(i, s).is_err());
    assert!(g.edges().is_empty());
}

#[test]
fn test_weight_must_be_positive() {
    let mut g = GluingGraph::new();
    let a = g.add(BlockKind::Node, 4).unwrap();
    let b = g.add(BlockKind::Node, 4).unwrap();
    assert_eq!(
        g.connect_ports(a, Port::Right, b, Port::Left, 0),
        Err(TopoError::NonPositiveWeight(0))
    );
    assert_eq!(
        g.connect_ports(a, Port::Right, b, Port::Left, -2),
        Err(TopoError::NonPositiveWeight(-2))
    );
    g.connect_ports(a, Port::Right, b, Port::Left, 2).unwrap();
    assert_eq!(g.compose()[(0, 1)], 2);
}

#[test]
fn test_unknown_node() {
    let mut g = GluingGraph::new();
    let a = g.add(BlockKind::Node, 4).unwrap();
    let err = g.connect(a, NodeRef(7)).unwrap_err();
    assert_eq!(err, TopoError::UnknownNode(7));
}

#[test]
fn test_self_gluing_is_rejected() {
    let mut g = GluingGraph::new();
    let a = g.add(BlockKind::Node, 3).unwrap();
    let err = g.connect_ports(a, Port::Left, a, Port::Left, 1).unwrap_err();
    assert_eq!(err, TopoError::SelfGluing(0));
    assert!(g.edges().is_empty());
    assert_eq!(g.compose()[(0, 0)], -3);
}

#[test]
fn test_edges_at_one_port_accumulate() {
    let mut g = GluingGraph::new();
    let hub = g.add(BlockKind::Node, 4).unwrap();
    let x = g.add(BlockKind::Node, 1).unwrap();
    g.connect(hub, x).unwrap();
    g.connect(hub, x).unwrap();
    assert_eq!(g.compose()[(0, 1)], 2);
    assert_eq!(g.compose()[(1, 0)], 2);
}

#[test]
fn test_edge_to_empty_block_is_skipped() {
    let mut g = GluingGraph::with_rules(Arc::new(RuleTable::permissive()));
    let n = g.add(BlockKind::Node, 4).unwrap();
    let empty = g.add(BlockKind::SideLink, 5).unwrap();
    let m = g.add(BlockKind::Node, 6).unwrap();
    g.connect(n, empty).unwrap();
    g.connect(n, m).unwrap();
    assert_eq!(g.edges().len(), 2);
    assert_eq!(
        g.compose(),
        DMatrix::from_row_slice(2, 2, &[-4, 1, 1, -6])
    );
}

#[test]
fn test_decorated_chain() {
    // g6 with a 882 hanging off it: the -1 tip meets the node
    let mut g = GluingGraph::new();
    let n = g.add(BlockKind::Node, 6).unwrap();
    let s = g.add(BlockKind::SideLink, 882).unwrap();
    g.connect(s, n).unwrap();
    assert_eq!(
        g.compose(),
        DMatrix::from_row_slice(3, 3, &[-6, 0, 1, 0, -2, 1, 1, 1, -1])
    );
}

#[test]
fn test_empty_graph() {
    let g = GluingGraph::new();
    assert!(g.is_empty());
    assert_eq!(g.compose().shape(), (0, 0));
    assert!(g.to_string().contains("[empty 0x0 matrix]"));
}

#[test]
fn test_display_lists_edges() {
    let mut g = GluingGraph::new();
    let a = g.add(BlockKind::Node, 4).unwrap();
    let b = g.add(BlockKind::InteriorLink, 22).unwrap();
    g.connect(a, b).unwrap();
    let text = g.to_string();
    assert!(text.contains("node 1: i22 (3 curves)"));
    assert!(text.contains("0(1) --(1)-- 1(0)"));
}

fn node_params() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(1..=12i32, 0..8)
}

proptest! {
    #[test]
    fn prop_compose_is_symmetric(
        params in node_params(),
        raw_edges in prop::collection::vec((0usize..8, 0usize..8, 1i64..4, 0u8..3, 0u8..3), 0..12),
    ) {
        let mut g = GluingGraph::new();
        let ids: Vec<NodeRef> = params
            .iter()
            .map(|&p| g.add(BlockKind::Node, p).unwrap())
            .collect();
        let port = |c: u8| match c {
            0 => Port::Left,
            1 => Port::Right,
            _ => Port::Custom,
        };
        if !ids.is_empty() {
            for (u, v, w, pu, pv) in raw_edges {
                let (u, v) = (ids[u % ids.len()], ids[v % ids.len()]);
                if u != v {
                    g.connect_ports(u, port(pu), v, port(pv), w).unwrap();
                }
            }
        }
        prop_assert!(is_symmetric(&g.compose()));
    }

    #[test]
    fn prop_edgeless_graph_is_block_diagonal(
        specs in prop::collection::vec((0u8..4, 1..=12i32), 0..6),
    ) {
        let mut g = GluingGraph::new();
        let mut blocks = Vec::new();
        for (k, p) in specs {
            let (kind, param) = match k {
                0 => (BlockKind::Node, p),
                1 => (BlockKind::External, p),
                2 => (BlockKind::SideLink, 880 + (p % 6) + 2),
                _ => (BlockKind::InteriorLink, 22),
            };
            let block = Block::new(kind, param).unwrap();
            blocks.push(block.clone());
            g.add_block(block);
        }
        let expected = block_diagonal(blocks.iter().map(Block::form));
        prop_assert_eq!(g.compose(), expected);
    }
}
