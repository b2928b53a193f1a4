//! Canonical cases every layer is checked against.
//!
//! | Case | Input | Expected |
//! |---|---|---|
//! | A | nodes `1`, `1` glued once | `[[-1,1],[1,-1]]`, LST |
//! | B | node `3` | `[[-3]]`, SCFT |
//! | C | side link `11` glued to node `9` | banned pair, no edge |
//! | D | the same base twice in one run | one copy of each derived line |

use nalgebra::DMatrix;
use toposcan_core::{
    BlockKind, ChainKind, Configuration, GluingGraph, IntersectionForm, NodeRef,
};
use toposcan_store::InputRecord;

/// A chain configuration from `(kind, param)` pairs.
pub fn chain(blocks: &[(ChainKind, i32)]) -> Configuration {
    let mut config = Configuration::new();
    for &(kind, param) in blocks {
        config.add_block_right(kind, param);
    }
    config
}

/// An input record with a synthetic origin.
pub fn record(origin: &str, configuration: Configuration) -> InputRecord {
    InputRecord {
        origin: origin.to_string(),
        configuration,
    }
}

pub fn two_node_graph() -> GluingGraph {
    let mut g = GluingGraph::new();
    let a = g.add(BlockKind::Node, 1).unwrap();
    let b = g.add(BlockKind::Node, 1).unwrap();
    g.connect(a, b).unwrap();
    g
}

pub fn two_node_form() -> IntersectionForm {
    DMatrix::from_row_slice(2, 2, &[-1, 1, 1, -1])
}

pub fn single_node_graph() -> GluingGraph {
    let mut g = GluingGraph::new();
    g.add(BlockKind::Node, 3).unwrap();
    g
}

pub fn single_node_form() -> IntersectionForm {
    DMatrix::from_row_slice(1, 1, &[-3])
}

/// A side link `11` and a node `9`, not yet glued.
pub fn banned_side_graph() -> (GluingGraph, NodeRef, NodeRef) {
    let mut g = GluingGraph::new();
    let side = g.add(BlockKind::SideLink, 11).unwrap();
    let node = g.add(BlockKind::Node, 9).unwrap();
    (g, side, node)
}

/// The banned side-link pair as a chain configuration.
pub fn banned_side_configuration() -> Configuration {
    chain(&[(ChainKind::Side, 11), (ChainKind::Node, 9)])
}

/// Two records with the same configuration, so every derived line is
/// produced twice.
pub fn repeated_base_records() -> Vec<InputRecord> {
    let base = Configuration::single(ChainKind::Node, 4);
    vec![record("a.txt:1", base.clone()), record("b.txt:1", base)]
}
