//! A growth table small enough to predict by hand.
//!
//! With the builtin rules and the exact classifier:
//!
//! - `g4` extends to `g4 L11` and `g4 L22`, both SCFT
//! - `g0` extends to `g0 L11`, which is unclassified
//! - `g9` extends to `g9 L11`, which the rules reject
//! - `g4` decorates to `g4 S882@0` and `g4 I882@0`, both SCFT

use toposcan_core::{DecorationBank, GrowthTable, Successors};

pub fn small_growth_table() -> GrowthTable {
    GrowthTable {
        node_bank: vec![0, 4, 9],
        link_bank: vec![11, 22],
        after_node: vec![
            Successors {
                param: 0,
                next: vec![11],
            },
            Successors {
                param: 4,
                next: vec![11, 22],
            },
            Successors {
                param: 9,
                next: vec![11],
            },
        ],
        after_link: vec![
            Successors {
                param: 11,
                next: vec![4],
            },
            Successors {
                param: 22,
                next: vec![4],
            },
        ],
        side: vec![DecorationBank {
            node: 4,
            params: vec![882],
        }],
        instanton: vec![DecorationBank {
            node: 4,
            params: vec![882],
        }],
    }
}
