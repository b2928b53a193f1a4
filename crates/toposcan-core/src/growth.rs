//! Combinatorial growth tables: which block may follow which, and which
//! decorations a node accepts.

use std::sync::{Arc, OnceLock};

use crate::configuration::{ChainKind, Configuration, DecorationKind};

/// Allowed successors of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Successors {
    pub param: i32,
    pub next: Vec<i32>,
}

/// Decorations one node value accepts, in the order they are tried.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecorationBank {
    pub node: i32,
    pub params: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthTable {
    pub node_bank: Vec<i32>,
    pub link_bank: Vec<i32>,
    pub after_node: Vec<Successors>,
    pub after_link: Vec<Successors>,
    pub side: Vec<DecorationBank>,
    pub instanton: Vec<DecorationBank>,
}

static BUILTIN: OnceLock<Arc<GrowthTable>> = OnceLock::new();

impl GrowthTable {
    pub fn builtin() -> Arc<GrowthTable> {
        BUILTIN.get_or_init(|| Arc::new(builtin())).clone()
    }

    /// Parameters that may follow a trailing block of `kind` and `param`.
    ///
    /// Only nodes and interior links grow; other kinds have no successors.
    pub fn successors(&self, kind: ChainKind, param: i32) -> &[i32] {
        let rows = match kind {
            ChainKind::Node => &self.after_node,
            ChainKind::Link => &self.after_link,
            ChainKind::Side | ChainKind::Instanton => return &[],
        };
        rows.iter()
            .find(|s| s.param == param)
            .map(|s| s.next.as_slice())
            .unwrap_or(&[])
    }

    /// Decoration parameters a node of value `node_param` accepts.
    pub fn decorations(&self, kind: DecorationKind, node_param: i32) -> &[i32] {
        let banks = match kind {
            DecorationKind::Side => &self.side,
            DecorationKind::Instanton => &self.instanton,
        };
        banks
            .iter()
            .find(|b| b.node == node_param)
            .map(|b| b.params.as_slice())
            .unwrap_or(&[])
    }

    /// One single-node configuration per node bank value.
    pub fn seeds(&self) -> Vec<Configuration> {
        self.node_bank
            .iter()
            .map(|&p| Configuration::single(ChainKind::Node, p))
            .collect()
    }
}

fn successors(rows: &[(i32, &[i32])]) -> Vec<Successors> {
    rows.iter()
        .map(|&(param, next)| Successors {
            param,
            next: next.to_vec(),
        })
        .collect()
}

fn banks(rows: &[(i32, &[i32])]) -> Vec<DecorationBank> {
    rows.iter()
        .map(|&(node, params)| DecorationBank {
            node,
            params: params.to_vec(),
        })
        .collect()
}

const SIDE_G7: &[i32] = &[
    1, 882, 883, 884, 885, 886, 23, 33, 24, 993, 91, 93, 94, 95, 96, 97, 98, 99, 910, 911, 34, 44,
    35, 45, 54, 55, 99920, 99930, 995, 996, 997, 998, 9911, 9912, 9913, 9914, 918, 919, 920, 921,
    922, 923, 924, 925, 926, 927, 928, 929, 930, 931, 932, 933, 944, 945, 9915, 9916, 946, 947,
    950, 951, 952, 953, 954,
];

const SIDE_G8: &[i32] = &[
    1, 882, 883, 884, 885, 886, 887, 23, 33, 24, 993, 91, 93, 94, 95, 96, 97, 98, 99, 910, 911, 34,
    44, 35, 45, 54, 55, 99920, 99930, 995, 996, 997, 998, 9911, 9912, 9913, 9914, 918, 919, 920,
    921, 922, 923, 924, 925, 926, 927, 928, 929, 930, 931, 932, 933, 944, 945, 9915, 9916, 946,
    947, 950, 951, 952, 953, 954,
];

fn builtin() -> GrowthTable {
    GrowthTable {
        node_bank: vec![4, 6, 7, 8, 12],
        link_bank: vec![11, 22, 33, 44, 55, 331, 32, 23, 42, 24, 43, 34, 53, 35, 54, 45],
        after_node: successors(&[
            (4, &[11, 22, 32, 23, 33, 24, 331, 34, 35]),
            (6, &[22, 32, 33, 42, 331, 43, 34, 44, 53, 35, 45, 54, 55]),
            (7, &[32, 33, 42, 43, 44, 53, 54, 45, 55]),
            (8, &[32, 33, 42, 43, 44, 53, 54, 45, 55]),
            (12, &[42, 53, 54, 55]),
        ]),
        after_link: successors(&[
            (11, &[4]),
            (22, &[4, 6]),
            (32, &[4]),
            (23, &[4, 6, 7, 8]),
            (33, &[4, 6, 7, 8]),
            (42, &[4]),
            (24, &[6, 7, 8, 12]),
            (331, &[4, 6]),
            (43, &[4, 6]),
            (34, &[6, 7, 8]),
            (44, &[6, 7, 8]),
            (53, &[4, 6]),
            (35, &[6, 7, 8, 12]),
            (54, &[6, 7, 8]),
            (45, &[6, 7, 8, 12]),
            (55, &[6, 7, 8, 12]),
        ]),
        side: banks(&[
            (
                4,
                &[
                    1, 882, 883, 22, 32, 23, 33, 42, 991, 9920, 9902, 92, 93, 97, 98, 912, 915,
                    916, 917, 331, 43, 53, 99910, 9913, 924, 925, 927, 928, 929, 934, 936, 937,
                    938, 940, 941, 942, 943, 956,
                ],
            ),
            (
                6,
                &[
                    1, 882, 883, 884, 885, 22, 23, 33, 24, 993, 93, 96, 97, 98, 99, 911, 912, 913,
                    914, 915, 331, 43, 34, 44, 53, 35, 54, 45, 55, 99910, 99920, 99930, 994, 995,
                    9910, 9912, 9913, 9914, 918, 920, 921, 922, 924, 925, 926, 927, 928, 929, 933,
                    934, 935, 936, 937, 938, 939, 943, 944, 945, 9916, 9917, 947, 951, 952, 955,
                    956, 957,
                ],
            ),
            (7, SIDE_G7),
            (8, SIDE_G8),
            (
                12,
                &[
                    1, 882, 883, 884, 885, 886, 887, 8881, 889, 8810, 8811, 24, 93, 94, 95, 96, 35,
                    45, 55, 99930, 996, 998, 999, 9912, 918, 919, 920, 921, 922, 923, 945, 9915,
                    946, 947, 948, 949, 950,
                ],
            ),
        ]),
        instanton: banks(&[
            (4, &[1, 882, 883]),
            (6, &[1, 882, 883, 884, 885]),
            (7, &[1, 882, 883, 884, 885, 886]),
            (8, &[1, 882, 883, 884, 885, 886, 887]),
            (12, &[1, 882, 883, 884, 885, 886, 887, 8881, 889, 8810, 8811]),
        ]),
    }
}
