//! The builtin parameter bans.

use super::{NodeCondition, PairRule, PortRule, RuleSet, RuleTable};
use crate::port::Port;

use NodeCondition::{Above, Below, Outside};
use Port::{Left as L, Right as R};

/// Pair bans shared by both link families.
const LINK_PAIRS: &[(i32, NodeCondition)] = &[
    (11, Above(4)),
    (22, Above(6)),
    (33, Above(8)),
    (331, Above(6)),
    (44, Outside(6, 8)),
    (55, Below(6)),
];

/// Pair bans that only apply to side links.
const SIDE_ONLY_PAIRS: &[(i32, NodeCondition)] = &[
    // alkali links without a -5 curve
    (991, Above(4)),
    (9920, Above(4)),
    (9902, Above(4)),
    (993, Outside(6, 8)),
    (91, Outside(8, 8)),
    (92, Above(4)),
    (94, Below(7)),
    (95, Below(7)),
    (96, Below(6)),
    (97, Above(8)),
    (98, Above(8)),
    (99, Outside(6, 8)),
    (910, Outside(7, 8)),
    (911, Outside(6, 8)),
    (912, Above(6)),
    (913, Outside(6, 6)),
    (914, Outside(6, 6)),
    (915, Above(6)),
    (916, Above(4)),
    (917, Above(4)),
    // alkali links with -5 curves
    (918, Below(6)),
    (919, Below(7)),
    (920, Below(6)),
    (921, Below(6)),
    (922, Below(6)),
    (923, Below(7)),
    (924, Above(8)),
    (925, Above(8)),
    (926, Outside(6, 8)),
    (927, Above(8)),
    (928, Above(8)),
    (929, Above(8)),
    (930, Outside(7, 8)),
    (931, Outside(7, 8)),
    (932, Outside(7, 8)),
    (933, Outside(6, 8)),
    (934, Above(6)),
    (935, Outside(6, 6)),
    (936, Above(6)),
    (937, Above(6)),
    (938, Above(6)),
    (939, Outside(6, 6)),
    (940, Above(4)),
    (941, Above(4)),
    (942, Above(4)),
    (943, Above(6)),
    (944, Outside(6, 8)),
    (945, Below(6)),
    (946, Below(7)),
    (947, Below(6)),
    (948, Below(9)),
    (949, Below(9)),
    (950, Below(7)),
    (951, Outside(6, 8)),
    (952, Outside(6, 8)),
    (953, Outside(7, 8)),
    (954, Outside(7, 8)),
    (955, Outside(6, 6)),
    (956, Above(6)),
    (957, Outside(6, 6)),
    // instanton chains need a node at least as large as their length
    (1188, Below(12)),
    (1088, Below(11)),
    (988, Below(10)),
    (1888, Below(9)),
    (788, Below(8)),
    (688, Below(7)),
    (588, Below(6)),
    (488, Below(5)),
    (388, Below(4)),
    (8811, Below(12)),
    (8810, Below(11)),
    (889, Below(10)),
    (8881, Below(9)),
    (887, Below(8)),
    (886, Below(7)),
    (885, Below(6)),
    (884, Below(5)),
    (883, Below(4)),
    // -5 alkali links
    (99910, Above(6)),
    (99901, Above(6)),
    (99920, Outside(6, 8)),
    (99902, Outside(6, 8)),
    (99930, Below(6)),
    (99903, Below(6)),
    (994, Outside(6, 6)),
    (995, Outside(6, 8)),
    (996, Below(7)),
    (997, Outside(7, 8)),
    (998, Below(7)),
    (999, Below(9)),
    (9910, Outside(6, 6)),
    (9911, Outside(7, 8)),
    (9912, Below(6)),
    (9913, Above(8)),
    (9914, Outside(6, 8)),
    (9915, Below(7)),
    (9916, Outside(6, 8)),
    (9917, Outside(6, 6)),
];

/// Port bans for interior links: `(link, when, link port, node port)`.
const INTERIOR_PORTS: &[(i32, NodeCondition, Port, Port)] = &[
    (32, Above(4), R, L),
    (23, Above(4), L, R),
    (23, Above(8), R, L),
    (32, Above(8), L, R),
    (42, Above(4), R, L),
    (24, Above(4), L, R),
    (42, Below(6), L, R),
    (24, Below(6), R, L),
    (43, Above(6), R, L),
    (43, Outside(6, 8), L, R),
    (34, Above(6), L, R),
    (34, Outside(6, 8), R, L),
    (53, Above(6), R, L),
    (53, Below(6), L, R),
    (35, Above(6), L, R),
    (35, Below(6), R, L),
    (54, Outside(6, 8), R, L),
    (54, Below(6), L, R),
    (45, Outside(6, 8), L, R),
    (45, Below(6), R, L),
];

/// Port bans that only apply to side links.
const SIDE_ONLY_PORTS: &[(i32, NodeCondition, Port, Port)] = &[
    (99910, Above(3), L, R),
    (99901, Above(3), R, L),
    (99920, Above(3), L, R),
    (99902, Above(3), R, L),
    (99930, Above(3), L, R),
    (99903, Above(3), R, L),
    // instanton chains glue by their -1 end only
    (288, Above(0), R, L),
    (388, Above(0), R, L),
    (488, Above(0), R, L),
    (588, Above(0), R, L),
    (688, Above(0), R, L),
    (788, Above(0), R, L),
    (1888, Above(0), R, L),
    (988, Above(0), R, L),
    (1088, Above(0), R, L),
    (1188, Above(0), R, L),
    (882, Above(0), L, R),
    (883, Above(0), L, R),
    (884, Above(0), L, R),
    (885, Above(0), L, R),
    (886, Above(0), L, R),
    (887, Above(0), L, R),
    (8881, Above(0), L, R),
    (889, Above(0), L, R),
    (8810, Above(0), L, R),
    (8811, Above(0), L, R),
];

fn pairs(rows: &[&[(i32, NodeCondition)]]) -> Vec<PairRule> {
    rows.iter()
        .flat_map(|rows| rows.iter())
        .map(|&(link, when)| PairRule { link, when })
        .collect()
}

fn ports(rows: &[&[(i32, NodeCondition, Port, Port)]]) -> Vec<PortRule> {
    rows.iter()
        .flat_map(|rows| rows.iter())
        .map(|&(link, when, link_port, node_port)| PortRule {
            link,
            when,
            link_port,
            node_port,
        })
        .collect()
}

pub(super) fn table() -> RuleTable {
    RuleTable {
        side: RuleSet {
            pairs: pairs(&[LINK_PAIRS, SIDE_ONLY_PAIRS]),
            ports: ports(&[INTERIOR_PORTS, SIDE_ONLY_PORTS]),
        },
        interior: RuleSet {
            pairs: pairs(&[LINK_PAIRS]),
            ports: ports(&[INTERIOR_PORTS]),
        },
    }
}
