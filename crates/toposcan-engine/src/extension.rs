//! One-step growth of a configuration at its trailing block.

use toposcan_core::{ChainKind, Configuration, GrowthTable};

/// The kind that may follow `kind` in a chain.
pub fn next_kind(kind: ChainKind) -> Option<ChainKind> {
    match kind {
        ChainKind::Node => Some(ChainKind::Link),
        ChainKind::Link => Some(ChainKind::Node),
        ChainKind::Side | ChainKind::Instanton => None,
    }
}

/// Every configuration `base` grows into by one block on the right.
///
/// Only a trailing node or interior link grows; the new block alternates
/// kind and takes each parameter the table allows after the trailing one.
/// Bases and candidates whose node parameters are not unimodal are
/// dropped. Decorations are carried over unchanged.
pub fn extend_one_step(base: &Configuration, table: &GrowthTable) -> Vec<Configuration> {
    let Some(last) = base.last() else {
        return Vec::new();
    };
    let Some(kind) = next_kind(last.kind) else {
        return Vec::new();
    };
    if !base.has_unimodal_nodes() {
        return Vec::new();
    }

    table
        .successors(last.kind, last.param)
        .iter()
        .map(|&param| {
            let mut next = base.clone();
            next.add_block_right(kind, param);
            next
        })
        .filter(Configuration::has_unimodal_nodes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use toposcan_core::{DecorationKind, Successors};

    fn table() -> GrowthTable {
        GrowthTable {
            node_bank: vec![4, 6],
            link_bank: vec![22],
            after_node: vec![
                Successors {
                    param: 4,
                    next: vec![22, 33],
                },
                Successors {
                    param: 6,
                    next: vec![22],
                },
            ],
            after_link: vec![Successors {
                param: 22,
                next: vec![4, 6],
            }],
            ..GrowthTable::default()
        }
    }

    #[test]
    fn test_node_grows_into_links() {
        let base = Configuration::single(ChainKind::Node, 4);
        let out = extend_one_step(&base, &table());
        let lines: Vec<String> = out.iter().map(ToString::to_string).collect();
        assert_eq!(lines, vec!["g4 L22", "g4 L33"]);
    }

    #[test]
    fn test_candidates_must_stay_unimodal() {
        // 6, 4 is falling; 6, 4, 6 would rise again
        let mut base = Configuration::single(ChainKind::Node, 6);
        base.add_block_right(ChainKind::Link, 22)
            .add_block_right(ChainKind::Node, 4)
            .add_block_right(ChainKind::Link, 22);
        let lines: Vec<String> = extend_one_step(&base, &table())
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(lines, vec!["g6 L22 g4 L22 g4"]);
    }

    #[test]
    fn test_non_unimodal_base_is_dropped() {
        let mut base = Configuration::single(ChainKind::Node, 6);
        base.add_block_right(ChainKind::Link, 22)
            .add_block_right(ChainKind::Node, 4)
            .add_block_right(ChainKind::Link, 22)
            .add_block_right(ChainKind::Node, 6)
            .add_block_right(ChainKind::Link, 22);
        assert!(extend_one_step(&base, &table()).is_empty());
    }

    #[test]
    fn test_only_trailing_node_or_link_grows() {
        assert!(extend_one_step(&Configuration::new(), &table()).is_empty());
        let side = Configuration::single(ChainKind::Side, 22);
        assert!(extend_one_step(&side, &table()).is_empty());
        let unknown = Configuration::single(ChainKind::Node, 5);
        assert!(extend_one_step(&unknown, &table()).is_empty());
    }

    #[test]
    fn test_decorations_are_carried() {
        let mut base = Configuration::single(ChainKind::Node, 4);
        base.add_decoration(DecorationKind::Side, 882, 0);
        let out = extend_one_step(&base, &table());
        assert_eq!(out[0].to_string(), "g4 L22 S882@0");
    }

    #[test]
    fn test_builtin_table_grows_seeds() {
        let table = GrowthTable::builtin();
        for seed in table.seeds() {
            for next in extend_one_step(&seed, &table) {
                assert_eq!(next.len(), 2);
                assert_eq!(next.blocks[1].kind, ChainKind::Link);
            }
        }
    }
}
