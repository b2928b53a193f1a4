//! Single decorations hung off the node blocks of a configuration.

use std::collections::BTreeSet;
use std::str::FromStr;

use toposcan_config::DecorationConfig;
use toposcan_core::{ChainKind, Configuration, DecorationKind, GrowthTable};

use crate::error::EngineError;
use crate::shard::KindTag;

/// Which chain positions are decorated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeSelection {
    #[default]
    All,
    /// Chain indices; `head` is index 0.
    Only(BTreeSet<usize>),
}

impl NodeSelection {
    pub fn contains(&self, index: usize) -> bool {
        match self {
            NodeSelection::All => true,
            NodeSelection::Only(set) => set.contains(&index),
        }
    }
}

impl FromStr for NodeSelection {
    type Err = EngineError;

    /// `all`, or a comma list of indices where `head` stands for 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(NodeSelection::All);
        }
        let mut set = BTreeSet::new();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let index = if token == "head" {
                0
            } else {
                token
                    .parse()
                    .map_err(|_| EngineError::selector("node", token))?
            };
            set.insert(index);
        }
        if set.is_empty() {
            return Err(EngineError::selector("node", s));
        }
        Ok(NodeSelection::Only(set))
    }
}

/// Decoration kinds to try, in `S` then `I` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSelection {
    pub side: bool,
    pub instanton: bool,
}

impl Default for KindSelection {
    fn default() -> Self {
        Self {
            side: true,
            instanton: true,
        }
    }
}

impl KindSelection {
    pub fn kinds(self) -> impl Iterator<Item = DecorationKind> {
        let side = self.side.then_some(DecorationKind::Side);
        let instanton = self.instanton.then_some(DecorationKind::Instanton);
        side.into_iter().chain(instanton)
    }
}

impl FromStr for KindSelection {
    type Err = EngineError;

    /// `S`, `I` or `S,I`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut selection = KindSelection {
            side: false,
            instanton: false,
        };
        for token in s.split(',').map(str::trim) {
            match token {
                "S" => selection.side = true,
                "I" => selection.instanton = true,
                other => return Err(EngineError::selector("kind", other)),
            }
        }
        Ok(selection)
    }
}

/// What a decoration sweep does for every base configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationPlan {
    pub nodes: NodeSelection,
    pub kinds: KindSelection,
    /// Side links kept per node; `None` walks the whole bank.
    pub side_cap: Option<usize>,
    /// Instantons kept per node; `None` walks the whole bank.
    pub instanton_cap: Option<usize>,
}

impl Default for DecorationPlan {
    fn default() -> Self {
        Self::from_config(&DecorationConfig::default())
    }
}

impl DecorationPlan {
    pub fn from_config(config: &DecorationConfig) -> Self {
        Self {
            nodes: NodeSelection::All,
            kinds: KindSelection::default(),
            side_cap: config.side_cap,
            instanton_cap: config.instanton_cap,
        }
    }

    pub fn with_nodes(mut self, nodes: NodeSelection) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_kinds(mut self, kinds: KindSelection) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn cap(&self, kind: DecorationKind) -> Option<usize> {
        match kind {
            DecorationKind::Side => self.side_cap,
            DecorationKind::Instanton => self.instanton_cap,
        }
    }
}

/// The single-decoration variants for one node and kind, in bank order.
///
/// `cap` bounds how many of them may count as kept. Only saved and
/// failed candidates count, so unclassified ones let the walk reach
/// further into the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorated {
    pub tag: KindTag,
    pub cap: Option<usize>,
    pub candidates: Vec<Configuration>,
}

/// Every single-decoration variant of `base` the plan allows, grouped by
/// node and kind.
///
/// Each variant adds exactly one decoration to `base`; variants never
/// accumulate.
pub fn decorate(base: &Configuration, table: &GrowthTable, plan: &DecorationPlan) -> Vec<Decorated> {
    let mut out = Vec::new();
    for (node, block) in base.blocks.iter().enumerate() {
        if block.kind != ChainKind::Node || !plan.nodes.contains(node) {
            continue;
        }
        for kind in plan.kinds.kinds() {
            let candidates = table
                .decorations(kind, block.param)
                .iter()
                .map(|&param| {
                    let mut configuration = base.clone();
                    configuration.add_decoration(kind, param, node);
                    configuration
                })
                .collect();
            out.push(Decorated {
                tag: KindTag { kind, node },
                cap: plan.cap(kind),
                candidates,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use toposcan_core::DecorationBank;

    fn table() -> GrowthTable {
        GrowthTable {
            side: vec![DecorationBank {
                node: 4,
                params: vec![1, 882, 883, 22],
            }],
            instanton: vec![DecorationBank {
                node: 4,
                params: vec![1, 882, 883, 884],
            }],
            ..GrowthTable::default()
        }
    }

    fn base() -> Configuration {
        let mut config = Configuration::single(ChainKind::Node, 4);
        config
            .add_block_right(ChainKind::Link, 22)
            .add_block_right(ChainKind::Node, 4);
        config
    }

    #[test]
    fn test_node_selection_parse() {
        assert_eq!("all".parse::<NodeSelection>().unwrap(), NodeSelection::All);
        let sel: NodeSelection = "head,2".parse().unwrap();
        assert!(sel.contains(0));
        assert!(sel.contains(2));
        assert!(!sel.contains(1));
        assert!("x".parse::<NodeSelection>().is_err());
        assert!("".parse::<NodeSelection>().is_err());
    }

    #[test]
    fn test_kind_selection_parse() {
        let both: KindSelection = "S,I".parse().unwrap();
        assert_eq!(both, KindSelection::default());
        let only_i: KindSelection = "I".parse().unwrap();
        assert_eq!(
            only_i.kinds().collect::<Vec<_>>(),
            vec![DecorationKind::Instanton]
        );
        assert!("S,Q".parse::<KindSelection>().is_err());
    }

    #[test]
    fn test_groups_carry_caps_and_independent_variants() {
        let plan = DecorationPlan::default();
        let out = decorate(&base(), &table(), &plan);
        // two nodes, one side and one instanton group each
        assert_eq!(out.len(), 4);
        for group in &out {
            assert_eq!(group.candidates.len(), 4);
            for c in &group.candidates {
                assert_eq!(c.side_links.len() + c.instantons.len(), 1);
                assert_eq!(c.blocks, base().blocks);
            }
        }
        assert_eq!(out[0].cap, None);
        assert_eq!(out[0].candidates[0].to_string(), "g4 L22 g4 S1@0");
        assert_eq!(out[1].tag, KindTag { kind: DecorationKind::Instanton, node: 0 });
        assert_eq!(out[1].cap, Some(3));
    }

    #[test]
    fn test_node_subset_and_kinds() {
        let plan = DecorationPlan::default()
            .with_nodes("head".parse().unwrap())
            .with_kinds("I".parse().unwrap());
        let out = decorate(&base(), &table(), &plan);
        assert_eq!(out.len(), 1);
        let lines: Vec<String> = out[0].candidates.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            lines,
            vec!["g4 L22 g4 I1@0", "g4 L22 g4 I882@0", "g4 L22 g4 I883@0", "g4 L22 g4 I884@0"]
        );
    }

    #[test]
    fn test_links_are_never_decorated() {
        let plan = DecorationPlan::default().with_nodes("1".parse().unwrap());
        assert!(decorate(&base(), &table(), &plan).is_empty());
    }
}
