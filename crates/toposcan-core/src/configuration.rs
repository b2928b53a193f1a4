//! Configurations: decorated linear chains of typed blocks.

use std::fmt;
use std::sync::Arc;

use crate::block::BlockKind;
use crate::error::{Result, TopoError};
use crate::graph::GluingGraph;
use crate::port::NodeRef;
use crate::rules::RuleTable;

/// Kind letter of a chain block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChainKind {
    /// A node curve, written `g`.
    #[cfg_attr(feature = "serde", serde(rename = "g"))]
    Node,
    /// An interior link, written `L`.
    #[cfg_attr(feature = "serde", serde(rename = "L"))]
    Link,
    /// A side link in the chain, written `S`.
    #[cfg_attr(feature = "serde", serde(rename = "S"))]
    Side,
    /// An instanton in the chain, written `I`.
    #[cfg_attr(feature = "serde", serde(rename = "I"))]
    Instanton,
}

impl ChainKind {
    pub fn letter(self) -> char {
        match self {
            ChainKind::Node => 'g',
            ChainKind::Link => 'L',
            ChainKind::Side => 'S',
            ChainKind::Instanton => 'I',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'g' => Some(ChainKind::Node),
            'L' => Some(ChainKind::Link),
            'S' => Some(ChainKind::Side),
            'I' => Some(ChainKind::Instanton),
            _ => None,
        }
    }

    /// Block kind used when the chain is turned into a graph.
    pub fn block_kind(self) -> BlockKind {
        match self {
            ChainKind::Node => BlockKind::Node,
            ChainKind::Link => BlockKind::InteriorLink,
            ChainKind::Side | ChainKind::Instanton => BlockKind::SideLink,
        }
    }
}

/// Kind of a decoration hung off a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecorationKind {
    #[cfg_attr(feature = "serde", serde(rename = "S"))]
    Side,
    #[cfg_attr(feature = "serde", serde(rename = "I"))]
    Instanton,
}

impl DecorationKind {
    pub fn letter(self) -> char {
        match self {
            DecorationKind::Side => 'S',
            DecorationKind::Instanton => 'I',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainBlock {
    pub kind: ChainKind,
    pub param: i32,
}

/// A decoration glued to chain block `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    pub param: i32,
    pub node: usize,
}

/// A linear chain with side-link and instanton decorations.
///
/// Chain block `i` is glued to block `i + 1`, right port to left port.
/// Decorations glue their right port to the left port of their node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Configuration {
    pub blocks: Vec<ChainBlock>,
    pub side_links: Vec<Attachment>,
    pub instantons: Vec<Attachment>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// A one-block configuration.
    pub fn single(kind: ChainKind, param: i32) -> Self {
        let mut config = Self::new();
        config.add_block_right(kind, param);
        config
    }

    /// Appends a block to the right end of the chain.
    pub fn add_block_right(&mut self, kind: ChainKind, param: i32) -> &mut Self {
        self.blocks.push(ChainBlock { kind, param });
        self
    }

    /// Hangs a decoration off chain block `node`.
    pub fn add_decoration(&mut self, kind: DecorationKind, param: i32, node: usize) -> &mut Self {
        let attachment = Attachment { param, node };
        match kind {
            DecorationKind::Side => self.side_links.push(attachment),
            DecorationKind::Instanton => self.instantons.push(attachment),
        }
        self
    }

    /// Chain length; decorations are not counted.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn last(&self) -> Option<&ChainBlock> {
        self.blocks.last()
    }

    /// Parameters of the node blocks, in chain order.
    pub fn node_params(&self) -> Vec<i32> {
        self.blocks
            .iter()
            .filter(|b| b.kind == ChainKind::Node)
            .map(|b| b.param)
            .collect()
    }

    /// True when the node parameters rise then fall, both non-strictly.
    pub fn has_unimodal_nodes(&self) -> bool {
        is_unimodal(&self.node_params())
    }

    /// Kind letters of the first `upto` chain blocks, or `"empty"`.
    pub fn kind_prefix(&self, upto: usize) -> String {
        let prefix: String = self.blocks.iter().take(upto).map(|b| b.kind.letter()).collect();
        if prefix.is_empty() {
            "empty".to_string()
        } else {
            prefix
        }
    }

    /// Builds the gluing graph, checking every edge against `rules`.
    ///
    /// # Errors
    ///
    /// Propagates the first rejected gluing, and reports decorations that
    /// point past the end of the chain.
    pub fn to_graph(&self, rules: Arc<RuleTable>) -> Result<GluingGraph> {
        let mut graph = GluingGraph::with_rules(rules);
        let chain = self
            .blocks
            .iter()
            .map(|b| graph.add(b.kind.block_kind(), b.param))
            .collect::<Result<Vec<NodeRef>>>()?;

        for pair in chain.windows(2) {
            graph.connect(pair[0], pair[1])?;
        }
        for deco in self.side_links.iter().chain(&self.instantons) {
            let &target = chain.get(deco.node).ok_or(TopoError::DanglingAttachment {
                index: deco.node,
                len: chain.len(),
            })?;
            let side = graph.add(BlockKind::SideLink, deco.param)?;
            graph.connect(side, target)?;
        }
        Ok(graph)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = self
            .blocks
            .iter()
            .map(|b| format!("{}{}", b.kind.letter(), b.param))
            .chain(self.side_links.iter().map(|a| format!("S{}@{}", a.param, a.node)))
            .chain(self.instantons.iter().map(|a| format!("I{}@{}", a.param, a.node)));
        for (i, token) in tokens.enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&token)?;
        }
        Ok(())
    }
}

/// A named configuration, as stored in a record database.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub name: String,
    pub configuration: Configuration,
}

/// Non-strictly increasing, then non-strictly decreasing.
pub fn is_unimodal(values: &[i32]) -> bool {
    let n = values.len();
    if n <= 2 {
        return true;
    }
    let mut i = 1;
    while i < n && values[i] >= values[i - 1] {
        i += 1;
    }
    while i < n && values[i] <= values[i - 1] {
        i += 1;
    }
    i == n
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;
    use proptest::prelude::*;

    fn chain(tokens: &[(ChainKind, i32)]) -> Configuration {
        let mut c = Configuration::new();
        for &(k, p) in tokens {
            c.add_block_right(k, p);
        }
        c
    }

    #[test]
    fn test_unimodal() {
        assert!(is_unimodal(&[]));
        assert!(is_unimodal(&[4, 12]));
        assert!(is_unimodal(&[4, 6, 6, 8, 7, 7, 4]));
        assert!(is_unimodal(&[8, 6, 4]));
        assert!(!is_unimodal(&[6, 4, 6]));
        assert!(!is_unimodal(&[4, 8, 6, 7]));
    }

    #[test]
    fn test_kind_prefix() {
        let c = chain(&[
            (ChainKind::Node, 4),
            (ChainKind::Link, 22),
            (ChainKind::Node, 6),
            (ChainKind::Link, 33),
            (ChainKind::Node, 8),
        ]);
        assert_eq!(c.kind_prefix(4), "gLgL");
        assert_eq!(Configuration::new().kind_prefix(4), "empty");
        assert_eq!(c.node_params(), vec![4, 6, 8]);
    }

    #[test]
    fn test_display_is_compact_line() {
        let mut c = chain(&[(ChainKind::Node, 4), (ChainKind::Link, 22), (ChainKind::Node, 6)]);
        c.add_decoration(DecorationKind::Instanton, 1, 2);
        c.add_decoration(DecorationKind::Side, 882, 0);
        assert_eq!(c.to_string(), "g4 L22 g6 S882@0 I1@2");
    }

    #[test]
    fn test_to_graph_chain() {
        let c = chain(&[(ChainKind::Node, 1), (ChainKind::Node, 1)]);
        let g = c.to_graph(RuleTable::builtin()).unwrap();
        assert_eq!(g.compose(), DMatrix::from_row_slice(2, 2, &[-1, 1, 1, -1]));
    }

    #[test]
    fn test_to_graph_decoration() {
        let mut c = Configuration::single(ChainKind::Node, 6);
        c.add_decoration(DecorationKind::Side, 882, 0);
        let m = c.to_graph(RuleTable::builtin()).unwrap().compose();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m[(0, 2)], 1);
    }

    #[test]
    fn test_to_graph_rejects_banned_decoration() {
        let mut c = Configuration::single(ChainKind::Node, 9);
        c.add_decoration(DecorationKind::Side, 11, 0);
        assert!(matches!(
            c.to_graph(RuleTable::builtin()),
            Err(TopoError::BannedPair { .. })
        ));
    }

    #[test]
    fn test_to_graph_rejects_dangling_decoration() {
        let mut c = Configuration::single(ChainKind::Node, 6);
        c.add_decoration(DecorationKind::Instanton, 1, 3);
        assert_eq!(
            c.to_graph(RuleTable::builtin()).unwrap_err(),
            TopoError::DanglingAttachment { index: 3, len: 1 }
        );
    }

    proptest! {
        #[test]
        fn prop_monotone_runs_are_unimodal(mut up in prop::collection::vec(1..20i32, 0..8), mut down in prop::collection::vec(1..20i32, 0..8)) {
            up.sort();
            down.sort_by(|a, b| b.cmp(a));
            let peak = up.last().copied().unwrap_or(0).max(down.first().copied().unwrap_or(0));
            let mut seq = up;
            seq.push(peak);
            seq.extend(down);
            prop_assert!(is_unimodal(&seq));
        }
    }
}
