//! Port-weighted gluing graphs.
//!
//! A [`GluingGraph`] owns its blocks and an append-only edge list. Every
//! edge is validated against the graph's [`RuleTable`] when it is added, so
//! a graph that exists is always a legal gluing. [`GluingGraph::compose`]
//! turns it into one intersection form.

use std::fmt;
use std::sync::Arc;

use crate::block::{Block, BlockKind};
use crate::error::{Result, TopoError};
use crate::layout::Layout;
use crate::matrix::{block_diagonal, FormDisplay, IntersectionForm};
use crate::port::{Edge, NodeRef, Port};
use crate::rules::{Endpoint, RuleTable};

/// Blocks glued along weighted port edges.
#[derive(Debug, Clone)]
pub struct GluingGraph {
    nodes: Vec<Block>,
    edges: Vec<Edge>,
    rules: Arc<RuleTable>,
}

impl Default for GluingGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl GluingGraph {
    /// Creates an empty graph checked against the builtin rules.
    pub fn new() -> Self {
        Self::with_rules(RuleTable::builtin())
    }

    pub fn with_rules(rules: Arc<RuleTable>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            rules,
        }
    }

    /// Builds a block and adds it. Ids are assigned in insertion order.
    pub fn add(&mut self, kind: BlockKind, param: i32) -> Result<NodeRef> {
        let block = Block::new(kind, param)?;
        Ok(self.add_block(block))
    }

    pub fn add_block(&mut self, block: Block) -> NodeRef {
        let id = NodeRef(self.nodes.len());
        self.nodes.push(block);
        id
    }

    /// Glues `a`'s right port to `b`'s left port with weight 1.
    pub fn connect(&mut self, a: NodeRef, b: NodeRef) -> Result<()> {
        self.connect_ports(a, Port::Right, b, Port::Left, 1)
    }

    /// Glues two explicit ports with a positive weight.
    ///
    /// # Errors
    ///
    /// Fails without touching the graph when either node is unknown, when
    /// both ends are the same node, when the pair is structurally forbidden, when a parameter rule bans it, or
    /// when `weight` is not positive.
    pub fn connect_ports(
        &mut self,
        a: NodeRef,
        port_a: Port,
        b: NodeRef,
        port_b: Port,
        weight: i64,
    ) -> Result<()> {
        let block_a = self.node(a)?;
        let block_b = self.node(b)?;
        if a == b {
            return Err(TopoError::SelfGluing(a.0));
        }
        if !block_a.kind().may_glue_to(block_b.kind()) {
            return Err(TopoError::ForbiddenAdjacency {
                first: block_a.kind(),
                second: block_b.kind(),
            });
        }
        if weight <= 0 {
            return Err(TopoError::NonPositiveWeight(weight));
        }
        self.rules.check(
            Endpoint::new(block_a.kind(), block_a.param(), port_a),
            Endpoint::new(block_b.kind(), block_b.param(), port_b),
        )?;
        self.edges.push(Edge {
            u: a,
            v: b,
            port_u: port_a,
            port_v: port_b,
            weight,
        });
        Ok(())
    }

    fn node(&self, id: NodeRef) -> Result<&Block> {
        self.nodes.get(id.0).ok_or(TopoError::UnknownNode(id.0))
    }

    pub fn block(&self, id: NodeRef) -> Option<&Block> {
        self.nodes.get(id.0)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Side-aware text layout of the graph.
    pub fn layout(&self) -> Layout<'_> {
        Layout::new(self)
    }

    /// Composes the graph into a single symmetric intersection form.
    ///
    /// Local forms go on the diagonal in id order. Each edge then adds its
    /// weight at the two resolved port rows and the mirror entry. An edge
    /// touching a block without curves contributes nothing.
    pub fn compose(&self) -> IntersectionForm {
        let mut m = block_diagonal(self.nodes.iter().map(Block::form));
        let offsets: Vec<usize> = self
            .nodes
            .iter()
            .scan(0, |acc, block| {
                let at = *acc;
                *acc += block.dim();
                Some(at)
            })
            .collect();

        for edge in &self.edges {
            let (bu, bv) = (&self.nodes[edge.u.0], &self.nodes[edge.v.0]);
            let (Some(iu), Some(iv)) = (bu.port_index(edge.port_u), bv.port_index(edge.port_v))
            else {
                continue;
            };
            let r = offsets[edge.u.0] + iu;
            let c = offsets[edge.v.0] + iv;
            m[(r, c)] += edge.weight;
            m[(c, r)] += edge.weight;
        }
        m
    }
}

impl fmt::Display for GluingGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GluingGraph:")?;
        for (id, block) in self.nodes.iter().enumerate() {
            writeln!(f, "  node {}: {} ({} curves)", id, block.spec(), block.dim())?;
        }
        for edge in &self.edges {
            writeln!(f, "  {}", edge)?;
        }
        write!(f, "{}", FormDisplay(&self.compose()))
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
