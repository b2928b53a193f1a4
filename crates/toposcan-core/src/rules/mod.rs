//! Gluing validity policy.
//!
//! A [`RuleTable`] holds two [`RuleSet`]s, one per link family. Each set
//! bans link/node parameter pairs either on every port or only on one port
//! assignment. Tables are plain data: they can be loaded, audited and
//! replaced without touching the graph code.

mod builtin;

use std::sync::{Arc, OnceLock};

use crate::block::{BlockKind, LinkFamily};
use crate::error::{Result, TopoError};
use crate::port::Port;

/// A range test over the node parameter. A rule applies when it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeCondition {
    /// Node parameter strictly greater than the bound.
    Above(i32),
    /// Node parameter strictly less than the bound.
    Below(i32),
    /// Node parameter outside the closed range `[lo, hi]`.
    Outside(i32, i32),
}

impl NodeCondition {
    pub fn holds(self, node_param: i32) -> bool {
        match self {
            NodeCondition::Above(n) => node_param > n,
            NodeCondition::Below(n) => node_param < n,
            NodeCondition::Outside(lo, hi) => node_param < lo || node_param > hi,
        }
    }
}

/// Bans `link` next to any node satisfying `when`, on every port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairRule {
    pub link: i32,
    pub when: NodeCondition,
}

/// Bans `link` next to any node satisfying `when` on one port assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortRule {
    pub link: i32,
    pub when: NodeCondition,
    pub link_port: Port,
    pub node_port: Port,
}

/// Pair and port bans for one link family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleSet {
    pub pairs: Vec<PairRule>,
    pub ports: Vec<PortRule>,
}

impl RuleSet {
    pub fn bans_pair(&self, link: i32, node_param: i32) -> bool {
        self.pairs
            .iter()
            .any(|r| r.link == link && r.when.holds(node_param))
    }

    pub fn bans_ports(&self, link: i32, node_param: i32, link_port: Port, node_port: Port) -> bool {
        self.ports.iter().any(|r| {
            r.link == link
                && r.link_port == link_port
                && r.node_port == node_port
                && r.when.holds(node_param)
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len() + self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.ports.is_empty()
    }
}

/// One endpoint of a proposed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub kind: BlockKind,
    pub param: i32,
    pub port: Port,
}

impl Endpoint {
    pub fn new(kind: BlockKind, param: i32, port: Port) -> Self {
        Self { kind, param, port }
    }
}

/// The complete gluing policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleTable {
    pub side: RuleSet,
    pub interior: RuleSet,
}

static BUILTIN: OnceLock<Arc<RuleTable>> = OnceLock::new();

impl RuleTable {
    /// A table with no parameter bans. Structural bans still apply.
    pub fn permissive() -> Self {
        Self::default()
    }

    /// The shared builtin table.
    pub fn builtin() -> Arc<RuleTable> {
        BUILTIN.get_or_init(|| Arc::new(builtin::table())).clone()
    }

    pub fn family(&self, family: LinkFamily) -> &RuleSet {
        match family {
            LinkFamily::Side => &self.side,
            LinkFamily::Interior => &self.interior,
        }
    }

    /// Checks a proposed edge between `a` and `b`.
    ///
    /// The structural ban applies to every pair. Parameter rules apply when
    /// one endpoint is a link and the other a node, in either order.
    pub fn check(&self, a: Endpoint, b: Endpoint) -> Result<()> {
        if !a.kind.may_glue_to(b.kind) {
            return Err(TopoError::ForbiddenAdjacency {
                first: a.kind,
                second: b.kind,
            });
        }
        let (link, node, family) = match (a.kind.link_family(), b.kind.link_family()) {
            (Some(family), _) if b.kind.is_node() => (a, b, family),
            (_, Some(family)) if a.kind.is_node() => (b, a, family),
            _ => return Ok(()),
        };
        let rules = self.family(family);
        if rules.bans_pair(link.param, node.param) {
            return Err(TopoError::BannedPair {
                link_kind: link.kind,
                link_param: link.param,
                node_param: node.param,
            });
        }
        if rules.bans_ports(link.param, node.param, link.port, node.port) {
            return Err(TopoError::BannedPortPair {
                link_kind: link.kind,
                link_param: link.param,
                node_param: node.param,
                link_port: link.port,
                node_port: node.port,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
