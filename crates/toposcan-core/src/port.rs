//! Ports, node references and weighted edges.

use std::fmt;

/// Attachment point of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Port {
    Left,
    Right,
    Custom,
}

impl Port {
    /// Resolves to a row of a local form with `dim` curves.
    ///
    /// `Left` is the first curve, `Right` the last, `Custom` the second when
    /// there is one and the first otherwise. An empty form has no ports.
    pub fn resolve(self, dim: usize) -> Option<usize> {
        if dim == 0 {
            return None;
        }
        Some(match self {
            Port::Left => 0,
            Port::Right => dim - 1,
            Port::Custom => {
                if dim >= 2 {
                    1
                } else {
                    0
                }
            }
        })
    }

    fn code(self) -> u8 {
        match self {
            Port::Left => 0,
            Port::Right => 1,
            Port::Custom => 2,
        }
    }
}

/// Opaque handle to a node owned by a [`GluingGraph`](crate::GluingGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(pub(crate) usize);

impl NodeRef {
    pub fn id(self) -> usize {
        self.0
    }
}

/// A symmetric gluing between two node ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub u: NodeRef,
    pub v: NodeRef,
    pub port_u: Port,
    pub port_v: Port,
    pub weight: i64,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) --({})-- {}({})",
            self.u.0,
            self.port_u.code(),
            self.weight,
            self.v.0,
            self.port_v.code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_resolution() {
        assert_eq!(Port::Left.resolve(1), Some(0));
        assert_eq!(Port::Right.resolve(1), Some(0));
        assert_eq!(Port::Custom.resolve(1), Some(0));
        assert_eq!(Port::Right.resolve(5), Some(4));
        assert_eq!(Port::Custom.resolve(5), Some(1));
        assert_eq!(Port::Left.resolve(0), None);
        assert_eq!(Port::Custom.resolve(0), None);
    }
}
