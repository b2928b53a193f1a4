//! Error types for toposcan

use thiserror::Error;

use crate::block::BlockKind;
use crate::port::Port;

/// Main error type for block construction and gluing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopoError {
    /// A side link and an interior link were glued directly.
    #[error("Forbidden adjacency: {first:?} cannot be glued to {second:?}")]
    ForbiddenAdjacency { first: BlockKind, second: BlockKind },

    /// The rule table forbids this link/node parameter pair on any port.
    #[error("Banned pairing: {link_kind:?}({link_param}) with Node({node_param})")]
    BannedPair {
        link_kind: BlockKind,
        link_param: i32,
        node_param: i32,
    },

    /// The rule table forbids this link/node parameter pair on these ports.
    #[error(
        "Banned port pairing: {link_kind:?}({link_param}) at {link_port:?} with Node({node_param}) at {node_port:?}"
    )]
    BannedPortPair {
        link_kind: BlockKind,
        link_param: i32,
        node_param: i32,
        link_port: Port,
        node_port: Port,
    },

    /// Explicit gluing weights must be strictly positive.
    #[error("Gluing weight must be positive, got {0}")]
    NonPositiveWeight(i64),

    /// Interior link tags must have two or three decimal digits.
    #[error("Interior link tag must have 2 or 3 digits, got {0}")]
    UnsupportedInteriorTag(i32),

    /// A node reference does not belong to the graph.
    #[error("Unknown node id {0}")]
    UnknownNode(usize),

    /// Both ends of an edge are the same block.
    #[error("Node {0} cannot be glued to itself")]
    SelfGluing(usize),

    /// A decoration or chain reference points outside the configuration.
    #[error("Attachment references block {index} but the chain has {len} blocks")]
    DanglingAttachment { index: usize, len: usize },
}

/// Result type alias for toposcan operations.
pub type Result<T> = std::result::Result<T, TopoError>;
