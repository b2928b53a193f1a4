//! Typed building blocks.
//!
//! Every kind-specific behavior lives on [`BlockKind`]: how its local form is
//! built, which rule family governs it, and which kinds it may touch.

use std::fmt;

use crate::error::Result;
use crate::local_form::build_local_form;
use crate::matrix::IntersectionForm;
use crate::port::Port;

/// The closed set of block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlockKind {
    SideLink,
    InteriorLink,
    Node,
    External,
}

/// Which rule family a link block is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkFamily {
    Side,
    Interior,
}

impl BlockKind {
    /// Builds the local form for a block of this kind.
    pub fn local_form(self, param: i32) -> Result<IntersectionForm> {
        build_local_form(self, param)
    }

    /// Rule family for link kinds, `None` for nodes and externals.
    pub fn link_family(self) -> Option<LinkFamily> {
        match self {
            BlockKind::SideLink => Some(LinkFamily::Side),
            BlockKind::InteriorLink => Some(LinkFamily::Interior),
            BlockKind::Node | BlockKind::External => None,
        }
    }

    /// True for the kind the parameter rules pair links against.
    pub fn is_node(self) -> bool {
        matches!(self, BlockKind::Node)
    }

    /// Structural adjacency: side links never touch interior links.
    pub fn may_glue_to(self, other: BlockKind) -> bool {
        !matches!(
            (self, other),
            (BlockKind::SideLink, BlockKind::InteriorLink)
                | (BlockKind::InteriorLink, BlockKind::SideLink)
        )
    }

    /// One-letter label used when printing graphs.
    pub fn label(self) -> char {
        match self {
            BlockKind::SideLink => 's',
            BlockKind::InteriorLink => 'i',
            BlockKind::Node => 'n',
            BlockKind::External => 'e',
        }
    }
}

/// A typed tag: kind plus integer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spec {
    pub kind: BlockKind,
    pub param: i32,
}

impl Spec {
    pub const fn new(kind: BlockKind, param: i32) -> Self {
        Self { kind, param }
    }

    pub const fn side(param: i32) -> Self {
        Self::new(BlockKind::SideLink, param)
    }

    pub const fn interior(param: i32) -> Self {
        Self::new(BlockKind::InteriorLink, param)
    }

    pub const fn node(param: i32) -> Self {
        Self::new(BlockKind::Node, param)
    }

    pub const fn external(param: i32) -> Self {
        Self::new(BlockKind::External, param)
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.label(), self.param)
    }
}

/// A block with its local intersection form. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    param: i32,
    form: IntersectionForm,
}

impl Block {
    /// Builds the block's local form from its tag.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::UnsupportedInteriorTag`](crate::TopoError) for
    /// interior-link tags without two or three digits.
    pub fn new(kind: BlockKind, param: i32) -> Result<Self> {
        let form = kind.local_form(param)?;
        Ok(Self { kind, param, form })
    }

    pub fn from_spec(spec: Spec) -> Result<Self> {
        Self::new(spec.kind, spec.param)
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn param(&self) -> i32 {
        self.param
    }

    pub fn spec(&self) -> Spec {
        Spec::new(self.kind, self.param)
    }

    pub fn form(&self) -> &IntersectionForm {
        &self.form
    }

    /// Number of curves in the local form.
    pub fn dim(&self) -> usize {
        self.form.nrows()
    }

    /// Resolves a port to a row of the local form.
    pub fn port_index(&self, port: Port) -> Option<usize> {
        port.resolve(self.dim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_ban_is_symmetric() {
        use BlockKind::*;
        let kinds = [SideLink, InteriorLink, Node, External];
        for a in kinds {
            for b in kinds {
                let banned = matches!((a, b), (SideLink, InteriorLink) | (InteriorLink, SideLink));
                assert_eq!(a.may_glue_to(b), !banned, "{:?} -> {:?}", a, b);
                assert_eq!(a.may_glue_to(b), b.may_glue_to(a));
            }
        }
    }

    #[test]
    fn test_block_ports() {
        let block = Block::new(BlockKind::SideLink, 883).unwrap();
        assert_eq!(block.dim(), 3);
        assert_eq!(block.port_index(Port::Left), Some(0));
        assert_eq!(block.port_index(Port::Right), Some(2));
        assert_eq!(block.port_index(Port::Custom), Some(1));

        let empty = Block::new(BlockKind::SideLink, 5).unwrap();
        assert_eq!(empty.dim(), 0);
        assert_eq!(empty.port_index(Port::Left), None);
    }

    #[test]
    fn test_spec_display() {
        assert_eq!(Spec::side(12).to_string(), "s12");
        assert_eq!(Spec::node(7).to_string(), "n7");
        assert_eq!(Spec::interior(22).to_string(), "i22");
    }
}
