//! Linear theories: ordered runs of blocks.

use std::fmt;

use crate::block::{Block, Spec};
use crate::error::{Result, TopoError};
use crate::matrix::{block_diagonal, IntersectionForm};

/// One linearly glued run of blocks.
pub type Segment = Vec<Block>;

/// An ordered sequence of segments, fixed after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theory {
    segments: Vec<Segment>,
}

impl Theory {
    /// Builds a theory from nested tags, e.g. `[[s(12), n(7)], [i(22)]]`.
    ///
    /// Neighbours inside a segment, and the last block before a segment
    /// together with its first block, must not be a side/interior pair.
    pub fn from_specs<S, I>(segments: S) -> Result<Self>
    where
        S: IntoIterator<Item = I>,
        I: IntoIterator<Item = Spec>,
    {
        let mut theory = Theory::default();
        for specs in segments {
            let segment = specs
                .into_iter()
                .map(Block::from_spec)
                .collect::<Result<Segment>>()?;
            theory.append(segment)?;
        }
        Ok(theory)
    }

    fn append(&mut self, segment: Segment) -> Result<()> {
        for pair in segment.windows(2) {
            check_adjacent(&pair[0], &pair[1])?;
        }
        if let (Some(last), Some(first)) = (self.last_block(), segment.first()) {
            check_adjacent(last, first)?;
        }
        self.segments.push(segment);
        Ok(())
    }

    fn last_block(&self) -> Option<&Block> {
        self.segments.iter().rev().find_map(|s| s.last())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Local form of one block.
    pub fn form(&self, segment: usize, piece: usize) -> Option<&IntersectionForm> {
        self.segments.get(segment)?.get(piece).map(Block::form)
    }

    /// Block-diagonal sum of every local form, in order.
    pub fn block_diagonal(&self) -> IntersectionForm {
        block_diagonal(self.segments.iter().flatten().map(Block::form))
    }

    pub fn block_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

fn check_adjacent(a: &Block, b: &Block) -> Result<()> {
    if a.kind().may_glue_to(b.kind()) {
        Ok(())
    } else {
        Err(TopoError::ForbiddenAdjacency {
            first: a.kind(),
            second: b.kind(),
        })
    }
}

impl fmt::Display for Theory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Theory(sequential):")?;
        for (i, segment) in self.segments.iter().enumerate() {
            write!(f, "  Segment {}:", i)?;
            for block in segment {
                write!(f, " [{}, curves={}]", block.spec(), block.dim())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
