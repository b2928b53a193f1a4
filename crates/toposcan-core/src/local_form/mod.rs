//! Local intersection forms of single blocks.
//!
//! A block's form is grown curve by curve with [`CurveChain`]. Node and
//! external blocks are a single curve; interior links decode their tag
//! digits; side links look their tag up in [`patterns`].

mod patterns;

use nalgebra::DMatrix;

use crate::block::BlockKind;
use crate::error::{Result, TopoError};
use crate::matrix::IntersectionForm;

pub use patterns::{side_pattern, Step};

/// Incremental builder for a chain of glued curves.
///
/// Each attached curve meets the current tip with intersection `+1`.
#[derive(Debug, Clone, Default)]
pub struct CurveChain {
    self_ints: Vec<i64>,
    links: Vec<(usize, usize)>,
    tip: Option<usize>,
}

impl CurveChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of curves attached so far.
    pub fn len(&self) -> usize {
        self.self_ints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.self_ints.is_empty()
    }

    fn push_curve(&mut self, self_int: i64) -> usize {
        let idx = self.self_ints.len();
        self.self_ints.push(self_int);
        idx
    }

    /// Appends a curve glued to the tip; the new curve becomes the tip.
    pub fn attach(&mut self, self_int: i64) -> &mut Self {
        let idx = self.push_curve(self_int);
        if let Some(tip) = self.tip {
            self.links.push((tip, idx));
        }
        self.tip = Some(idx);
        self
    }

    /// Appends a curve glued to the tip and hangs `branch` off it.
    ///
    /// The tip moves to the first curve, so the chain continues from it.
    pub fn attach_branched(&mut self, self_int: i64, branch: i64) -> &mut Self {
        self.attach(self_int);
        let stem = self.tip.unwrap_or(0);
        let leaf = self.push_curve(branch);
        self.links.push((stem, leaf));
        self
    }

    /// Appends an interior conformal-matter link with arms `a`, `b`.
    ///
    /// `a = b = 1` is a lone `-1`. Otherwise the link is
    /// `-1 (-2)^(a-2) -3 (-2)^(b-2) -1`, dropping an arm whose length is
    /// below 2, with a `-2` branch on the `-3` when `flag > 0`.
    pub fn attach_link(&mut self, a: u32, b: u32, flag: u32) -> &mut Self {
        if a == 1 && b == 1 {
            return self.attach(-1);
        }
        if a >= 2 {
            self.attach(-1);
            for _ in 2..a {
                self.attach(-2);
            }
        }
        if flag > 0 {
            self.attach_branched(-3, -2);
        } else {
            self.attach(-3);
        }
        if b >= 2 {
            for _ in 2..b {
                self.attach(-2);
            }
            self.attach(-1);
        }
        self
    }

    /// Replays a step sequence onto the chain.
    pub fn extend_steps(&mut self, steps: &[Step]) -> &mut Self {
        for step in steps {
            match *step {
                Step::Curve(c) => self.attach(c),
                Step::Branched(c, b) => self.attach_branched(c, b),
                Step::Link(a, b, flag) => self.attach_link(a, b, flag),
            };
        }
        self
    }

    /// Produces the symmetric intersection form of the chain.
    pub fn form(&self) -> IntersectionForm {
        let n = self.self_ints.len();
        let mut m = DMatrix::zeros(n, n);
        for (i, &c) in self.self_ints.iter().enumerate() {
            m[(i, i)] = c;
        }
        for &(i, j) in &self.links {
            m[(i, j)] += 1;
            m[(j, i)] += 1;
        }
        m
    }
}

/// Builds the local form for a block of `kind` with tag `param`.
///
/// Unknown side-link tags yield the empty form. Interior-link tags must have
/// two or three decimal digits.
pub fn build_local_form(kind: BlockKind, param: i32) -> Result<IntersectionForm> {
    let mut chain = CurveChain::new();
    match kind {
        BlockKind::Node | BlockKind::External => {
            chain.attach(-(param as i64));
        }
        BlockKind::InteriorLink => {
            let (a, b, flag) = interior_digits(param)?;
            chain.attach_link(a, b, flag);
        }
        BlockKind::SideLink => {
            if let Some(steps) = side_pattern(param) {
                chain.extend_steps(&steps);
            }
        }
    }
    Ok(chain.form())
}

fn interior_digits(param: i32) -> Result<(u32, u32, u32)> {
    let digits: Vec<u32> = param
        .to_string()
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .ok_or(TopoError::UnsupportedInteriorTag(param))?;
    match digits.as_slice() {
        [a, b] => Ok((*a, *b, 0)),
        [a, b, flag] => Ok((*a, *b, *flag)),
        _ => Err(TopoError::UnsupportedInteriorTag(param)),
    }
}
