//! Spectral classification of intersection forms.
//!
//! A form is SCFT when it is negative definite and LST when it is negative
//! semidefinite with a one-dimensional null space. Everything else, the
//! empty form included, is unclassified.

use std::fmt;

use nalgebra::{Cholesky, DMatrix, SymmetricEigen};

use crate::matrix::IntersectionForm;

/// Default eigenvalue tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Classification outcome. The categories are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    Scft,
    Lst,
    Unclassified,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Scft => "SCFT",
            Category::Lst => "LST",
            Category::Unclassified => "unclassified",
        }
    }

    /// True for the categories that are written out.
    pub fn is_classified(self) -> bool {
        !matches!(self, Category::Unclassified)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a form is classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClassifierStrategy {
    /// Full symmetric eigen-decomposition.
    #[default]
    Exact,
    /// Cholesky definiteness tests plus a rank check. Never reports a
    /// category the exact path would reject, but may report
    /// `Unclassified` for forms within the tolerance of a boundary.
    Fast,
}

/// Classifies composed intersection forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralClassifier {
    tolerance: f64,
    strategy: ClassifierStrategy,
}

impl Default for SpectralClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralClassifier {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            strategy: ClassifierStrategy::Exact,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_strategy(mut self, strategy: ClassifierStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn strategy(&self) -> ClassifierStrategy {
        self.strategy
    }

    pub fn classify(&self, m: &IntersectionForm) -> Category {
        if m.nrows() == 0 || m.nrows() != m.ncols() {
            return Category::Unclassified;
        }
        match self.strategy {
            ClassifierStrategy::Exact => self.classify_exact(m),
            ClassifierStrategy::Fast => self.classify_fast(m),
        }
    }

    /// Eigenvalues of `-M` in ascending order, `None` when the routine fails.
    pub fn eigenvalues(&self, m: &IntersectionForm) -> Option<Vec<f64>> {
        if m.nrows() == 0 {
            return Some(Vec::new());
        }
        let eigen = SymmetricEigen::try_new(negated(m), f64::EPSILON, 0)?;
        let mut values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
        if values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        values.sort_by(f64::total_cmp);
        Some(values)
    }

    fn classify_exact(&self, m: &IntersectionForm) -> Category {
        let Some(values) = self.eigenvalues(m) else {
            return Category::Unclassified;
        };
        let eps = self.tolerance;
        let null = values.iter().filter(|v| v.abs() <= eps).count();
        let positive = values.iter().filter(|&&v| v > eps).count();
        if positive == values.len() {
            Category::Scft
        } else if null == 1 && positive + 1 == values.len() {
            Category::Lst
        } else {
            Category::Unclassified
        }
    }

    fn classify_fast(&self, m: &IntersectionForm) -> Category {
        let a = negated(m);
        let n = a.nrows();
        let eps = self.tolerance;
        let shifted = |shift: f64| &a + DMatrix::<f64>::identity(n, n) * shift;

        if Cholesky::new(shifted(-eps)).is_some() {
            return Category::Scft;
        }
        if Cholesky::new(shifted(eps)).is_none() {
            return Category::Unclassified;
        }
        if n - a.rank(eps) == 1 {
            Category::Lst
        } else {
            Category::Unclassified
        }
    }
}

/// `-M` as a symmetrized float matrix.
fn negated(m: &IntersectionForm) -> DMatrix<f64> {
    let a = m.map(|v| -(v as f64));
    (&a + a.transpose()) * 0.5
}

#[cfg(test)]
#[path = "spectral_tests.rs"]
mod tests;
