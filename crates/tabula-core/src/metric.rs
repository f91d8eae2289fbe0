//! Movement metrics for square-family grids.

use std::fmt;

/// How diagonal movement is counted on square and isometric grids.
///
/// Hex grids have a single natural metric and ignore this; it exists
/// because square-grid rulesets disagree about the cost of a diagonal
/// step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// Diagonal moves are not allowed.
    NoDiagonals,
    /// Diagonal moves are not allowed; distance is pure L1.
    Manhattan,
    /// Every diagonal costs 1 (Chebyshev distance).
    #[default]
    OneOneOne,
    /// Diagonals alternate 1, 2, 1, 2, … (the "5-10-5" convention).
    OneTwoOne,
}

impl Metric {
    /// Whether this metric admits diagonal steps at all.
    #[inline]
    pub const fn allows_diagonals(self) -> bool {
        matches!(self, Self::OneOneOne | Self::OneTwoOne)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoDiagonals => "no diagonals",
            Self::Manhattan => "manhattan",
            Self::OneOneOne => "1-1-1",
            Self::OneTwoOne => "1-2-1",
        };
        f.write_str(name)
    }
}
